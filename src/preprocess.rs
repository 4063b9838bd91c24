/**
 * GraphReco
 * Copyright (C) 2026 The GraphReco developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

// Runs preparation statements (type casts, derived relationships, ...) against the graph
// database which holds the ratings.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Outcome of a single statement as reported by the database
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuerySummary {
    pub statement: String,
    pub records: usize,
}

impl fmt::Display for QuerySummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} record(s) for '{}'", self.records, self.statement)
    }
}

/// An open session with the graph database. Implementations translate driver failures into
/// `Error::Database`.
pub trait Session {
    fn run(&mut self, statement: &str) -> Result<QuerySummary>;

    /// Releases the session, consuming the handle
    fn close(self) -> Result<()>;
}

/// Handle to a graph database which hands out sessions
pub trait GraphDatabase {
    type Session: Session;

    fn session(&self) -> Result<Self::Session>;
}

/// Splits a script into its statements. Everything after the last `;` is dropped, so an
/// unterminated trailing statement is never run.
pub fn statements(script: &str) -> Vec<String> {
    let mut parts: Vec<&str> = script.split(';').collect();
    parts.pop();

    parts.into_iter()
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(String::from)
        .collect()
}

fn execute_all<S: Session>(session: &mut S, statements: &[String]) -> Result<usize> {
    for statement in statements {
        let summary = session.run(statement).map_err(|failure| {
            warn!("Statement failed, skipping the remaining ones: {}", failure);
            failure
        })?;
        info!("{}", summary);
    }

    Ok(statements.len())
}

/// Opens a session, runs the given statements one after another and closes the session again.
/// The first failing statement aborts the remaining ones; the session is closed in any case.
pub fn run_statements<D: GraphDatabase>(database: &D, statements: &[String]) -> Result<usize> {

    let mut session = database.session()?;

    let outcome = execute_all(&mut session, statements);
    let closed = session.close();

    let executed = outcome?;
    closed?;

    Ok(executed)
}

/// Reads the `;`-separated statements from the file at `path` and executes them sequentially.
/// Returns the number of executed statements.
pub fn preprocess<D: GraphDatabase, P: AsRef<Path>>(database: &D, path: P) -> Result<usize> {
    let script = fs::read_to_string(path.as_ref())?;
    let statements = statements(&script);

    info!("Running {} statements from {}", statements.len(), path.as_ref().display());

    run_statements(database, &statements)
}


#[cfg(test)]
mod tests {

    use std::cell::RefCell;
    use std::fs;

    use super::{preprocess, run_statements, statements, GraphDatabase, QuerySummary, Session};
    use crate::error::{Error, Result};

    #[derive(Default)]
    struct RecordingDatabase {
        executed: RefCell<Vec<String>>,
        sessions_opened: RefCell<usize>,
        sessions_closed: RefCell<usize>,
        failing_statement: Option<String>,
    }

    struct RecordingSession<'a> {
        database: &'a RecordingDatabase,
    }

    impl<'a> Session for RecordingSession<'a> {
        fn run(&mut self, statement: &str) -> Result<QuerySummary> {
            if self.database.failing_statement.as_ref().map(String::as_str) == Some(statement) {
                return Err(Error::Database(format!("syntax error in '{}'", statement)));
            }

            self.database.executed.borrow_mut().push(statement.to_owned());
            Ok(QuerySummary { statement: statement.to_owned(), records: 0 })
        }

        fn close(self) -> Result<()> {
            *self.database.sessions_closed.borrow_mut() += 1;
            Ok(())
        }
    }

    impl<'a> GraphDatabase for &'a RecordingDatabase {
        type Session = RecordingSession<'a>;

        fn session(&self) -> Result<RecordingSession<'a>> {
            *self.sessions_opened.borrow_mut() += 1;
            Ok(RecordingSession { database: *self })
        }
    }

    #[test]
    fn splits_statements() {
        let script = "MATCH (m:Movie) SET m.year = toInteger(m.year);\n\
                      MATCH ()-[r:RATED]->() SET r.rating = toFloat(r.rating);\n\
                      ;\n\
                      MATCH (n) RETURN n";

        assert_eq!(statements(script), vec![
            "MATCH (m:Movie) SET m.year = toInteger(m.year)",
            "MATCH ()-[r:RATED]->() SET r.rating = toFloat(r.rating)",
        ]);

        assert!(statements("no terminator").is_empty());
        assert!(statements("").is_empty());
    }

    #[test]
    fn runs_all_statements_in_one_session() {
        let database = RecordingDatabase::default();
        let script = vec![String::from("A"), String::from("B"), String::from("C")];

        let executed = run_statements(&&database, &script).unwrap();

        assert_eq!(executed, 3);
        assert_eq!(*database.executed.borrow(), vec!["A", "B", "C"]);
        assert_eq!(*database.sessions_opened.borrow(), 1);
        assert_eq!(*database.sessions_closed.borrow(), 1);
    }

    #[test]
    fn failure_aborts_and_closes() {
        let database = RecordingDatabase {
            failing_statement: Some(String::from("B")),
            ..Default::default()
        };
        let script = vec![String::from("A"), String::from("B"), String::from("C")];

        let result = run_statements(&&database, &script);

        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(*database.executed.borrow(), vec!["A"]);
        assert_eq!(*database.sessions_closed.borrow(), 1);
    }

    #[test]
    fn preprocess_from_file() {
        let path = std::env::temp_dir().join("graphreco-preprocess-test.cypher");
        fs::write(&path, "CREATE INDEX FOR (u:User) ON (u.id);\nCREATE INDEX FOR (m:Movie) ON (m.id);\n")
            .unwrap();

        let database = RecordingDatabase::default();
        let executed = preprocess(&&database, &path).unwrap();

        assert_eq!(executed, 2);
        assert_eq!(*database.sessions_closed.borrow(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        let database = RecordingDatabase::default();
        let result = preprocess(&&database, "/nonexistent/graphreco/statements.cypher");

        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(*database.sessions_opened.borrow(), 0);
    }
}
