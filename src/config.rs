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

use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::metrics::EmptyGroundTruth;

pub const DB_URI_VAR: &str = "GRAPHRECO_DB_URI";
pub const DB_USER_VAR: &str = "GRAPHRECO_DB_USER";
pub const DB_PASSWORD_VAR: &str = "GRAPHRECO_DB_PASSWORD";

const DEFAULT_DB_URI: &str = "bolt://localhost:7687";
const DEFAULT_DB_USER: &str = "neo4j";

/// Where and as whom to connect to the graph database. Handed explicitly to whatever implements
/// `preprocess::GraphDatabase`.
#[derive(Clone, PartialEq, Deserialize)]
pub struct ConnectionConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl ConnectionConfig {

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves the settings through `lookup`, falling back to defaults for uri and user.
    pub fn from_lookup<F>(lookup: F) -> Result<Self> where F: Fn(&str) -> Option<String> {
        let uri = lookup(DB_URI_VAR).unwrap_or_else(|| DEFAULT_DB_URI.to_owned());
        let user = lookup(DB_USER_VAR).unwrap_or_else(|| DEFAULT_DB_USER.to_owned());
        let password = lookup(DB_PASSWORD_VAR)
            .ok_or_else(|| Error::Config(format!("{} is not set", DB_PASSWORD_VAR)))?;

        Ok(ConnectionConfig { uri, user, password })
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

fn default_k() -> usize {
    20
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

/// Settings for evaluating recommendations
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EvaluationConfig {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub empty_ground_truth: EmptyGroundTruth,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            k: default_k(),
            empty_ground_truth: EmptyGroundTruth::default(),
            num_threads: default_num_threads(),
        }
    }
}

impl EvaluationConfig {

    /// Reads the settings from a JSON file, missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: EvaluationConfig = serde_json::from_reader(reader)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::Config(String::from("k must be positive")));
        }
        if self.num_threads == 0 {
            return Err(Error::Config(String::from("num_threads must be positive")));
        }

        Ok(())
    }
}
