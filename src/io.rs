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

use std::fs::File;
use std::io::{stdout, Write};
use std::path::Path;

use crate::dataset::{MovieDataset, Rating};
use crate::error::Result;
use crate::metrics::Evaluation;
use crate::stats::DataDictionary;

/// Reads a CSV input file. We expect NO headers, and one record per line with tab separation.
pub fn csv_reader<P: AsRef<Path>>(file: P) -> Result<csv::Reader<File>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_path(file)?;

    Ok(reader)
}

/// User-item pairs from a reader, in file order
pub fn interactions_from_csv<'a, R>(
    reader: &'a mut csv::Reader<R>
) -> impl Iterator<Item=Result<(String, String)>> + 'a
    where R: std::io::Read {

    reader.deserialize::<(String, String)>()
        .map(|record| record.map_err(Into::into))
}

/// Reads `user\tmovie\trating` lines into a dataset. Users and movies are assigned consecutive
/// ids in order of appearance, the returned dictionary maps the original identifiers to them.
pub fn read_ratings<P: AsRef<Path>>(file: P) -> Result<(MovieDataset, DataDictionary)> {

    let mut reader = csv_reader(file)?;

    let mut data_dict = DataDictionary::default();
    let mut ratings = MovieDataset::default();

    for record in reader.deserialize() {
        let (user, movie, rating): (String, String, f32) = record?;
        let (user_index, movie_index) = data_dict.observe(&user, &movie);

        ratings.push(Rating { user: user_index, movie: movie_index, rating });
    }

    info!("Read {} ratings of {} users for {} movies",
        ratings.len(), data_dict.num_users(), data_dict.num_items());

    Ok((ratings, data_dict))
}

/// Reads `user\titem` lines and groups the items per user, keeping the order of the file. This
/// gives the ranked recommendation lists or the ground truth per user. Identifiers are resolved
/// via (and added to) `data_dict`, the result has one entry per user known to it.
pub fn read_item_lists<P: AsRef<Path>>(
    file: P,
    data_dict: &mut DataDictionary,
) -> Result<Vec<Vec<u32>>> {

    let mut reader = csv_reader(file)?;
    let mut lists: Vec<Vec<u32>> = Vec::with_capacity(data_dict.num_users());

    for record in interactions_from_csv(&mut reader) {
        let (user, item) = record?;
        let (user_index, item_index) = data_dict.observe(&user, &item);

        let user_idx = user_index as usize;
        if lists.len() <= user_idx {
            lists.resize(user_idx + 1, Vec::new());
        }
        // Repeated lines keep the rank of their first occurrence
        if !lists[user_idx].contains(&item_index) {
            lists[user_idx].push(item_index);
        }
    }

    lists.resize(data_dict.num_users(), Vec::new());

    Ok(lists)
}

/// Output the evaluation in JSON format. If an `output_path` is supplied, we write to a file at
/// the specified path, otherwise, we output to stdout.
pub fn write_evaluation(evaluation: &Evaluation, output_path: Option<String>) -> Result<()> {

    let mut out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout())
    };

    writeln!(out, "{}", serde_json::to_string(evaluation)?)?;

    Ok(())
}


#[cfg(test)]
mod tests {

    use std::fs;
    use std::path::PathBuf;

    use super::{read_item_lists, read_ratings, write_evaluation};
    use crate::dataset::Rating;
    use crate::error::Error;
    use crate::metrics::Evaluation;
    use crate::stats::DataDictionary;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn ratings_from_tsv() {
        let path = temp_file("graphreco-io-ratings.tsv",
            "alice\tbrazil\t4.5\nbob\tbrazil\t3\nalice\talien\t5\n");

        let (ratings, data_dict) = read_ratings(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(ratings.len(), 3);
        assert_eq!(data_dict.num_users(), 2);
        assert_eq!(data_dict.num_items(), 2);
        assert_eq!(ratings.get(2).unwrap(), Rating { user: 0, movie: 1, rating: 5.0 });
    }

    #[test]
    fn malformed_ratings() {
        let path = temp_file("graphreco-io-malformed.tsv", "alice\tbrazil\tgreat\n");

        let result = read_ratings(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn item_lists_share_the_dictionary() {
        let truth = temp_file("graphreco-io-truth.tsv", "u1\ta\nu1\tb\nu2\tc\n");
        let recommended = temp_file("graphreco-io-recommended.tsv", "u2\tc\nu3\ta\nu1\td\n");

        let mut data_dict = DataDictionary::default();
        let mut ground_truth = read_item_lists(&truth, &mut data_dict).unwrap();
        let recommendations = read_item_lists(&recommended, &mut data_dict).unwrap();
        ground_truth.resize(data_dict.num_users(), Vec::new());

        fs::remove_file(&truth).unwrap();
        fs::remove_file(&recommended).unwrap();

        assert_eq!(ground_truth, vec![vec![0, 1], vec![2], vec![]]);
        assert_eq!(recommendations, vec![vec![3], vec![2], vec![0]]);
    }

    #[test]
    fn repeated_lines_are_read_once() {
        let path = temp_file("graphreco-io-repeated.tsv", "u1\ta\nu1\tb\nu1\ta\nu2\tb\nu2\tb\n");

        let mut data_dict = DataDictionary::default();
        let lists = read_item_lists(&path, &mut data_dict).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(lists, vec![vec![0, 1], vec![1]]);
    }

    #[test]
    fn evaluation_to_file() {
        let path = std::env::temp_dir().join("graphreco-io-evaluation.json");
        let evaluation = Evaluation { k: 5, recall: 0.5, precision: 0.25, ndcg: 0.75 };

        write_evaluation(&evaluation, Some(path.to_string_lossy().into_owned())).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["k"], 5);
        assert_eq!(json["ndcg"], 0.75);
    }
}
