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

use thiserror::Error;

/// Errors raised by graphreco.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape problems reported by ndarray, e.g. when concatenating blocks
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Index based access beyond the end of a collection
    #[error("Index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Parallel inputs which must have the same length don't
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid k = {k} for a relevance matrix with {columns} columns")]
    InvalidK { k: usize, columns: usize },

    /// A user without relevant items, for which recall is undefined
    #[error("User {user} has an empty ground truth")]
    EmptyGroundTruth { user: usize },

    /// Failures reported by the graph database session
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// An external identifier which is not part of the data dictionary
    #[error("Unknown identifier: {0}")]
    UnknownId(String),
}

pub type Result<T> = std::result::Result<T, Error>;
