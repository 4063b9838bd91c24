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

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use fnv::FnvHashSet;
use ndarray::ArrayView2;

pub mod adjacency;
pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod metrics;
pub mod preprocess;
pub mod ranking;
pub mod stats;
pub mod types;


pub use crate::adjacency::interaction_to_adjacency;
pub use crate::config::EvaluationConfig;
pub use crate::dataset::MovieDataset;
pub use crate::error::{Error, Result};
pub use crate::metrics::{ndcg_at_k, recall_precision_at_k, EmptyGroundTruth, Evaluation};

/// Evaluates predicted preference scores (a user x item matrix) against the ground truth: ranks
/// the top-k unseen items per user, marks the relevant ones and computes recall, precision and
/// NDCG at k.
pub fn evaluate_scores(
    scores: ArrayView2<f32>,
    seen: &[FnvHashSet<u32>],
    ground_truth: &[Vec<u32>],
    config: &EvaluationConfig,
) -> Result<Evaluation> {

    config.validate()?;

    let recommendations = ranking::top_k(scores, seen, config.k, config.num_threads)?;
    let relevance = ranking::relevance_matrix(&recommendations, ground_truth, config.k)?;

    let evaluation =
        metrics::evaluate(ground_truth, relevance.view(), config.k, config.empty_ground_truth)?;

    info!("recall@{k}: {:.4}, precision@{k}: {:.4}, ndcg@{k}: {:.4}",
        evaluation.recall, evaluation.precision, evaluation.ndcg, k = evaluation.k);

    Ok(evaluation)
}
