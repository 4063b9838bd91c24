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

use ndarray::{s, Array1, ArrayView2, Axis};

use crate::error::{Error, Result};

/// What to do with users whose ground truth is empty, recall is undefined for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyGroundTruth {
    /// Abort with `Error::EmptyGroundTruth`
    Fail,
    /// The user contributes a recall of zero
    CountAsZero,
}

impl Default for EmptyGroundTruth {
    fn default() -> Self {
        EmptyGroundTruth::Fail
    }
}

/// Ranking quality at a cutoff k, averaged over users. Field names will be used in JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub k: usize,
    pub recall: f64,
    pub precision: f64,
    pub ndcg: f64,
}

fn check_inputs(ground_truth: &[Vec<u32>], relevance: &ArrayView2<f32>, k: usize) -> Result<()> {
    if relevance.nrows() != ground_truth.len() {
        return Err(Error::LengthMismatch {
            expected: ground_truth.len(),
            actual: relevance.nrows(),
        });
    }

    if k == 0 || k > relevance.ncols() {
        return Err(Error::InvalidK { k, columns: relevance.ncols() });
    }

    Ok(())
}

/// Computes recall@k and precision@k.
///
/// `ground_truth` holds the relevant items per user, `relevance` indicates per user whether each of
/// the top-k recommended items is relevant. Only the first `k` columns of `relevance` are read.
///
/// Returns the tuple (recall@k, precision@k).
pub fn recall_precision_at_k(
    ground_truth: &[Vec<u32>],
    relevance: ArrayView2<f32>,
    k: usize,
    on_empty: EmptyGroundTruth,
) -> Result<(f64, f64)> {

    check_inputs(ground_truth, &relevance, k)?;

    let num_users = ground_truth.len();
    if num_users == 0 {
        return Ok((0.0, 0.0));
    }

    // number of correctly predicted items per user
    let num_correct = relevance.slice(s![.., ..k]).sum_axis(Axis(1));

    let mut recall_sum = 0.0;
    let mut num_correct_sum = 0.0;

    for (user, (liked, correct)) in ground_truth.iter().zip(num_correct.iter()).enumerate() {
        let correct = f64::from(*correct);
        num_correct_sum += correct;

        if liked.is_empty() {
            match on_empty {
                EmptyGroundTruth::Fail => return Err(Error::EmptyGroundTruth { user }),
                EmptyGroundTruth::CountAsZero => {},
            }
        } else {
            recall_sum += correct / liked.len() as f64;
        }
    }

    let recall = recall_sum / num_users as f64;
    let precision = num_correct_sum / num_users as f64 / k as f64;

    Ok((recall, precision))
}

/// Logarithmic position discounts 1 / log2(j + 2) for j in [0, k)
fn discounts(k: usize) -> Array1<f64> {
    Array1::from_iter((0..k).map(|position| 1.0 / ((position + 2) as f64).log2()))
}

/// Computes the Normalized Discounted Cumulative Gain at k, averaged over users.
///
/// The ideal ranking of a user places min(|ground truth|, k) relevant items at the top. Users
/// without an ideal gain are normalized by one, so they end up with an NDCG of zero.
pub fn ndcg_at_k(ground_truth: &[Vec<u32>], relevance: ArrayView2<f32>, k: usize) -> Result<f64> {

    check_inputs(ground_truth, &relevance, k)?;

    if ground_truth.is_empty() {
        return Ok(0.0);
    }

    let discounts = discounts(k);

    let dcg = relevance.slice(s![.., ..k]).mapv(f64::from).dot(&discounts);

    let ndcg_sum: f64 = ground_truth.iter()
        .zip(dcg.iter())
        .map(|(items, dcg)| {
            let ideal_length = items.len().min(k);
            let mut idcg = discounts.slice(s![..ideal_length]).sum();

            if idcg == 0.0 {
                idcg = 1.0;
            }

            let ndcg = dcg / idcg;
            if ndcg.is_nan() { 0.0 } else { ndcg }
        })
        .sum();

    Ok(ndcg_sum / ground_truth.len() as f64)
}

/// Recall, precision and NDCG at k in one go
pub fn evaluate(
    ground_truth: &[Vec<u32>],
    relevance: ArrayView2<f32>,
    k: usize,
    on_empty: EmptyGroundTruth,
) -> Result<Evaluation> {

    let (recall, precision) = recall_precision_at_k(ground_truth, relevance, k, on_empty)?;
    let ndcg = ndcg_at_k(ground_truth, relevance, k)?;

    Ok(Evaluation { k, recall, precision, ndcg })
}
