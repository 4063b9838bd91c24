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

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use fnv::FnvHashSet;
use ndarray::{Array2, ArrayView1, ArrayView2};
use scoped_pool::Pool;

use crate::error::{Error, Result};
use crate::types::RelevanceMatrix;

/// Result type used to find the top-k items per user via a binary heap
#[derive(PartialEq, Debug)]
pub struct ScoredItem {
    pub item: u32,
    pub score: f32,
}

/// Ordering for our max-heap, note that we must use a special implementation here as there is no
/// total order on floating point numbers. The heap keeps the worst of the current top-k on top.
fn cmp_reverse(scored_item_a: &ScoredItem, scored_item_b: &ScoredItem) -> Ordering {
    match scored_item_a.score.partial_cmp(&scored_item_b.score) {
        Some(Ordering::Less) => Ordering::Greater,
        Some(Ordering::Greater) => Ordering::Less,
        Some(Ordering::Equal) => Ordering::Equal,
        None => Ordering::Equal
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_reverse(self, other)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_reverse(self, other))
    }
}

fn top_k_for_user(
    scores: ArrayView1<f32>,
    seen: Option<&FnvHashSet<u32>>,
    k: usize,
) -> Vec<u32> {

    let mut heap = BinaryHeap::with_capacity(k);

    for (item_idx, score) in scores.iter().enumerate() {
        let item = item_idx as u32;

        // NaN has no place in the ordering of the heap
        if score.is_nan() || seen.map_or(false, |items| items.contains(&item)) {
            continue;
        }

        let scored_item = ScoredItem { item, score: *score };

        if heap.len() < k {
            heap.push(scored_item);
        } else if let Some(mut top) = heap.peek_mut() {
            if scored_item < *top {
                *top = scored_item;
            }
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|scored_item| scored_item.item)
        .collect()
}

/// Computes the `k` highest scoring items per user, best first. `scores` is a user x item matrix
/// of predicted preferences, `seen` optionally holds the items per user which must not be
/// recommended (typically the training interactions). Users are ranked in parallel on
/// `num_threads` threads. Items with a NaN score are never recommended.
pub fn top_k(
    scores: ArrayView2<f32>,
    seen: &[FnvHashSet<u32>],
    k: usize,
    num_threads: usize,
) -> Result<Vec<Vec<u32>>> {

    let num_users = scores.nrows();

    if !seen.is_empty() && seen.len() != num_users {
        return Err(Error::LengthMismatch { expected: num_users, actual: seen.len() });
    }

    let ranking_start = Instant::now();

    let recommendations: Vec<Mutex<Vec<u32>>> =
        (0..num_users).map(|_| Mutex::new(Vec::new())).collect();

    let pool = Pool::new(num_threads.max(1));

    pool.scoped(|scope| {
        for (user_idx, slot) in recommendations.iter().enumerate() {

            let user_scores = scores.row(user_idx);
            let user_seen = seen.get(user_idx);

            scope.execute(move || {
                let items = top_k_for_user(user_scores, user_seen, k);
                *slot.lock().unwrap_or_else(PoisonError::into_inner) = items;
            });
        }
    });

    pool.shutdown();

    debug!("Ranked {} items for {} users in {}ms",
        scores.ncols(), num_users, ranking_start.elapsed().as_millis());

    Ok(recommendations.into_iter()
        .map(|slot| slot.into_inner().unwrap_or_else(PoisonError::into_inner))
        .collect())
}

/// Marks which of the first `k` recommended items per user are part of the user's ground truth.
/// Users with less than `k` recommendations get zeros for the missing ranks. An item recommended
/// more than once only counts as relevant at its first rank.
pub fn relevance_matrix(
    recommendations: &[Vec<u32>],
    ground_truth: &[Vec<u32>],
    k: usize,
) -> Result<RelevanceMatrix> {

    if recommendations.len() != ground_truth.len() {
        return Err(Error::LengthMismatch {
            expected: ground_truth.len(),
            actual: recommendations.len(),
        });
    }

    let mut relevance = Array2::<f32>::zeros((recommendations.len(), k));

    for (user_idx, (recommended, relevant)) in
        recommendations.iter().zip(ground_truth.iter()).enumerate() {

        let mut relevant: FnvHashSet<u32> = relevant.iter().cloned().collect();

        for (rank, item) in recommended.iter().take(k).enumerate() {
            if relevant.remove(item) {
                relevance[[user_idx, rank]] = 1.0;
            }
        }
    }

    Ok(relevance)
}


#[cfg(test)]
mod tests {

    use std::collections::BinaryHeap;

    use fnv::FnvHashSet;
    use ndarray::{array, Array2};

    use super::{relevance_matrix, top_k, ScoredItem};
    use crate::error::Error;
    use crate::metrics::{evaluate, EmptyGroundTruth};

    #[test]
    fn scored_item_ordering_reversed() {
        let item_a = ScoredItem { item: 1, score: 0.5 };
        let item_b = ScoredItem { item: 2, score: 1.5 };
        let item_c = ScoredItem { item: 3, score: 0.3 };

        assert!(item_a > item_b);
        assert!(item_a < item_c);
        assert!(item_b < item_c);
    }

    #[test]
    fn heap_keeps_best() {

        const K: usize = 3;

        let items = [
            ScoredItem { item: 1, score: 0.5 },
            ScoredItem { item: 2, score: 1.5 },
            ScoredItem { item: 3, score: 0.3 },
            ScoredItem { item: 4, score: 3.5 },
            ScoredItem { item: 5, score: 2.5 },
        ];

        let mut heap = BinaryHeap::with_capacity(K);

        for scored_item in &items {
            if heap.len() < K {
                heap.push(scored_item);
            } else {
                let mut top = heap.peek_mut().unwrap();
                if scored_item < *top {
                    *top = scored_item;
                }
            }
        }

        let top_k: Vec<u32> = heap.into_sorted_vec().iter().map(|s| s.item).collect();

        assert_eq!(top_k, vec![4, 5, 2]);
    }

    #[test]
    fn top_k_excludes_seen_items() {
        let scores = array![
            [0.1, 0.9, 0.5, 0.7],
            [0.8, 0.2, 0.6, 0.4],
        ];

        let mut seen = vec![FnvHashSet::default(), FnvHashSet::default()];
        seen[0].insert(1);
        seen[1].insert(2);

        let recommendations = top_k(scores.view(), &seen, 2, 2).unwrap();

        assert_eq!(recommendations, vec![vec![3, 2], vec![0, 3]]);
    }

    #[test]
    fn top_k_without_history() {
        let scores = array![[0.3, 0.1, 0.2]];

        let recommendations = top_k(scores.view(), &[], 5, 1).unwrap();
        assert_eq!(recommendations, vec![vec![0, 2, 1]]);

        let seen = vec![FnvHashSet::default(); 3];
        let result = top_k(scores.view(), &seen, 5, 1);
        assert!(matches!(result, Err(Error::LengthMismatch { expected: 1, actual: 3 })));
    }

    #[test]
    fn relevance_of_recommendations() {
        let recommendations = vec![vec![3, 1, 2], vec![5]];
        let ground_truth = vec![vec![1, 2, 3], vec![4, 5]];

        let r = relevance_matrix(&recommendations, &ground_truth, 2).unwrap();

        let expected: Array2<f32> = array![[1.0, 1.0], [1.0, 0.0]];
        assert_eq!(r, expected);
    }

    #[test]
    fn top_k_skips_nan_scores() {
        let scores = array![[f32::NAN, 0.1, 0.9, 0.5, f32::NAN, 0.8]];

        let recommendations = top_k(scores.view(), &[], 2, 1).unwrap();
        assert_eq!(recommendations, vec![vec![2, 5]]);

        let recommendations = top_k(scores.view(), &[], 6, 1).unwrap();
        assert_eq!(recommendations, vec![vec![2, 5, 3, 1]]);
    }

    #[test]
    fn repeated_recommendations_count_once() {
        let recommendations = vec![vec![1, 1], vec![2, 3, 2]];
        let ground_truth = vec![vec![1], vec![2, 3]];

        let r = relevance_matrix(&recommendations, &ground_truth, 3).unwrap();
        let expected: Array2<f32> = array![[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        assert_eq!(r, expected);

        let r = relevance_matrix(&recommendations, &ground_truth, 2).unwrap();
        let expected: Array2<f32> = array![[1.0, 0.0], [1.0, 1.0]];
        assert_eq!(r, expected);

        let evaluation = evaluate(&ground_truth, r.view(), 2, EmptyGroundTruth::Fail).unwrap();
        assert!(evaluation.recall <= 1.0);
        assert_eq!(evaluation.recall, 1.0);
        assert_eq!(evaluation.precision, 0.75);
    }
}
