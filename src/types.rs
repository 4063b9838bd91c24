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

use fnv::FnvHashSet;
use ndarray::Array2;

/// User x item matrix of observed interactions
pub type InteractionMatrix = Array2<f32>;

/// Square matrix over all users followed by all items
pub type AdjacencyMatrix = Array2<f32>;

/// Binary user x rank matrix, 1.0 where the recommended item is relevant
pub type RelevanceMatrix = Array2<f32>;

/// Relevant items per user
pub type GroundTruth = Vec<Vec<u32>>;

/// Item sets per user, e.g. the training history which must not be recommended again
pub type SparseBinaryMatrix = Vec<FnvHashSet<u32>>;

pub fn new_sparse_binary_matrix(num_rows: usize) -> SparseBinaryMatrix {
    vec![FnvHashSet::with_capacity_and_hasher(0, Default::default()); num_rows]
}
