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

use ndarray::{concatenate, Array2, ArrayView2, Axis};

use crate::dataset::MovieDataset;
use crate::error::{Error, Result};
use crate::types::{AdjacencyMatrix, InteractionMatrix};

/// In a bipartite graph, the interaction matrix R is not an adjacency matrix, as its row and
/// column indices refer to different kinds of nodes. Graph neural networks expect both indices to
/// address the same node set, so we place users first and items second:
///
/// ```text
///     ( 0    R )
/// A = ( R^T  0 )
/// ```
///
/// For R of shape n_user x n_item, A has shape (n_user + n_item) x (n_user + n_item).
pub fn interaction_to_adjacency(interactions: ArrayView2<f32>) -> Result<AdjacencyMatrix> {

    let (num_users, num_items) = interactions.dim();

    let upper_left = Array2::<f32>::zeros((num_users, num_users));
    let upper = concatenate(Axis(1), &[upper_left.view(), interactions.view()])?;

    let lower_right = Array2::<f32>::zeros((num_items, num_items));
    let lower = concatenate(Axis(1), &[interactions.t(), lower_right.view()])?;

    let adjacency = concatenate(Axis(0), &[upper.view(), lower.view()])?;

    debug!("Built {}x{} adjacency matrix from {}x{} interactions",
        adjacency.nrows(), adjacency.ncols(), num_users, num_items);

    Ok(adjacency)
}

/// Builds the binary interaction matrix from rated movies, every rating of at least `min_rating`
/// becomes an edge between the user and the movie.
pub fn interaction_matrix(
    ratings: &MovieDataset,
    num_users: usize,
    num_movies: usize,
    min_rating: f32,
) -> Result<InteractionMatrix> {

    let mut interactions = Array2::<f32>::zeros((num_users, num_movies));

    for rating in ratings.iter() {
        let user_idx = rating.user as usize;
        let movie_idx = rating.movie as usize;

        if user_idx >= num_users {
            return Err(Error::OutOfRange { index: user_idx, len: num_users });
        }
        if movie_idx >= num_movies {
            return Err(Error::OutOfRange { index: movie_idx, len: num_movies });
        }

        if rating.rating >= min_rating {
            interactions[[user_idx, movie_idx]] = 1.0;
        }
    }

    Ok(interactions)
}

/// Non-zero (user, item) pairs of the interaction matrix in row-major order
pub fn edge_index(interactions: ArrayView2<f32>) -> Vec<(u32, u32)> {
    interactions.indexed_iter()
        .filter(|(_, value)| **value != 0.0)
        .map(|((user, item), _)| (user as u32, item as u32))
        .collect()
}
