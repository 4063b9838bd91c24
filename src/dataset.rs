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

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::types::{self, GroundTruth, SparseBinaryMatrix};

/// A single observed rating of a movie by a user
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rating {
    pub user: u32,
    pub movie: u32,
    pub rating: f32,
}

/// Several ratings in columnar form, as fed to a model
#[derive(Clone, Debug, PartialEq)]
pub struct RatingBatch {
    pub users: Array1<u32>,
    pub movies: Array1<u32>,
    pub ratings: Array1<f32>,
}

/// User, movie and rating triples stored as three parallel columns.
#[derive(Clone, Debug, Default)]
pub struct MovieDataset {
    users: Vec<u32>,
    movies: Vec<u32>,
    ratings: Vec<f32>,
}

impl MovieDataset {

    pub fn new(users: Vec<u32>, movies: Vec<u32>, ratings: Vec<f32>) -> Result<Self> {
        if movies.len() != users.len() {
            return Err(Error::LengthMismatch { expected: users.len(), actual: movies.len() });
        }
        if ratings.len() != users.len() {
            return Err(Error::LengthMismatch { expected: users.len(), actual: ratings.len() });
        }

        Ok(MovieDataset { users, movies, ratings })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<Rating> {
        if index >= self.len() {
            return Err(Error::OutOfRange { index, len: self.len() });
        }

        Ok(Rating {
            user: self.users[index],
            movie: self.movies[index],
            rating: self.ratings[index],
        })
    }

    /// Gathers the ratings at the given positions into a batch, failing on the first invalid one.
    pub fn batch(&self, indices: &[usize]) -> Result<RatingBatch> {
        let mut users = Vec::with_capacity(indices.len());
        let mut movies = Vec::with_capacity(indices.len());
        let mut ratings = Vec::with_capacity(indices.len());

        for index in indices {
            let rating = self.get(*index)?;
            users.push(rating.user);
            movies.push(rating.movie);
            ratings.push(rating.rating);
        }

        Ok(RatingBatch {
            users: Array1::from(users),
            movies: Array1::from(movies),
            ratings: Array1::from(ratings),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item=Rating> + '_ {
        self.users.iter()
            .zip(self.movies.iter())
            .zip(self.ratings.iter())
            .map(|((user, movie), rating)| Rating { user: *user, movie: *movie, rating: *rating })
    }

    pub fn push(&mut self, rating: Rating) {
        self.users.push(rating.user);
        self.movies.push(rating.movie);
        self.ratings.push(rating.rating);
    }

    /// One more than the largest user index
    pub fn num_users(&self) -> usize {
        self.users.iter().max().map_or(0, |max| *max as usize + 1)
    }

    /// One more than the largest movie index
    pub fn num_movies(&self) -> usize {
        self.movies.iter().max().map_or(0, |max| *max as usize + 1)
    }

    /// Randomly partitions the ratings into a training and a test set. The test set receives
    /// `test_fraction` of the ratings (rounded), the shuffle is reproducible for a given `seed`.
    pub fn split(&self, test_fraction: f64, seed: u64) -> Result<(MovieDataset, MovieDataset)> {
        if !(0.0..=1.0).contains(&test_fraction) {
            return Err(Error::InvalidArgument(
                format!("test fraction must be within [0, 1], got {}", test_fraction)));
        }

        let mut indices: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let num_test = (self.len() as f64 * test_fraction).round() as usize;
        let (test_indices, train_indices) = indices.split_at(num_test);

        debug!("Split {} ratings into {} for training and {} for testing",
            self.len(), train_indices.len(), test_indices.len());

        Ok((self.select(train_indices), self.select(test_indices)))
    }

    fn select(&self, indices: &[usize]) -> MovieDataset {
        MovieDataset {
            users: indices.iter().map(|index| self.users[*index]).collect(),
            movies: indices.iter().map(|index| self.movies[*index]).collect(),
            ratings: indices.iter().map(|index| self.ratings[*index]).collect(),
        }
    }

    /// Movies rated with at least `min_rating` per user, in order of appearance. These serve as
    /// ground truth when the dataset holds held-out ratings.
    pub fn liked_movies(&self, num_users: usize, min_rating: f32) -> Result<GroundTruth> {
        let mut liked = vec![Vec::new(); num_users];

        for rating in self.iter().filter(|rating| rating.rating >= min_rating) {
            let user_idx = rating.user as usize;
            let movies = liked.get_mut(user_idx)
                .ok_or(Error::OutOfRange { index: user_idx, len: num_users })?;

            if !movies.contains(&rating.movie) {
                movies.push(rating.movie);
            }
        }

        Ok(liked)
    }

    /// All rated movies per user, regardless of the rating
    pub fn rated_movies(&self, num_users: usize) -> Result<SparseBinaryMatrix> {
        let mut rated = types::new_sparse_binary_matrix(num_users);

        for rating in self.iter() {
            let user_idx = rating.user as usize;
            rated.get_mut(user_idx)
                .ok_or(Error::OutOfRange { index: user_idx, len: num_users })?
                .insert(rating.movie);
        }

        Ok(rated)
    }
}
