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

use fnv::FnvHashMap;

use crate::error::{Error, Result};

/// Maps the external string identifiers of users and items to consecutive integer ids, which we
/// use as row and column indices of matrices.
#[derive(Debug, Default)]
pub struct DataDictionary {
    user_dict: FnvHashMap<String, u32>,
    item_dict: FnvHashMap<String, u32>,
    num_interactions: u64,
}

impl DataDictionary {

    pub fn num_users(&self) -> usize {
        self.user_dict.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_dict.len()
    }

    pub fn num_interactions(&self) -> u64 {
        self.num_interactions
    }

    pub fn user_index(&self, name: &str) -> Result<u32> {
        self.user_dict.get(name).cloned()
            .ok_or_else(|| Error::UnknownId(format!("user '{}'", name)))
    }

    pub fn item_index(&self, name: &str) -> Result<u32> {
        self.item_dict.get(name).cloned()
            .ok_or_else(|| Error::UnknownId(format!("item '{}'", name)))
    }

    /// Registers an observed interaction, assigning fresh ids to unseen users and items.
    pub fn observe(&mut self, user: &str, item: &str) -> (u32, u32) {
        let user_index = Self::index_of(&mut self.user_dict, user);
        let item_index = Self::index_of(&mut self.item_dict, item);
        self.num_interactions += 1;

        (user_index, item_index)
    }

    fn index_of(dict: &mut FnvHashMap<String, u32>, name: &str) -> u32 {
        if let Some(index) = dict.get(name) {
            return *index;
        }

        let index = dict.len() as u32;
        dict.insert(name.to_owned(), index);
        index
    }
}

impl<S, T> std::iter::FromIterator<(S, T)> for DataDictionary
    where S: AsRef<str>, T: AsRef<str> {

    fn from_iter<I: IntoIterator<Item=(S, T)>>(interactions: I) -> Self {
        let mut data_dict = DataDictionary::default();

        for (user, item) in interactions {
            data_dict.observe(user.as_ref(), item.as_ref());
        }

        data_dict
    }
}


#[cfg(test)]
mod tests {

    use super::DataDictionary;
    use crate::error::Error;

    #[test]
    fn consecutive_ids() {
        let data_dict: DataDictionary = vec![
            ("alice", "toy story"),
            ("alice", "heat"),
            ("bob", "heat"),
            ("charles", "jumanji"),
        ].into_iter().collect();

        assert_eq!(data_dict.num_users(), 3);
        assert_eq!(data_dict.num_items(), 3);
        assert_eq!(data_dict.num_interactions(), 4);

        assert_eq!(data_dict.user_index("alice").unwrap(), 0);
        assert_eq!(data_dict.user_index("charles").unwrap(), 2);
        assert_eq!(data_dict.item_index("heat").unwrap(), 1);
        assert!(matches!(data_dict.item_index("alien"), Err(Error::UnknownId(_))));
    }

    #[test]
    fn repeated_observations_keep_their_ids() {
        let mut data_dict = DataDictionary::default();
        let (user, item) = data_dict.observe("dora", "fargo");

        assert_eq!(data_dict.observe("dora", "fargo"), (user, item));
        assert_eq!(data_dict.num_users(), 1);
        assert_eq!(data_dict.num_items(), 1);
        assert_eq!(data_dict.num_interactions(), 2);
    }
}
