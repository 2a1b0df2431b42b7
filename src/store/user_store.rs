use std::collections::HashMap;

use crate::models::{User, UserId};

/// Immutable snapshot of every loaded user and their ratings
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Vec<User>,
    index: HashMap<UserId, usize>,
}

impl UserStore {
    /// Builds a store, skipping records that would make lookups ambiguous
    /// or scoring undefined
    pub fn new(users: Vec<User>) -> Self {
        let mut store = Self {
            users: Vec::with_capacity(users.len()),
            index: HashMap::with_capacity(users.len()),
        };

        for mut user in users {
            if store.index.contains_key(&user.id) {
                tracing::warn!(user_id = user.id, "Skipping duplicate user record");
                continue;
            }

            let invalid = user.invalid_ratings();
            if !invalid.is_empty() {
                tracing::warn!(
                    user_id = user.id,
                    games = ?invalid,
                    "Dropping out-of-range ratings"
                );
                for game_id in invalid {
                    user.ratings.remove(&game_id);
                }
            }

            store.index.insert(user.id, store.users.len());
            store.users.push(user);
        }

        store
    }

    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.index.get(&id).map(|&position| &self.users[position])
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_lookup_by_id() {
        let store = UserStore::new(vec![
            User::new(10, BTreeMap::from([(0, 5)])),
            User::new(20, BTreeMap::new()),
        ]);
        assert_eq!(store.user_by_id(10).unwrap().rating(0), 5);
        assert!(store.user_by_id(30).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_user_keeps_first() {
        let store = UserStore::new(vec![
            User::new(1, BTreeMap::from([(0, 5)])),
            User::new(1, BTreeMap::from([(0, 1)])),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.user_by_id(1).unwrap().rating(0), 5);
    }

    #[test]
    fn test_out_of_range_ratings_dropped() {
        let store = UserStore::new(vec![User::new(1, BTreeMap::from([(0, 9), (1, 4)]))]);
        let user = store.user_by_id(1).unwrap();
        assert_eq!(user.rating(0), 0);
        assert_eq!(user.rating(1), 4);
    }
}
