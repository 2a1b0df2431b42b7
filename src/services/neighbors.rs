use crate::models::UserId;

/// Another user and their similarity to the target user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user_id: UserId,
    pub similarity: f64,
}

impl Neighbor {
    pub fn new(user_id: UserId, similarity: f64) -> Self {
        Self {
            user_id,
            similarity,
        }
    }
}

/// Keeps the `k` most similar users, most similar first
///
/// Ties keep their input order. Fewer than `k` candidates is not an error;
/// every candidate is returned.
pub fn select_neighbors(mut candidates: Vec<Neighbor>, k: usize) -> Vec<Neighbor> {
    candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    candidates.truncate(k);
    candidates
}
