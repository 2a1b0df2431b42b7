use std::collections::BTreeMap;

use crate::models::{GameId, Rating, UNRATED};

/// Cosine similarity between two sparse rating vectors
///
/// Missing keys count as `UNRATED` (0). When either vector has zero
/// magnitude the similarity is undefined and 0.0 is returned.
pub fn cosine_similarity(a: &BTreeMap<GameId, Rating>, b: &BTreeMap<GameId, Rating>) -> f64 {
    let dot: f64 = a
        .iter()
        .map(|(game_id, &rating)| {
            let other = b.get(game_id).copied().unwrap_or(UNRATED);
            f64::from(rating) * f64::from(other)
        })
        .sum();

    // sqrt(|a|² |b|²) keeps identical vectors at exactly 1.0
    let denominator = (squared_magnitude(a) * squared_magnitude(b)).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    let similarity = dot / denominator;
    if similarity.is_finite() {
        similarity.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn squared_magnitude(ratings: &BTreeMap<GameId, Rating>) -> f64 {
    ratings
        .values()
        .map(|&rating| f64::from(rating) * f64::from(rating))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(pairs: &[(GameId, Rating)]) -> BTreeMap<GameId, Rating> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_identical_vectors() {
        let a = ratings(&[(1, 5), (2, 5), (3, 1)]);
        assert_eq!(cosine_similarity(&a, &a.clone()), 1.0);
    }

    #[test]
    fn test_all_zero_vector_is_zero() {
        let a = ratings(&[(1, 0), (2, 0)]);
        assert_eq!(cosine_similarity(&a, &a), 0.0);
        assert_eq!(cosine_similarity(&BTreeMap::new(), &ratings(&[(1, 3)])), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = ratings(&[(1, 5), (2, 3), (4, 1)]);
        let b = ratings(&[(1, 2), (3, 4), (4, 5)]);
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_disjoint_vectors() {
        let a = ratings(&[(1, 5)]);
        let b = ratings(&[(2, 5)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // dot = 25, |a| = 5, |b| = sqrt(50)
        let a = ratings(&[(1, 0), (2, 5)]);
        let b = ratings(&[(1, 5), (2, 5)]);
        let expected = 25.0 / 50.0_f64.sqrt() / 5.0;
        assert!((cosine_similarity(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_range_for_nonnegative_ratings() {
        let vectors = [
            ratings(&[(1, 1), (2, 5)]),
            ratings(&[(1, 5), (2, 1), (3, 3)]),
            ratings(&[(3, 2)]),
            ratings(&[(1, 4), (2, 4), (3, 4)]),
        ];
        for a in &vectors {
            for b in &vectors {
                let similarity = cosine_similarity(a, b);
                assert!((0.0..=1.0).contains(&similarity));
            }
        }
    }
}
