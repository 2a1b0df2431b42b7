use crate::{
    config::RecommenderConfig,
    models::{Characteristic, Data, Game, Recommendation},
    services::ranking::rank,
    store::Catalog,
};

/// Characteristic overlap between a reference and a candidate game
///
/// Each facet is scored on its own: every equal (reference, candidate) pair
/// adds 1.0. A shared candidate entry that is also favorable adds `weight`
/// once more, so it contributes `1.0 + weight`. Favorable entries the
/// reference does not have score nothing.
pub fn overlap_score(
    reference: &Characteristic,
    candidate: &Characteristic,
    weight: f64,
    favorable: &Characteristic,
) -> f64 {
    reference
        .facets()
        .into_iter()
        .zip(candidate.facets())
        .zip(favorable.facets())
        .map(|((reference, candidate), favorable)| {
            facet_score(reference, candidate, weight, favorable)
        })
        .sum()
}

fn facet_score(reference: &[Data], candidate: &[Data], weight: f64, favorable: &[Data]) -> f64 {
    let mut score = 0.0;
    for other in candidate {
        let shared = reference.iter().filter(|common| *common == other).count();
        if shared == 0 {
            continue;
        }
        score += shared as f64;
        score += weight * favorable.iter().filter(|fav| *fav == other).count() as f64;
    }
    score
}

pub struct ContentRecommender<'a> {
    catalog: &'a Catalog,
    config: &'a RecommenderConfig,
}

impl<'a> ContentRecommender<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a RecommenderConfig) -> Self {
        Self { catalog, config }
    }

    /// Ranked games sharing enough characteristics with `reference`
    pub fn recommend(
        &self,
        reference: &Game,
        weight: f64,
        favorable: &Characteristic,
    ) -> Vec<Recommendation<'a>> {
        let threshold = self.config.min_shared_characteristics;

        let recommendations = self
            .catalog
            .all()
            .iter()
            .filter(|game| game.id != reference.id)
            .filter_map(|game| {
                let score = overlap_score(
                    &reference.characteristic,
                    &game.characteristic,
                    weight,
                    favorable,
                );
                (score >= threshold).then(|| Recommendation::new(game, score))
            })
            .collect();

        rank(recommendations)
    }
}
