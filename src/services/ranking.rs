use crate::models::Recommendation;

/// Stable sort, highest score first
pub fn rank(mut recommendations: Vec<Recommendation<'_>>) -> Vec<Recommendation<'_>> {
    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommendations
}
