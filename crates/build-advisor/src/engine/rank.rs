use std::cmp::Ordering;

use super::types::ItemRecommendation;

/// Total order over recommendations: score descending, then cost ascending,
/// then item id ascending.
pub fn compare_recommendations(a: &ItemRecommendation, b: &ItemRecommendation) -> Ordering {
    compare_f64(b.final_score, a.final_score)
        .then_with(|| compare_f64(a.item.cost, b.item.cost))
        .then_with(|| a.item.item_id.cmp(&b.item.item_id))
}

pub fn rank(recommendations: &mut [ItemRecommendation]) {
    recommendations.sort_by(compare_recommendations);
}

// `==` decides equality so 0.0 and -0.0 tie; NaN falls back to total_cmp.
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}
