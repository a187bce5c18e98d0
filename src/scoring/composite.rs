// Composite score — the final ranking criterion.
//
// A fixed linear blend: 45% relevance, 25% sovereignty, 20% similarity,
// 10% speed. The weights sum to 1.0, so inputs in [0, 100] always produce a
// result in [0, 100]; the clamp only guards out-of-range inputs.

pub const RELEVANCE_WEIGHT: f64 = 0.45;
pub const SOVEREIGNTY_WEIGHT: f64 = 0.25;
pub const SIMILARITY_WEIGHT: f64 = 0.20;
pub const SPEED_WEIGHT: f64 = 0.10;

/// Component scores feeding the blend. A missing component counts as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeInputs {
    pub relevance: Option<f64>,
    pub sovereignty: Option<f64>,
    pub similarity: Option<f64>,
    pub speed: Option<f64>,
}

/// `round(clamp(0.45 r + 0.25 so + 0.20 si + 0.10 sp, 0, 100))`.
pub fn composite_score(inputs: &CompositeInputs) -> u32 {
    let value = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);

    let blended = value(inputs.relevance) * RELEVANCE_WEIGHT
        + value(inputs.sovereignty) * SOVEREIGNTY_WEIGHT
        + value(inputs.similarity) * SIMILARITY_WEIGHT
        + value(inputs.speed) * SPEED_WEIGHT;

    blended.clamp(0.0, 100.0).round() as u32
}
