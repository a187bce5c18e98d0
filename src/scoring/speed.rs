// Speed score: faster responses score higher, linearly against the slowest one.

/// Score reported when there is no usable maximum response time.
pub const NEUTRAL_SPEED: u32 = 50;

/// `100 - t / max_t * 100`, rounded and clamped to [0, 100].
///
/// Returns `None` when `max_time_ms` is zero, negative or not finite; the
/// caller substitutes `NEUTRAL_SPEED`.
pub fn speed_score(time_ms: f64, max_time_ms: f64) -> Option<u32> {
    if !max_time_ms.is_finite() || max_time_ms <= 0.0 || !time_ms.is_finite() {
        return None;
    }
    let score = 100.0 - (time_ms / max_time_ms) * 100.0;
    Some(score.clamp(0.0, 100.0).round() as u32)
}
