/// Cutoff the candidate locator scores every end read against.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 1.0;

/// Fixed divisor applied to `overlap * depth` when scoring a junction.
pub const SCORE_NORMALIZER: f64 = 50.0;
