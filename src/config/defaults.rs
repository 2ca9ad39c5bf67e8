//! Default values for the scoring model.

/// Size of each additive quality penalty, in levels.
pub const DEFAULT_PENALTY_STEP: f64 = 0.5;

/// Factors with fewer responses than this are penalized.
pub const DEFAULT_MIN_RESPONSES: usize = 3;

/// Factors whose interquartile range exceeds this are penalized.
pub const DEFAULT_MAX_DISPERSION: f64 = 1.5;

/// Evidence-required factors below this evidence rate are penalized.
pub const DEFAULT_MIN_EVIDENCE_RATE: f64 = 0.5;

/// Confidence assumed when no response reports one.
pub const DEFAULT_CONFIDENCE: f64 = 3.5;

/// Responses needed for the response term of the gap quality factor to reach 1.
pub const DEFAULT_FULL_CONFIDENCE_RESPONSES: f64 = 5.0;

/// IQR at which the agreement term of the gap quality factor reaches 0.
pub const DEFAULT_DISPERSION_SCALE: f64 = 2.0;

/// Agreement term used when dispersion is undefined.
pub const DEFAULT_UNDEFINED_DISPERSION_FACTOR: f64 = 0.5;

/// Flat quality factor for gaps on factors nobody rated.
pub const DEFAULT_UNSAMPLED_QUALITY_FACTOR: f64 = 0.1;

/// Dimension value at which proficiency or coverage counts as high.
pub const DEFAULT_QUADRANT_THRESHOLD: f64 = 3.0;

/// Factors carried into the per-factor trend table.
pub const DEFAULT_TREND_FACTOR_LIMIT: usize = 10;

/// Expected responses per factor when measuring assessment completion.
pub const EXPECTED_RESPONSES_PER_FACTOR: usize = 10;
