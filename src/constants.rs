//! Constants used throughout the application

/// Number of body landmarks produced by the pose model
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;

/// Savitzky-Golay smoothing window (must be odd)
pub const DEFAULT_WINDOW_LENGTH: usize = 31;

/// Savitzky-Golay polynomial order
pub const DEFAULT_POLY_ORDER: usize = 2;

/// Minimum landmark visibility for a frame to count as "landmarks found"
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Risk score band boundaries
pub const RISK_BAND_MODERATE: f64 = 33.33;
pub const RISK_BAND_HIGH: f64 = 66.66;
pub const RISK_BAND_SPAN: f64 = 33.34;

/// Z-score band boundaries for the reference-distribution classifier
pub const ZSCORE_EXCELLENT: f64 = 0.5;
pub const ZSCORE_GOOD_LOWER: f64 = -0.5;
pub const ZSCORE_MODERATE_LOWER: f64 = -1.5;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
