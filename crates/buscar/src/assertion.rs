//! Assertion engine: tolerance-based color comparison.
//!
//! Different container formats re-encode the same source, so a sampled color
//! is never bit-identical to the expected one. Comparisons use Euclidean
//! distance in RGB space against a configurable tolerance. Each comparison
//! is stateless; the orchestrator owns aggregation across rounds.

use crate::color::Color;
use serde::Serialize;

/// Default comparison tolerance.
///
/// Wide enough to absorb codec-induced variance across ogv/mkv/avi/webm/mov/
/// 3gp/mp4 re-encodes of the same source, while still separating saturated
/// reference colors (pure primaries sit ~360 apart).
pub const DEFAULT_COLOR_TOLERANCE: f64 = 60.0;

/// Compares sampled colors against expected colors with tolerance.
#[derive(Debug, Clone, Copy)]
pub struct ColorMatcher {
    tolerance: f64,
}

impl Default for ColorMatcher {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_COLOR_TOLERANCE,
        }
    }
}

impl ColorMatcher {
    /// Create a matcher with the default tolerance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance (Euclidean RGB distance)
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The configured tolerance
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether `actual` is within tolerance of `expected`
    #[must_use]
    pub fn matches(&self, expected: Color, actual: Color) -> bool {
        expected.distance(actual) <= self.tolerance
    }

    /// Full diagnostic for a comparison, for failure reporting
    #[must_use]
    pub fn explain(&self, expected: Color, actual: Color) -> ColorDiagnostic {
        let distance = expected.distance(actual);
        ColorDiagnostic {
            expected,
            actual,
            distance,
            channel_deltas: actual.channel_deltas(expected),
            tolerance: self.tolerance,
            within_tolerance: distance <= self.tolerance,
        }
    }
}

/// Explanation of a single color comparison.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColorDiagnostic {
    /// Expected color from the plan
    pub expected: Color,
    /// Sampled color
    pub actual: Color,
    /// Euclidean distance between the two
    pub distance: f64,
    /// Signed `actual - expected` deltas as `[r, g, b]`
    pub channel_deltas: [i16; 3],
    /// Tolerance the comparison ran against
    pub tolerance: f64,
    /// Verdict of the comparison
    pub within_tolerance: bool,
}

impl std::fmt::Display for ColorDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected {} sampled {} distance {:.1} (tolerance {:.1}, deltas r{:+} g{:+} b{:+}): {}",
            self.expected,
            self.actual,
            self.distance,
            self.tolerance,
            self.channel_deltas[0],
            self.channel_deltas[1],
            self.channel_deltas[2],
            if self.within_tolerance { "ok" } else { "mismatch" }
        )
    }
}
