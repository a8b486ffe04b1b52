//! Seek plans and execution parameters.
//!
//! A [`SeekPlan`] is an *ordered* sequence of (offset, expected color) steps.
//! The order is insertion order, never sorted by offset: plans deliberately
//! contain non-monotonic jumps (e.g. 2000 -> 10000 -> 6000) to exercise
//! backward seeks, and reordering them would silently drop that coverage.

use crate::color::Color;
use crate::result::{BuscarError, BuscarResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One planned seek: jump to `offset_ms`, expect `expected` on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekStep {
    /// Target play position in milliseconds
    pub offset_ms: u64,
    /// Color the rendered frame must show once playback resumes
    pub expected: Color,
}

/// An ordered sequence of seek steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekPlan {
    steps: Vec<SeekStep>,
}

impl SeekPlan {
    /// Create an empty plan
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Build a plan from (offset, color) pairs, preserving their order
    #[must_use]
    pub fn from_pairs(pairs: &[(u64, Color)]) -> Self {
        Self {
            steps: pairs
                .iter()
                .map(|&(offset_ms, expected)| SeekStep {
                    offset_ms,
                    expected,
                })
                .collect(),
        }
    }

    /// Append a step at the end of the plan
    pub fn push(&mut self, offset_ms: u64, expected: Color) {
        self.steps.push(SeekStep {
            offset_ms,
            expected,
        });
    }

    /// Append a step, builder-style
    #[must_use]
    pub fn with_step(mut self, offset_ms: u64, expected: Color) -> Self {
        self.push(offset_ms, expected);
        self
    }

    /// The steps, in declared order
    #[must_use]
    pub fn steps(&self) -> &[SeekStep] {
        &self.steps
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Reject unusable plans.
    ///
    /// # Errors
    ///
    /// Returns [`BuscarError::EmptyPlan`] if the plan has no steps.
    pub fn validate(&self) -> BuscarResult<()> {
        if self.steps.is_empty() {
            return Err(BuscarError::EmptyPlan);
        }
        Ok(())
    }
}

/// How many full passes over the plan a scenario performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCount(u32);

impl RoundCount {
    /// Create a round count.
    ///
    /// # Errors
    ///
    /// Returns [`BuscarError::InvalidRoundCount`] for zero.
    pub fn new(value: u32) -> BuscarResult<Self> {
        if value == 0 {
            return Err(BuscarError::InvalidRoundCount { value });
        }
        Ok(Self(value))
    }

    /// The count as a plain integer
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Fixed settle delay between a completed seek and a trusted sample.
///
/// Models renderer stabilization latency; the orchestrator sleeps for this
/// long after the playing-resumed signal, before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseDuration(Duration);

impl PauseDuration {
    /// Settle delay in whole seconds
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Settle delay in milliseconds
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    /// The delay as a [`Duration`]
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_preserves_declared_order() {
        // The canonical non-monotonic plan: 10000 is visited before 6000.
        let plan = SeekPlan::from_pairs(&[
            (2000, Color::RED),
            (10_000, Color::BLUE),
            (6000, Color::GREEN),
        ]);
        let offsets: Vec<u64> = plan.steps().iter().map(|s| s.offset_ms).collect();
        assert_eq!(offsets, vec![2000, 10_000, 6000]);
    }

    #[test]
    fn test_plan_builder_order() {
        let plan = SeekPlan::new()
            .with_step(10_000, Color::BLUE)
            .with_step(2000, Color::RED);
        assert_eq!(plan.steps()[0].offset_ms, 10_000);
        assert_eq!(plan.steps()[1].offset_ms, 2000);
    }

    #[test]
    fn test_empty_plan_rejected() {
        let plan = SeekPlan::new();
        assert!(matches!(plan.validate(), Err(BuscarError::EmptyPlan)));
    }

    #[test]
    fn test_non_empty_plan_valid() {
        let plan = SeekPlan::from_pairs(&[(0, Color::BLACK)]);
        assert!(plan.validate().is_ok());
        assert_eq!(plan.len(), 1);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_plan_serde_keeps_order() {
        let plan = SeekPlan::from_pairs(&[
            (2000, Color::RED),
            (10_000, Color::BLUE),
            (6000, Color::GREEN),
        ]);
        let json = serde_json::to_string(&plan).unwrap();
        let back: SeekPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_round_count_zero_rejected() {
        assert!(matches!(
            RoundCount::new(0),
            Err(BuscarError::InvalidRoundCount { value: 0 })
        ));
    }

    #[test]
    fn test_round_count_positive() {
        assert_eq!(RoundCount::new(3).unwrap().get(), 3);
    }

    #[test]
    fn test_pause_duration_conversions() {
        assert_eq!(
            PauseDuration::from_secs(3).as_duration(),
            Duration::from_secs(3)
        );
        assert_eq!(
            PauseDuration::from_millis(250).as_duration(),
            Duration::from_millis(250)
        );
    }
}
