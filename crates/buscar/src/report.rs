//! Scenario and matrix result types.

use crate::color::Color;
use serde::Serialize;
use std::time::Duration;

/// Overall outcome of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScenarioVerdict {
    /// Every (round, offset) assertion succeeded
    Pass,
    /// The scenario was aborted by its first failure
    Fail,
}

impl ScenarioVerdict {
    /// Whether this is a pass
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for ScenarioVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// The first failure that aborted a scenario, with full context.
#[derive(Debug, Clone, Serialize)]
pub enum ScenarioFailure {
    /// Sampled color was outside tolerance at a (round, offset)
    ColorMismatch {
        /// Failing round (1-based)
        round: u32,
        /// Failing offset in milliseconds
        offset_ms: u64,
        /// Expected color from the plan
        expected: Color,
        /// Measured color
        actual: Color,
        /// Euclidean distance between the two
        distance: f64,
    },
    /// Playing-resumed signal not observed after a seek
    PlaybackStall {
        /// Round of the stalled seek (1-based)
        round: u32,
        /// Offset of the stalled seek in milliseconds
        offset_ms: u64,
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },
    /// The session rejected a seek
    SeekRejected {
        /// Round of the rejected seek (1-based)
        round: u32,
        /// Rejected offset in milliseconds
        offset_ms: u64,
        /// Reason from the session layer
        reason: String,
    },
    /// Session-established signal never arrived (HTTP-style transports)
    SessionNotReady {
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },
    /// The overall scenario deadline elapsed mid-run
    DeadlineExceeded {
        /// Round that was aborted (1-based)
        round: u32,
        /// Configured deadline in milliseconds
        deadline_ms: u64,
    },
    /// The source became unreachable over its transport
    Transport {
        /// Message from the transport layer
        message: String,
    },
}

impl std::fmt::Display for ScenarioFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColorMismatch {
                round,
                offset_ms,
                expected,
                actual,
                distance,
            } => write!(
                f,
                "color mismatch at {offset_ms}ms (round {round}): expected {expected}, sampled {actual}, distance {distance:.1}"
            ),
            Self::PlaybackStall {
                round,
                offset_ms,
                timeout_ms,
            } => write!(
                f,
                "playback stalled after seek to {offset_ms}ms (round {round}, waited {timeout_ms}ms)"
            ),
            Self::SeekRejected {
                round,
                offset_ms,
                reason,
            } => write!(f, "seek to {offset_ms}ms rejected (round {round}): {reason}"),
            Self::SessionNotReady { timeout_ms } => {
                write!(f, "session not established within {timeout_ms}ms")
            }
            Self::DeadlineExceeded { round, deadline_ms } => {
                write!(f, "scenario deadline of {deadline_ms}ms exceeded in round {round}")
            }
            Self::Transport { message } => write!(f, "transport failure: {message}"),
        }
    }
}

/// Result of running one scenario to completion or first failure.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Scenario label, e.g. `http/mp4/video-only`
    pub scenario: String,
    /// Overall outcome
    pub verdict: ScenarioVerdict,
    /// Rounds fully completed (a failing round does not count)
    pub rounds_completed: u32,
    /// Individual seek cycles that passed their assertion
    pub seeks_verified: usize,
    /// Wall-clock time spent on the scenario
    pub elapsed: Duration,
    /// The aborting failure, on `Fail`
    pub failure: Option<ScenarioFailure>,
}

impl ScenarioResult {
    /// Build a passing result
    #[must_use]
    pub fn pass(
        scenario: impl Into<String>,
        rounds_completed: u32,
        seeks_verified: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            verdict: ScenarioVerdict::Pass,
            rounds_completed,
            seeks_verified,
            elapsed,
            failure: None,
        }
    }

    /// Build a failing result
    #[must_use]
    pub fn fail(
        scenario: impl Into<String>,
        rounds_completed: u32,
        seeks_verified: usize,
        elapsed: Duration,
        failure: ScenarioFailure,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            verdict: ScenarioVerdict::Fail,
            rounds_completed,
            seeks_verified,
            elapsed,
            failure: Some(failure),
        }
    }

    /// Whether the scenario passed
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// Aggregated results for a whole scenario matrix run.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixReport {
    /// Unique identifier of this run
    pub run_id: String,
    /// Per-scenario results, in matrix order
    pub results: Vec<ScenarioResult>,
    /// Wall-clock time for the whole matrix
    pub elapsed: Duration,
}

impl MatrixReport {
    /// Build a report from collected results
    #[must_use]
    pub fn new(results: Vec<ScenarioResult>, elapsed: Duration) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            results,
            elapsed,
        }
    }

    /// Whether every scenario passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(ScenarioResult::is_pass)
    }

    /// Number of passing scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_pass()).count()
    }

    /// Number of failing scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }

    /// The failing results
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| !r.is_pass()).collect()
    }
}
