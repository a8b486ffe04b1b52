//! Seek orchestrator: drives the seek/wait/sample/assert loop.
//!
//! One orchestrator run executes a [`SeekPlan`] for a configured number of
//! rounds against a single live session, strictly ordered:
//!
//! ```text
//! seek -> await playing signal -> settle sleep -> sample -> assert
//! ```
//!
//! Waiting is an explicit blocking call with a deadline, not a registered
//! callback, which keeps the control flow linear. The first mismatch,
//! stall, or transport failure aborts the scenario; nothing is retried
//! within a round.

use crate::assertion::ColorMatcher;
use crate::plan::{PauseDuration, RoundCount, SeekPlan};
use crate::report::{ScenarioFailure, ScenarioResult};
use crate::result::BuscarResult;
use crate::scenario::Scenario;
use crate::session::{ScenarioHandles, SessionError};
use std::time::{Duration, Instant};

/// Default bound on the post-seek playing-resumed wait (30 seconds)
pub const DEFAULT_PLAYING_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on the one-shot session-established wait (30 seconds)
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Drives repeated seeks against one scenario and verifies rendered colors.
#[derive(Debug, Clone, Copy)]
pub struct SeekOrchestrator {
    matcher: ColorMatcher,
    playing_timeout: Duration,
    ready_timeout: Duration,
    deadline: Option<Duration>,
}

impl Default for SeekOrchestrator {
    fn default() -> Self {
        Self {
            matcher: ColorMatcher::default(),
            playing_timeout: DEFAULT_PLAYING_TIMEOUT,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            deadline: None,
        }
    }
}

impl SeekOrchestrator {
    /// Create an orchestrator with default timeouts and tolerance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the color matcher
    #[must_use]
    pub const fn with_matcher(mut self, matcher: ColorMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Set the per-seek playing-resumed timeout
    #[must_use]
    pub const fn with_playing_timeout(mut self, timeout: Duration) -> Self {
        self.playing_timeout = timeout;
        self
    }

    /// Set the session-established timeout
    #[must_use]
    pub const fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    /// Bound the whole scenario by a wall-clock deadline.
    ///
    /// When the deadline elapses the run aborts mid-round; partial round
    /// progress is discarded, not resumed.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Execute `plan` for `rounds` passes against the scenario's session.
    ///
    /// Runtime failures (stalls, mismatches, transport loss) are embedded in
    /// the returned [`ScenarioResult`]; only configuration mistakes produce
    /// an `Err`.
    ///
    /// # Errors
    ///
    /// [`crate::result::BuscarError::EmptyPlan`] if the plan has no steps.
    pub fn run(
        &self,
        scenario: &Scenario,
        handles: &mut ScenarioHandles,
        plan: &SeekPlan,
        rounds: RoundCount,
        pause: PauseDuration,
    ) -> BuscarResult<ScenarioResult> {
        plan.validate()?;

        let label = scenario.label();
        let start = Instant::now();
        tracing::info!(
            scenario = %label,
            url = %scenario.media_url(),
            rounds = rounds.get(),
            steps = plan.len(),
            "starting seek verification"
        );

        if let Some(failure) = self.establish_session(scenario, handles, start) {
            tracing::warn!(scenario = %label, %failure, "session establishment failed");
            return Ok(ScenarioResult::fail(label, 0, 0, start.elapsed(), failure));
        }

        let mut seeks_verified = 0_usize;
        for round in 1..=rounds.get() {
            for step in plan.steps() {
                match self.run_step(scenario, handles, start, round, step, pause) {
                    Ok(()) => seeks_verified += 1,
                    Err(failure) => {
                        tracing::warn!(scenario = %label, round, offset_ms = step.offset_ms, %failure, "scenario failed");
                        return Ok(ScenarioResult::fail(
                            label,
                            round - 1,
                            seeks_verified,
                            start.elapsed(),
                            failure,
                        ));
                    }
                }
            }
            tracing::debug!(scenario = %label, round, "round complete");
        }

        tracing::info!(scenario = %label, seeks_verified, "scenario passed");
        Ok(ScenarioResult::pass(
            label,
            rounds.get(),
            seeks_verified,
            start.elapsed(),
        ))
    }

    /// One-shot lifecycle gate before the first seek.
    ///
    /// Returns the aborting failure, if any.
    fn establish_session(
        &self,
        scenario: &Scenario,
        handles: &mut ScenarioHandles,
        start: Instant,
    ) -> Option<ScenarioFailure> {
        if !scenario.protocol.requires_session_establishment() {
            return None;
        }
        let signal = handles.lifecycle.as_mut()?;
        let timeout = self.clamp_to_deadline(self.ready_timeout, start);
        match signal.await_ready(timeout) {
            Ok(()) => None,
            Err(SessionError::Timeout { timeout_ms }) => {
                Some(ScenarioFailure::SessionNotReady { timeout_ms })
            }
            Err(other) => Some(ScenarioFailure::Transport {
                message: other.to_string(),
            }),
        }
    }

    /// One seek cycle: seek, await playing, settle, sample, assert.
    fn run_step(
        &self,
        scenario: &Scenario,
        handles: &mut ScenarioHandles,
        start: Instant,
        round: u32,
        step: &crate::plan::SeekStep,
        pause: PauseDuration,
    ) -> Result<(), ScenarioFailure> {
        self.check_deadline(start, round)?;

        tracing::debug!(round, offset_ms = step.offset_ms, "seeking");
        handles
            .session
            .seek(step.offset_ms)
            .map_err(|err| seek_failure(round, step.offset_ms, err))?;

        let timeout = self.clamp_to_deadline(self.playing_timeout, start);
        if let Err(err) = handles.session.await_playing(timeout) {
            // A wait cut short by the scenario deadline is a cancellation,
            // not a playback stall.
            self.check_deadline(start, round)?;
            return Err(match err {
                SessionError::Timeout { timeout_ms } => ScenarioFailure::PlaybackStall {
                    round,
                    offset_ms: step.offset_ms,
                    timeout_ms,
                },
                other => ScenarioFailure::Transport {
                    message: other.to_string(),
                },
            });
        }

        // Settle delay: the renderer needs a moment after the seek completes
        // before its output can be trusted.
        std::thread::sleep(self.clamp_to_deadline(pause.as_duration(), start));
        self.check_deadline(start, round)?;

        let actual = handles
            .sampler
            .sample(scenario.channel_mode)
            .map_err(|err| ScenarioFailure::Transport {
                message: err.to_string(),
            })?;

        if !self.matcher.matches(step.expected, actual) {
            let diag = self.matcher.explain(step.expected, actual);
            return Err(ScenarioFailure::ColorMismatch {
                round,
                offset_ms: step.offset_ms,
                expected: step.expected,
                actual,
                distance: diag.distance,
            });
        }
        Ok(())
    }

    fn check_deadline(&self, start: Instant, round: u32) -> Result<(), ScenarioFailure> {
        match self.deadline {
            Some(deadline) if start.elapsed() >= deadline => {
                Err(ScenarioFailure::DeadlineExceeded {
                    round,
                    deadline_ms: deadline.as_millis() as u64,
                })
            }
            _ => Ok(()),
        }
    }

    /// Never wait past the scenario deadline.
    fn clamp_to_deadline(&self, wanted: Duration, start: Instant) -> Duration {
        match self.deadline {
            Some(deadline) => wanted.min(deadline.saturating_sub(start.elapsed())),
            None => wanted,
        }
    }
}

fn seek_failure(round: u32, offset_ms: u64, err: SessionError) -> ScenarioFailure {
    match err {
        SessionError::SeekOutOfRange { duration_ms, .. } => ScenarioFailure::SeekRejected {
            round,
            offset_ms,
            reason: format!("beyond media duration of {duration_ms}ms"),
        },
        other => ScenarioFailure::Transport {
            message: other.to_string(),
        },
    }
}
