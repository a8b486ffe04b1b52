//! Collaborator seams: the session, sampler, and lifecycle interfaces.
//!
//! Buscar consumes these capabilities and never implements a transport or
//! renderer behind them. Real deployments back them with a media pipeline
//! and capture automation; tests back them with [`crate::sim`].
//!
//! Collaborators report the small [`SessionError`]; the orchestrator attaches
//! round and offset context when converting failures into results.

use crate::color::Color;
use crate::scenario::{ChannelMode, Scenario};
use std::time::Duration;
use thiserror::Error;

/// Error raised by a session-layer collaborator.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A bounded wait elapsed without the awaited signal
    #[error("timed out after {timeout_ms}ms")]
    Timeout {
        /// The elapsed timeout in milliseconds
        timeout_ms: u64,
    },

    /// A seek target beyond the media duration was rejected
    #[error("offset {offset_ms}ms exceeds media duration {duration_ms}ms")]
    SeekOutOfRange {
        /// Rejected offset in milliseconds
        offset_ms: u64,
        /// Media duration in milliseconds
        duration_ms: u64,
    },

    /// The source is unreachable over its transport
    #[error("transport failure: {message}")]
    Transport {
        /// Message from the transport layer
        message: String,
    },
}

/// An already-opened, playing media session reachable over the scenario's
/// declared transport.
pub trait PlayerSession: Send {
    /// Jump the play position to `offset_ms`.
    ///
    /// # Errors
    ///
    /// `SeekOutOfRange` if the offset exceeds the media duration,
    /// `Transport` if the source became unreachable.
    fn seek(&mut self, offset_ms: u64) -> Result<(), SessionError>;

    /// Block until the session emits its playing-resumed signal, bounded by
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// `Timeout` if the signal was not observed in time.
    fn await_playing(&mut self, timeout: Duration) -> Result<(), SessionError>;
}

/// Samples the dominant color of the currently rendered frame.
pub trait FrameSampler: Send {
    /// Representative color of the rendered output for the active track(s).
    ///
    /// # Errors
    ///
    /// `Transport` if no frame can be captured.
    fn sample(&mut self, mode: ChannelMode) -> Result<Color, SessionError>;
}

/// One-shot notification that a transport-backed session has become ready.
///
/// Only consulted before the first seek, and only for transports that
/// require session establishment.
pub trait LifecycleSignal: Send {
    /// Block until the session-started signal fires, bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// `Timeout` if readiness was never signaled.
    fn await_ready(&mut self, timeout: Duration) -> Result<(), SessionError>;
}

/// The live collaborators backing one scenario.
pub struct ScenarioHandles {
    /// The playing media session
    pub session: Box<dyn PlayerSession>,
    /// Rendered-frame color sampler
    pub sampler: Box<dyn FrameSampler>,
    /// Session-established signal, when the transport provides one
    pub lifecycle: Option<Box<dyn LifecycleSignal>>,
}

impl std::fmt::Debug for ScenarioHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioHandles")
            .field("lifecycle", &self.lifecycle.is_some())
            .finish_non_exhaustive()
    }
}

/// Opens the collaborators for a scenario.
///
/// One factory serves the whole matrix; every call must hand out an
/// independent set of handles, since scenarios share no mutable state.
pub trait SessionFactory: Sync {
    /// Open a session, sampler, and (transport permitting) lifecycle signal
    /// for `scenario`.
    ///
    /// # Errors
    ///
    /// `Transport` if the source cannot be reached over the declared
    /// protocol.
    fn open(&self, scenario: &Scenario) -> Result<ScenarioHandles, SessionError>;
}
