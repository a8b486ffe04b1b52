//! Buscar: Seek Verification Engine for Streaming Media
//!
//! Buscar (Spanish: "to seek") drives deterministic seek sequences against
//! playing media sessions and verifies that each jump lands on the expected
//! content, across a matrix of transports and container formats.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                     BUSCAR Architecture                           │
//! ├───────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌────────────────────┐    │
//! │   │ Scenario   │    │ Scenario     │    │ Seek Orchestrator  │    │
//! │   │ Matrix     │───►│ Runner       │───►│ seek → wait playing│    │
//! │   │ (3 x 7)    │    │ (per thread) │    │ → settle → sample  │    │
//! │   └────────────┘    └──────────────┘    │ → assert color     │    │
//! │                            │            └────────────────────┘    │
//! │                            ▼                      │               │
//! │                     ┌──────────────┐    ┌────────────────────┐    │
//! │                     │ Matrix       │    │ PlayerSession /    │    │
//! │                     │ Report       │    │ FrameSampler seams │    │
//! │                     └──────────────┘    └────────────────────┘    │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never implements a transport or renderer itself: sessions,
//! frame samplers, and lifecycle signals arrive through the traits in
//! [`session`], opened per scenario by a [`SessionFactory`]. The [`sim`]
//! module provides a deterministic in-process implementation for tests and
//! demos.
//!
//! # Example
//!
//! ```
//! use buscar::{
//!     scenario_matrix, ChannelMode, Color, ContainerFormat, MediaLocator,
//!     PauseDuration, RoundCount, ScenarioRunner, SeekPlan, SimulatedFactory,
//!     SimulatedMedia, TransportProtocol,
//! };
//!
//! let plan = SeekPlan::from_pairs(&[
//!     (2000, Color::RED),
//!     (10_000, Color::BLUE),
//!     (6000, Color::GREEN),
//! ]);
//! let scenarios = scenario_matrix(
//!     &MediaLocator::new("files.kurento.org", "/video/15sec/rgbOnlyVideo"),
//!     &TransportProtocol::ALL,
//!     &ContainerFormat::ALL,
//!     ChannelMode::VideoOnly,
//! );
//!
//! let factory = SimulatedFactory::new(SimulatedMedia::rgb_thirds(15_000));
//! let runner = ScenarioRunner::new(
//!     plan,
//!     RoundCount::new(3).unwrap(),
//!     PauseDuration::from_millis(1),
//! );
//! let report = runner.run_matrix(&factory, &scenarios).unwrap();
//! assert!(report.all_passed());
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
mod color;
mod orchestrator;
mod plan;
mod report;
mod reporter;
mod result;
mod runner;
mod scenario;
mod session;

/// Deterministic simulated pipeline for tests and demos
pub mod sim;

pub use assertion::{ColorDiagnostic, ColorMatcher, DEFAULT_COLOR_TOLERANCE};
pub use color::Color;
pub use orchestrator::{SeekOrchestrator, DEFAULT_PLAYING_TIMEOUT, DEFAULT_READY_TIMEOUT};
pub use plan::{PauseDuration, RoundCount, SeekPlan, SeekStep};
pub use report::{MatrixReport, ScenarioFailure, ScenarioResult, ScenarioVerdict};
pub use reporter::MatrixReporter;
pub use result::{BuscarError, BuscarResult};
pub use runner::ScenarioRunner;
pub use scenario::{
    scenario_matrix, ChannelMode, ContainerFormat, MediaLocator, Scenario, TransportProtocol,
};
pub use session::{
    FrameSampler, LifecycleSignal, PlayerSession, ScenarioHandles, SessionError, SessionFactory,
};
pub use sim::{SimulatedFactory, SimulatedMedia, SimulatedPipeline};
