//! Matrix runner: executes a scenario table with one shared configuration.
//!
//! Every scenario gets an independent session from the factory and runs on
//! its own thread. Scenarios share no mutable state, so one failing cell
//! never cancels its siblings; results come back in matrix order regardless
//! of completion order.

use crate::orchestrator::SeekOrchestrator;
use crate::plan::{PauseDuration, RoundCount, SeekPlan};
use crate::report::{MatrixReport, ScenarioFailure, ScenarioResult};
use crate::result::BuscarResult;
use crate::scenario::Scenario;
use crate::session::SessionFactory;
use std::time::Instant;

/// Runs one seek plan across many scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    orchestrator: SeekOrchestrator,
    plan: SeekPlan,
    rounds: RoundCount,
    pause: PauseDuration,
}

impl ScenarioRunner {
    /// Create a runner with a default orchestrator
    #[must_use]
    pub fn new(plan: SeekPlan, rounds: RoundCount, pause: PauseDuration) -> Self {
        Self {
            orchestrator: SeekOrchestrator::new(),
            plan,
            rounds,
            pause,
        }
    }

    /// Replace the orchestrator (timeouts, tolerance, deadline)
    #[must_use]
    pub const fn with_orchestrator(mut self, orchestrator: SeekOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    /// Run one scenario to completion or first failure.
    ///
    /// A factory that cannot open the scenario produces a failing result,
    /// not an `Err`; the matrix must keep going.
    ///
    /// # Errors
    ///
    /// [`crate::result::BuscarError::EmptyPlan`] if the plan has no steps.
    pub fn run_scenario(
        &self,
        factory: &dyn SessionFactory,
        scenario: &Scenario,
    ) -> BuscarResult<ScenarioResult> {
        self.plan.validate()?;

        let start = Instant::now();
        let mut handles = match factory.open(scenario) {
            Ok(handles) => handles,
            Err(err) => {
                tracing::warn!(scenario = %scenario.label(), %err, "failed to open session");
                return Ok(ScenarioResult::fail(
                    scenario.label(),
                    0,
                    0,
                    start.elapsed(),
                    ScenarioFailure::Transport {
                        message: err.to_string(),
                    },
                ));
            }
        };

        self.orchestrator
            .run(scenario, &mut handles, &self.plan, self.rounds, self.pause)
    }

    /// Run every scenario in the table, one thread per scenario.
    ///
    /// # Errors
    ///
    /// [`crate::result::BuscarError::EmptyPlan`] if the plan has no steps.
    pub fn run_matrix(
        &self,
        factory: &dyn SessionFactory,
        scenarios: &[Scenario],
    ) -> BuscarResult<MatrixReport> {
        self.plan.validate()?;

        let start = Instant::now();
        tracing::info!(scenarios = scenarios.len(), "starting matrix run");

        let results = std::thread::scope(|scope| {
            let workers: Vec<_> = scenarios
                .iter()
                .map(|scenario| scope.spawn(move || self.run_scenario(factory, scenario)))
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("scenario thread panicked"))
                .collect::<BuscarResult<Vec<_>>>()
        })?;

        let report = MatrixReport::new(results, start.elapsed());
        tracing::info!(
            run_id = %report.run_id,
            passed = report.passed_count(),
            failed = report.failed_count(),
            "matrix run complete"
        );
        Ok(report)
    }
}
