//! Run the full transport x format seek-verification matrix against the
//! simulated pipeline and print the report.
//!
//! ```bash
//! cargo run --example seek_matrix
//! RUST_LOG=buscar=debug cargo run --example seek_matrix
//! ```

use buscar::{
    scenario_matrix, ChannelMode, Color, ContainerFormat, MatrixReporter, MediaLocator,
    PauseDuration, RoundCount, ScenarioRunner, SeekOrchestrator, SeekPlan, SimulatedFactory,
    SimulatedMedia, TransportProtocol,
};
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buscar=info".into()),
        )
        .init();

    // 15-second source split into RED / GREEN / BLUE thirds, re-encoded into
    // every container format by the simulated factory's codec noise.
    let media = SimulatedMedia::rgb_thirds(15_000);
    let factory = SimulatedFactory::new(media)
        .with_codec_noise()
        .with_playing_latency(Duration::from_millis(5));

    let plan = SeekPlan::from_pairs(&[
        (2000, Color::RED),
        (10_000, Color::BLUE),
        (6000, Color::GREEN),
    ]);
    let scenarios = scenario_matrix(
        &MediaLocator::new("files.kurento.org", "/video/15sec/rgbOnlyVideo"),
        &TransportProtocol::ALL,
        &ContainerFormat::ALL,
        ChannelMode::VideoOnly,
    );

    let runner = ScenarioRunner::new(
        plan,
        RoundCount::new(3).expect("non-zero rounds"),
        PauseDuration::from_millis(20),
    )
    .with_orchestrator(SeekOrchestrator::new().with_playing_timeout(Duration::from_secs(5)));

    let report = runner
        .run_matrix(&factory, &scenarios)
        .expect("valid configuration");

    print!("{}", MatrixReporter::new().render_text(&report));
    std::process::exit(i32::from(!report.all_passed()));
}
