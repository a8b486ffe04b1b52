//! Deterministic in-process media pipeline for tests and demos.
//!
//! Implements the collaborator traits of [`crate::session`] without any real
//! transport or renderer. The pipeline models the one property the engine
//! must respect: the *rendered* position only advances once the playing
//! signal has been delivered, so a stalled pipeline keeps serving the stale
//! pre-seek frame.
//!
//! Latencies, sampler noise, stalls, and readiness can all be injected.

use crate::color::Color;
use crate::scenario::{ChannelMode, ContainerFormat, Scenario, TransportProtocol};
use crate::session::{
    FrameSampler, LifecycleSignal, PlayerSession, ScenarioHandles, SessionError, SessionFactory,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A fake media source: a duration and an ordered list of color segments.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    duration_ms: u64,
    /// (start offset, color) pairs, ascending by start
    segments: Vec<(u64, Color)>,
}

impl SimulatedMedia {
    /// Create media of the given duration with no segments (renders black)
    #[must_use]
    pub const fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            segments: Vec::new(),
        }
    }

    /// Append a segment starting at `start_ms`
    #[must_use]
    pub fn with_segment(mut self, start_ms: u64, color: Color) -> Self {
        self.segments.push((start_ms, color));
        self.segments.sort_by_key(|&(start, _)| start);
        self
    }

    /// The reference stability-test source: a video split into equal
    /// RED / GREEN / BLUE thirds.
    #[must_use]
    pub fn rgb_thirds(duration_ms: u64) -> Self {
        let third = duration_ms / 3;
        Self::new(duration_ms)
            .with_segment(0, Color::RED)
            .with_segment(third, Color::GREEN)
            .with_segment(2 * third, Color::BLUE)
    }

    /// Media duration in milliseconds
    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Rendered color at an offset (black before the first segment)
    #[must_use]
    pub fn color_at(&self, offset_ms: u64) -> Color {
        self.segments
            .iter()
            .rev()
            .find(|&&(start, _)| start <= offset_ms)
            .map_or(Color::BLACK, |&(_, color)| color)
    }
}

#[derive(Debug)]
struct PipelineState {
    media: SimulatedMedia,
    /// Position the renderer is actually showing
    rendered_ms: u64,
    /// Seek issued but playing signal not yet delivered
    pending_ms: Option<u64>,
    /// Every accepted seek target, in order
    seek_log: Vec<u64>,
    /// Seeks after this many never resume playing
    stall_after: Option<usize>,
    /// Added to every sampled channel, clamped
    sample_noise: [i16; 3],
    /// Delay before the playing signal fires
    playing_latency: Duration,
    /// Delay before the session-started signal fires; `None` = never
    ready_latency: Option<Duration>,
    ready: bool,
}

/// A controllable fake pipeline handing out sessions, samplers, and
/// lifecycle signals that share one state.
#[derive(Debug, Clone)]
pub struct SimulatedPipeline {
    state: Arc<Mutex<PipelineState>>,
}

impl SimulatedPipeline {
    /// Create a pipeline over the given media, positioned at 0 and playing
    #[must_use]
    pub fn new(media: SimulatedMedia) -> Self {
        Self {
            state: Arc::new(Mutex::new(PipelineState {
                media,
                rendered_ms: 0,
                pending_ms: None,
                seek_log: Vec::new(),
                stall_after: None,
                sample_noise: [0, 0, 0],
                playing_latency: Duration::ZERO,
                ready_latency: Some(Duration::ZERO),
                ready: false,
            })),
        }
    }

    /// Delay the playing-resumed signal by `latency` after each seek
    #[must_use]
    pub fn with_playing_latency(self, latency: Duration) -> Self {
        self.state.lock().expect("pipeline lock").playing_latency = latency;
        self
    }

    /// Add fixed per-channel noise to every sample (codec variance stand-in)
    #[must_use]
    pub fn with_sample_noise(self, noise: [i16; 3]) -> Self {
        self.state.lock().expect("pipeline lock").sample_noise = noise;
        self
    }

    /// Let the first `n` seeks resume playing; every later seek stalls
    #[must_use]
    pub fn stall_after(self, n: usize) -> Self {
        self.state.lock().expect("pipeline lock").stall_after = Some(n);
        self
    }

    /// The session-started signal never fires
    #[must_use]
    pub fn never_ready(self) -> Self {
        self.state.lock().expect("pipeline lock").ready_latency = None;
        self
    }

    /// Delay the session-started signal
    #[must_use]
    pub fn with_ready_latency(self, latency: Duration) -> Self {
        self.state.lock().expect("pipeline lock").ready_latency = Some(latency);
        self
    }

    /// A session backed by this pipeline
    #[must_use]
    pub fn session(&self) -> SimulatedSession {
        SimulatedSession {
            state: Arc::clone(&self.state),
        }
    }

    /// A sampler backed by this pipeline
    #[must_use]
    pub fn sampler(&self) -> SimulatedSampler {
        SimulatedSampler {
            state: Arc::clone(&self.state),
        }
    }

    /// A lifecycle signal backed by this pipeline
    #[must_use]
    pub fn lifecycle(&self) -> SimulatedLifecycle {
        SimulatedLifecycle {
            state: Arc::clone(&self.state),
        }
    }

    /// Handles without a lifecycle signal (immediate-readiness transports)
    #[must_use]
    pub fn handles(&self) -> ScenarioHandles {
        ScenarioHandles {
            session: Box::new(self.session()),
            sampler: Box::new(self.sampler()),
            lifecycle: None,
        }
    }

    /// Handles including the lifecycle signal
    #[must_use]
    pub fn handles_with_lifecycle(&self) -> ScenarioHandles {
        ScenarioHandles {
            session: Box::new(self.session()),
            sampler: Box::new(self.sampler()),
            lifecycle: Some(Box::new(self.lifecycle())),
        }
    }

    /// Every seek target accepted so far, in order
    #[must_use]
    pub fn seek_log(&self) -> Vec<u64> {
        self.state.lock().expect("pipeline lock").seek_log.clone()
    }
}

/// Session handle over a [`SimulatedPipeline`].
#[derive(Debug)]
pub struct SimulatedSession {
    state: Arc<Mutex<PipelineState>>,
}

impl PlayerSession for SimulatedSession {
    fn seek(&mut self, offset_ms: u64) -> Result<(), SessionError> {
        let mut state = self.state.lock().expect("pipeline lock");
        if offset_ms > state.media.duration_ms() {
            return Err(SessionError::SeekOutOfRange {
                offset_ms,
                duration_ms: state.media.duration_ms(),
            });
        }
        state.seek_log.push(offset_ms);
        state.pending_ms = Some(offset_ms);
        Ok(())
    }

    fn await_playing(&mut self, timeout: Duration) -> Result<(), SessionError> {
        let (stalled, latency) = {
            let state = self.state.lock().expect("pipeline lock");
            let stalled = state
                .stall_after
                .is_some_and(|n| state.seek_log.len() > n);
            (stalled, state.playing_latency)
        };

        if stalled || latency >= timeout {
            std::thread::sleep(timeout);
            return Err(SessionError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            });
        }

        std::thread::sleep(latency);
        let mut state = self.state.lock().expect("pipeline lock");
        if let Some(target) = state.pending_ms.take() {
            state.rendered_ms = target;
        }
        Ok(())
    }
}

/// Sampler handle over a [`SimulatedPipeline`].
#[derive(Debug)]
pub struct SimulatedSampler {
    state: Arc<Mutex<PipelineState>>,
}

impl FrameSampler for SimulatedSampler {
    fn sample(&mut self, mode: ChannelMode) -> Result<Color, SessionError> {
        if !mode.has_video() {
            return Err(SessionError::Transport {
                message: format!("no video track to sample in {mode} mode"),
            });
        }
        let state = self.state.lock().expect("pipeline lock");
        let base = state.media.color_at(state.rendered_ms);
        let [nr, ng, nb] = state.sample_noise;
        Ok(Color::rgb(
            add_noise(base.r, nr),
            add_noise(base.g, ng),
            add_noise(base.b, nb),
        ))
    }
}

fn add_noise(channel: u8, noise: i16) -> u8 {
    (i16::from(channel) + noise).clamp(0, 255) as u8
}

/// Lifecycle handle over a [`SimulatedPipeline`].
#[derive(Debug)]
pub struct SimulatedLifecycle {
    state: Arc<Mutex<PipelineState>>,
}

impl LifecycleSignal for SimulatedLifecycle {
    fn await_ready(&mut self, timeout: Duration) -> Result<(), SessionError> {
        let latency = {
            let state = self.state.lock().expect("pipeline lock");
            if state.ready {
                return Ok(());
            }
            state.ready_latency
        };

        match latency {
            Some(latency) if latency < timeout => {
                std::thread::sleep(latency);
                self.state.lock().expect("pipeline lock").ready = true;
                Ok(())
            }
            _ => {
                std::thread::sleep(timeout);
                Err(SessionError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        }
    }
}

/// Opens an independent [`SimulatedPipeline`] per scenario.
#[derive(Debug, Clone)]
pub struct SimulatedFactory {
    media: SimulatedMedia,
    playing_latency: Duration,
    codec_noise: bool,
    stall_after: Option<usize>,
    unreachable: Vec<TransportProtocol>,
}

impl SimulatedFactory {
    /// Factory producing pipelines over the given media
    #[must_use]
    pub fn new(media: SimulatedMedia) -> Self {
        Self {
            media,
            playing_latency: Duration::ZERO,
            codec_noise: false,
            stall_after: None,
            unreachable: Vec::new(),
        }
    }

    /// Delay the playing signal in every opened pipeline
    #[must_use]
    pub const fn with_playing_latency(mut self, latency: Duration) -> Self {
        self.playing_latency = latency;
        self
    }

    /// Apply a deterministic per-format sampler noise, emulating the
    /// variance of each container's re-encode of the same source
    #[must_use]
    pub const fn with_codec_noise(mut self) -> Self {
        self.codec_noise = true;
        self
    }

    /// Stall every opened pipeline after `n` seeks
    #[must_use]
    pub const fn stall_after(mut self, n: usize) -> Self {
        self.stall_after = Some(n);
        self
    }

    /// Make a transport unreachable
    #[must_use]
    pub fn with_unreachable(mut self, protocol: TransportProtocol) -> Self {
        self.unreachable.push(protocol);
        self
    }
}

/// Small fixed per-format sample deltas, all well inside the default
/// comparison tolerance.
const fn format_noise(format: ContainerFormat) -> [i16; 3] {
    match format {
        ContainerFormat::Ogv => [-12, 6, 3],
        ContainerFormat::Mkv => [8, -10, 2],
        ContainerFormat::Avi => [-5, -4, 14],
        ContainerFormat::Webm => [10, 9, -8],
        ContainerFormat::Mov => [-15, 2, 5],
        ContainerFormat::ThreeGp => [18, -12, -6],
        ContainerFormat::Mp4 => [4, 3, -9],
    }
}

impl SessionFactory for SimulatedFactory {
    fn open(&self, scenario: &Scenario) -> Result<ScenarioHandles, SessionError> {
        if self.unreachable.contains(&scenario.protocol) {
            return Err(SessionError::Transport {
                message: format!("{} is unreachable", scenario.media_url()),
            });
        }

        let mut pipeline = SimulatedPipeline::new(self.media.clone())
            .with_playing_latency(self.playing_latency);
        if self.codec_noise {
            pipeline = pipeline.with_sample_noise(format_noise(scenario.format));
        }
        if let Some(n) = self.stall_after {
            pipeline = pipeline.stall_after(n);
        }

        if scenario.protocol.requires_session_establishment() {
            Ok(pipeline.handles_with_lifecycle())
        } else {
            Ok(pipeline.handles())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod media_tests {
        use super::*;

        #[test]
        fn test_rgb_thirds_layout() {
            let media = SimulatedMedia::rgb_thirds(15_000);
            assert_eq!(media.color_at(0), Color::RED);
            assert_eq!(media.color_at(2000), Color::RED);
            assert_eq!(media.color_at(4999), Color::RED);
            assert_eq!(media.color_at(5000), Color::GREEN);
            assert_eq!(media.color_at(6000), Color::GREEN);
            assert_eq!(media.color_at(10_000), Color::BLUE);
            assert_eq!(media.color_at(15_000), Color::BLUE);
        }

        #[test]
        fn test_empty_media_renders_black() {
            let media = SimulatedMedia::new(1000);
            assert_eq!(media.color_at(500), Color::BLACK);
        }

        #[test]
        fn test_segments_sorted_on_insert() {
            let media = SimulatedMedia::new(1000)
                .with_segment(500, Color::BLUE)
                .with_segment(0, Color::RED);
            assert_eq!(media.color_at(100), Color::RED);
            assert_eq!(media.color_at(700), Color::BLUE);
        }
    }

    mod session_tests {
        use super::*;

        #[test]
        fn test_seek_and_play_updates_rendered_position() {
            let pipeline = SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000));
            let mut session = pipeline.session();
            let mut sampler = pipeline.sampler();

            session.seek(12_000).unwrap();
            session.await_playing(Duration::from_millis(50)).unwrap();
            assert_eq!(
                sampler.sample(ChannelMode::VideoOnly).unwrap(),
                Color::BLUE
            );
        }

        #[test]
        fn test_rendered_position_stale_until_playing() {
            let pipeline = SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000));
            let mut session = pipeline.session();
            let mut sampler = pipeline.sampler();

            session.seek(12_000).unwrap();
            // No await_playing: the renderer still shows offset 0.
            assert_eq!(sampler.sample(ChannelMode::VideoOnly).unwrap(), Color::RED);
        }

        #[test]
        fn test_seek_out_of_range() {
            let pipeline = SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000));
            let mut session = pipeline.session();
            let err = session.seek(16_000).unwrap_err();
            assert!(matches!(err, SessionError::SeekOutOfRange { .. }));
            assert!(pipeline.seek_log().is_empty());
        }

        #[test]
        fn test_stall_after_threshold() {
            let pipeline =
                SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000)).stall_after(1);
            let mut session = pipeline.session();

            session.seek(2000).unwrap();
            assert!(session.await_playing(Duration::from_millis(20)).is_ok());

            session.seek(6000).unwrap();
            let err = session.await_playing(Duration::from_millis(20)).unwrap_err();
            assert!(matches!(err, SessionError::Timeout { timeout_ms: 20 }));
        }
    }

    mod sampler_tests {
        use super::*;

        #[test]
        fn test_noise_applied_and_clamped() {
            let pipeline = SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000))
                .with_sample_noise([20, -30, 5]);
            let mut sampler = pipeline.sampler();
            // Rendered at 0 -> RED (255, 0, 0); noise clamps at both ends.
            assert_eq!(
                sampler.sample(ChannelMode::VideoOnly).unwrap(),
                Color::rgb(255, 0, 5)
            );
        }

        #[test]
        fn test_audio_only_mode_has_no_frames() {
            let pipeline = SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000));
            let mut sampler = pipeline.sampler();
            assert!(sampler.sample(ChannelMode::AudioOnly).is_err());
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_ready_immediately_by_default() {
            let pipeline = SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000));
            let mut lifecycle = pipeline.lifecycle();
            assert!(lifecycle.await_ready(Duration::from_millis(20)).is_ok());
            // One-shot but idempotent once fired.
            assert!(lifecycle.await_ready(Duration::from_millis(20)).is_ok());
        }

        #[test]
        fn test_never_ready_times_out() {
            let pipeline =
                SimulatedPipeline::new(SimulatedMedia::rgb_thirds(15_000)).never_ready();
            let mut lifecycle = pipeline.lifecycle();
            let err = lifecycle.await_ready(Duration::from_millis(20)).unwrap_err();
            assert!(matches!(err, SessionError::Timeout { .. }));
        }
    }

    mod factory_tests {
        use super::*;
        use crate::scenario::MediaLocator;

        fn scenario(protocol: TransportProtocol, format: ContainerFormat) -> Scenario {
            Scenario::new(
                protocol,
                format,
                ChannelMode::VideoOnly,
                MediaLocator::new("files.kurento.org", "/video/15sec/rgbOnlyVideo"),
            )
        }

        #[test]
        fn test_lifecycle_only_for_http() {
            let factory = SimulatedFactory::new(SimulatedMedia::rgb_thirds(15_000));
            let http = factory
                .open(&scenario(TransportProtocol::Http, ContainerFormat::Mp4))
                .unwrap();
            assert!(http.lifecycle.is_some());

            let file = factory
                .open(&scenario(TransportProtocol::File, ContainerFormat::Mp4))
                .unwrap();
            assert!(file.lifecycle.is_none());
        }

        #[test]
        fn test_unreachable_transport() {
            let factory = SimulatedFactory::new(SimulatedMedia::rgb_thirds(15_000))
                .with_unreachable(TransportProtocol::S3);
            let err = factory
                .open(&scenario(TransportProtocol::S3, ContainerFormat::Avi))
                .unwrap_err();
            assert!(matches!(err, SessionError::Transport { .. }));
        }

        #[test]
        fn test_codec_noise_varies_by_format_within_tolerance() {
            let factory =
                SimulatedFactory::new(SimulatedMedia::rgb_thirds(15_000)).with_codec_noise();
            let mut mp4 = factory
                .open(&scenario(TransportProtocol::File, ContainerFormat::Mp4))
                .unwrap();
            let mut ogv = factory
                .open(&scenario(TransportProtocol::File, ContainerFormat::Ogv))
                .unwrap();

            let mp4_color = mp4.sampler.sample(ChannelMode::VideoOnly).unwrap();
            let ogv_color = ogv.sampler.sample(ChannelMode::VideoOnly).unwrap();
            assert_ne!(mp4_color, ogv_color, "formats should differ slightly");
            assert!(Color::RED.distance(mp4_color) < 60.0);
            assert!(Color::RED.distance(ogv_color) < 60.0);
        }
    }
}
