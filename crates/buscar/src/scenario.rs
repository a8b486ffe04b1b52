//! Scenario descriptors: transport, container format, channel mode, locator.
//!
//! A scenario is one (transport, format, channel mode) combination under
//! test. The full matrix is expressed as data, not as one hand-written test
//! per combination: [`scenario_matrix`] expands a locator over protocol and
//! format lists and feeds a single parameterized runner.

use serde::{Deserialize, Serialize};

/// Transport protocol delivering the media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportProtocol {
    /// Local file delivery
    File,
    /// HTTP delivery
    Http,
    /// Object-storage (S3-style) delivery
    S3,
}

impl TransportProtocol {
    /// All supported transports
    pub const ALL: [Self; 3] = [Self::File, Self::Http, Self::S3];

    /// URL scheme for this transport
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Http => "http",
            Self::S3 => "s3",
        }
    }

    /// Whether a client session must be established before the first seek.
    ///
    /// HTTP-delivered sources only become seekable once the serving session
    /// has started; file and object-storage sources report immediate
    /// readiness.
    #[must_use]
    pub const fn requires_session_establishment(&self) -> bool {
        matches!(self, Self::Http)
    }
}

impl std::fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

/// Container format of the media source.
///
/// Every format re-encodes the same reference content, so identical expected
/// colors must hold across all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerFormat {
    /// Ogg video
    Ogv,
    /// Matroska
    Mkv,
    /// Audio Video Interleave
    Avi,
    /// WebM
    Webm,
    /// QuickTime
    Mov,
    /// 3GPP
    ThreeGp,
    /// MPEG-4 Part 14
    Mp4,
}

impl ContainerFormat {
    /// All tested container formats
    pub const ALL: [Self; 7] = [
        Self::Ogv,
        Self::Mkv,
        Self::Avi,
        Self::Webm,
        Self::Mov,
        Self::ThreeGp,
        Self::Mp4,
    ];

    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Ogv => "ogv",
            Self::Mkv => "mkv",
            Self::Avi => "avi",
            Self::Webm => "webm",
            Self::Mov => "mov",
            Self::ThreeGp => "3gp",
            Self::Mp4 => "mp4",
        }
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Which media track(s) are active for the session.
///
/// Affects which sampler is valid, not the seek semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelMode {
    /// Video track only
    VideoOnly,
    /// Audio track only
    AudioOnly,
    /// Both tracks
    AudioAndVideo,
}

impl ChannelMode {
    /// Whether a video track is active
    #[must_use]
    pub const fn has_video(&self) -> bool {
        matches!(self, Self::VideoOnly | Self::AudioAndVideo)
    }

    /// Whether an audio track is active
    #[must_use]
    pub const fn has_audio(&self) -> bool {
        matches!(self, Self::AudioOnly | Self::AudioAndVideo)
    }
}

impl std::fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::VideoOnly => "video-only",
            Self::AudioOnly => "audio-only",
            Self::AudioAndVideo => "audio-and-video",
        };
        write!(f, "{s}")
    }
}

/// Where the media lives, independent of transport and format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLocator {
    /// Host/bucket part of the URL (may be empty for file URLs)
    pub authority: String,
    /// Absolute path to the media, without extension
    pub path: String,
}

impl MediaLocator {
    /// Create a locator from authority and extension-less path
    #[must_use]
    pub fn new(authority: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            path: path.into(),
        }
    }

    /// Assemble the full URL for a transport and format
    #[must_use]
    pub fn url(&self, protocol: TransportProtocol, format: ContainerFormat) -> String {
        format!(
            "{}://{}{}.{}",
            protocol.scheme(),
            self.authority,
            self.path,
            format.extension()
        )
    }
}

/// One full combination under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Transport delivering the source
    pub protocol: TransportProtocol,
    /// Container format of the source
    pub format: ContainerFormat,
    /// Active track(s)
    pub channel_mode: ChannelMode,
    /// Source location
    pub locator: MediaLocator,
}

impl Scenario {
    /// Create a scenario descriptor
    #[must_use]
    pub const fn new(
        protocol: TransportProtocol,
        format: ContainerFormat,
        channel_mode: ChannelMode,
        locator: MediaLocator,
    ) -> Self {
        Self {
            protocol,
            format,
            channel_mode,
            locator,
        }
    }

    /// The full media URL for this scenario
    #[must_use]
    pub fn media_url(&self) -> String {
        self.locator.url(self.protocol, self.format)
    }

    /// Short human-readable label, e.g. `http/mp4/video-only`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}/{}", self.protocol, self.format, self.channel_mode)
    }
}

/// Expand a locator over protocol and format lists into a scenario table.
///
/// Replaces per-combination hand-written test methods with one data-driven
/// enumeration.
#[must_use]
pub fn scenario_matrix(
    locator: &MediaLocator,
    protocols: &[TransportProtocol],
    formats: &[ContainerFormat],
    channel_mode: ChannelMode,
) -> Vec<Scenario> {
    protocols
        .iter()
        .flat_map(|&protocol| {
            formats.iter().map(move |&format| {
                Scenario::new(protocol, format, channel_mode, locator.clone())
            })
        })
        .collect()
}
