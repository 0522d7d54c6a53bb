//! Rich media value shapes (image, audio, video, file).
//!
//! These are the exact shapes consumed downstream when an input is sent for
//! execution, so the serde representation is part of the public contract.

use serde::{Deserialize, Serialize};

/// Discriminant values reserved for rich media parts.
pub const RICH_CONTENT_TAGS: [&str; 5] =
    ["image_url", "input_audio", "video_url", "input_video", "file"];

/// Container format of an uploaded audio clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Usually a `data:` URL carrying the base64 payload.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAudio {
    /// Raw base64 payload, without a `data:` prefix.
    pub data: String,
    pub format: AudioFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoUrl {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    /// Raw base64 payload, without a `data:` prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// A rich media value, recognized by its `type` discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichContentPart {
    ImageUrl { image_url: ImageUrl },
    InputAudio { input_audio: InputAudio },
    VideoUrl { video_url: VideoUrl },
    InputVideo { video_url: VideoUrl },
    File { file: FileContent },
}

impl RichContentPart {
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::ImageUrl { .. } => MediaKind::Image,
            Self::InputAudio { .. } => MediaKind::Audio,
            Self::VideoUrl { .. } | Self::InputVideo { .. } => MediaKind::Video,
            Self::File { .. } => MediaKind::File,
        }
    }

    /// The discriminant value this part serializes with.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ImageUrl { .. } => "image_url",
            Self::InputAudio { .. } => "input_audio",
            Self::VideoUrl { .. } => "video_url",
            Self::InputVideo { .. } => "input_video",
            Self::File { .. } => "file",
        }
    }
}

/// The four media leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    File,
}

impl MediaKind {
    /// Classify a discriminant value. Both video spellings map to
    /// [`MediaKind::Video`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "image_url" => Some(Self::Image),
            "input_audio" => Some(Self::Audio),
            "video_url" | "input_video" => Some(Self::Video),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// MIME filter offered by the upload affordance.
    pub fn accept(self) -> &'static str {
        match self {
            Self::Image => "image/*",
            Self::Audio => "audio/*",
            Self::Video => "video/*",
            Self::File => "*/*",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::File => "File",
        }
    }
}
