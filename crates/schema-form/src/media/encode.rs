//! Turning selected files into rich media values.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::MediaError;
use crate::value::{
    AudioFormat, FileContent, ImageUrl, InputAudio, MediaKind, RichContentPart, VideoUrl,
};

use super::blob::FileBlob;

/// Read a blob and return its standard base64 encoding, without any
/// `data:` prefix.
pub async fn file_to_base64(file: &dyn FileBlob) -> Result<String, MediaError> {
    let bytes = file.read().await?;
    Ok(BASE64.encode(bytes))
}

/// Build a `data:<mime>;base64,<payload>` URL.
pub fn data_url(mime: &str, base64: &str) -> String {
    format!("data:{mime};base64,{base64}")
}

/// Infer the audio container from a MIME type. Anything that is not MPEG
/// audio is sent as WAV.
///
/// ```
/// use schema_form::media::audio_format;
/// use schema_form::value::AudioFormat;
///
/// assert_eq!(audio_format("AUDIO/MPEG"), AudioFormat::Mp3);
/// assert_eq!(audio_format("audio/ogg"), AudioFormat::Wav);
/// ```
pub fn audio_format(mime: &str) -> AudioFormat {
    let mime = mime.to_ascii_lowercase();
    if mime.contains("mpeg") || mime.contains("mp3") {
        AudioFormat::Mp3
    } else {
        AudioFormat::Wav
    }
}

/// Build the rich media part for an already-encoded payload.
pub fn media_part(kind: MediaKind, name: &str, mime: &str, base64: String) -> RichContentPart {
    match kind {
        MediaKind::Image => RichContentPart::ImageUrl {
            image_url: ImageUrl {
                url: data_url(mime, &base64),
                detail: None,
            },
        },
        MediaKind::Audio => RichContentPart::InputAudio {
            input_audio: InputAudio {
                data: base64,
                format: audio_format(mime),
            },
        },
        MediaKind::Video => RichContentPart::VideoUrl {
            video_url: VideoUrl {
                url: data_url(mime, &base64),
            },
        },
        MediaKind::File => RichContentPart::File {
            file: FileContent {
                file_data: Some(base64),
                file_url: None,
                filename: Some(name.to_string()),
            },
        },
    }
}

/// Read a blob and wrap it as the rich media part for `kind`.
pub async fn encode_media(
    kind: MediaKind,
    file: &dyn FileBlob,
) -> Result<RichContentPart, MediaError> {
    let base64 = file_to_base64(file).await?;
    Ok(media_part(kind, file.name(), file.mime_type(), base64))
}
