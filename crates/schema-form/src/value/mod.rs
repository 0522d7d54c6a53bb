//! Form values and rich media parts.

pub mod access;
pub mod input_value;
pub mod rich_content;

pub use access::{
    get_at, get_at_path, set_at, set_at_path, with_property, with_pushed, without_item,
};
pub use input_value::InputValue;
pub use rich_content::{
    AudioFormat, FileContent, ImageUrl, InputAudio, MediaKind, RichContentPart, VideoUrl,
    RICH_CONTENT_TAGS,
};
