pub mod blob;
pub mod encode;
pub mod upload;

pub use blob::{DiskFile, FileBlob, InMemoryFile};
pub use encode::{audio_format, data_url, encode_media, file_to_base64, media_part};
pub use upload::{UploadTicket, UploadTracker};
