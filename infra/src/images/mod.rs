//! Image provider and image file storage

mod file_storage;
mod openai;

pub use file_storage::FileImageStorage;
pub use openai::OpenAiImageGenerator;
