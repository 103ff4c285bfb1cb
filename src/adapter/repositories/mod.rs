//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_image_repository;
pub mod photos_upload_transport;
