//! Adapter Layer
//!
//! 外部システム（Google OAuth, Google Photos, ファイルシステム）との統合

pub mod auth;
pub mod config;
pub mod photos;
pub mod repositories;
