//! Google Photos Adapter Modules
//!
//! Google Photos Library API 統合のためのアダプターモジュール

pub mod client;
pub mod models;
pub mod timestamp;
