//! # Domain Services
//!
//! 特定のエンティティに属さないビジネスルール

pub mod capture_time;
