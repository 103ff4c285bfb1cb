//! # Data Transfer Objects
//!
//! 層をまたいで受け渡す値

pub mod sign_in_outcome;
