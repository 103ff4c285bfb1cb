//! Authentication Module
//!
//! Google OAuth 2.0 認証関連の機能

pub mod consent;
pub mod google_oauth;
pub mod token_cache;

pub use google_oauth::GoogleOAuthProvider;
