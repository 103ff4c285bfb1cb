//! # Upload Transport Trait
//!
//! ファイル1件のアップロードを抽象化

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// トランスポートエラー
///
/// ネットワーク・検証・サービス側のいずれの失敗もこの型で表す。
/// オーケストレーターはアイテム単位で吸収し、バッチを中断しない
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upload rejected with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Media item for {filename} was not created: {message}")]
    MediaItemRejected { filename: String, message: String },

    #[error("Unsupported file format: {filename}. Only PNG files are supported.")]
    UnsupportedFormat { filename: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// アップロードトランスポート
///
/// 1ファイルをリモートのフォトストレージへ送信する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// ファイルをアップロード
    ///
    /// # Arguments
    ///
    /// * `bytes` - ファイルの生バイト列（呼び出しで消費される）
    /// * `filename` - ファイル名
    /// * `token` - アクセストークン
    ///
    /// # Errors
    ///
    /// 送信・検証・サービス側の失敗時に `TransportError` を返す
    async fn upload(&self, bytes: Vec<u8>, filename: &str, token: &str)
        -> Result<(), TransportError>;
}
