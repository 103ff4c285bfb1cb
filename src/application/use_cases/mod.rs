//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **SessionState**: 認証状態の管理とサインイン
//! - **LoadImagesUseCase**: 画像ファイルの発見と読み込み
//! - **BatchUploadUseCase**: バッチの逐次アップロードと進捗集計

pub mod load_images;
pub mod run_batch;
pub mod session_state;
