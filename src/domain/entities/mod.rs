//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **SessionStatus / Credential**: 認証状態とアクセストークン
//! - **UploadItem**: アップロード対象の1ファイル
//! - **BatchProgress**: バッチ全体の進捗と状態メッセージ

pub mod batch_progress;
pub mod session_status;
pub mod upload_item;
