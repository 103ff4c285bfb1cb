//! # Domain Layer
//!
//! このモジュールはアップロード処理の核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - HTTPやOAuthの詳細について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（SessionStatus, UploadItem, BatchProgressなど）
//! - **repositories**: 外部協調者のtrait（インターフェース定義のみ）
//! - **services**: Domain Service（ファイル名からの撮影日時抽出）

pub mod entities;
pub mod repositories;
pub mod services;
