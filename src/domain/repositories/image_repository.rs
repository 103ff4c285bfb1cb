//! # Image Repository Trait
//!
//! 画像ファイルの発見と読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::entities::upload_item::UploadItem;

/// 画像リポジトリ
///
/// ユーザーが選択したパスから画像ファイルを発見し、読み込む
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// 画像ファイルを発見する
    ///
    /// # Arguments
    ///
    /// * `paths` - ファイルまたはディレクトリのパス
    ///
    /// # Returns
    ///
    /// 入力順を保った画像ファイルのパスのリスト
    ///
    /// # Errors
    ///
    /// 存在しないパスが含まれる場合にエラーを返す
    async fn discover_images(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>>;

    /// 画像ファイルを読み込む
    ///
    /// # Arguments
    ///
    /// * `path` - 画像ファイルのパス
    ///
    /// # Returns
    ///
    /// ファイル名とバイト列を持つアップロードアイテム
    async fn read_image(&self, path: &Path) -> Result<UploadItem>;
}
