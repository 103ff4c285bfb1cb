//! File Image Repository Implementation
//!
//! ImageRepositoryのファイルシステム実装

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::upload_item::UploadItem;
use crate::domain::repositories::image_repository::ImageRepository;

/// ファイルシステムベースの画像リポジトリ
pub struct FileImageRepository;

impl FileImageRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    fn is_png_path(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("png"))
            .unwrap_or(false)
    }

    /// 画像を発見する（内部実装）
    ///
    /// 明示されたファイルはそのまま、ディレクトリは再帰的に走査してPNGのみを名前順で追加
    fn discover_images_internal(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut images = Vec::new();

        for path in paths {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());

            if !expanded.exists() {
                bail!("Path does not exist: {}", expanded.display());
            }

            if expanded.is_file() {
                images.push(expanded);
                continue;
            }

            let before = images.len();
            for entry in WalkDir::new(&expanded)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let entry_path = entry.path();
                if entry_path.is_file() && Self::is_png_path(entry_path) {
                    images.push(entry_path.to_path_buf());
                }
            }

            debug!(
                "Found {} PNG files in {}",
                images.len() - before,
                expanded.display()
            );
        }

        info!("Discovered {} images", images.len());

        Ok(images)
    }

    /// 画像を読み込む（同期処理）
    fn read_image_sync(path: &Path) -> Result<UploadItem> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .with_context(|| format!("Path has no file name: {}", path.display()))?;

        Ok(UploadItem::new(bytes, filename))
    }
}

#[async_trait]
impl ImageRepository for FileImageRepository {
    async fn discover_images(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let paths = paths.to_vec();
        tokio::task::spawn_blocking(move || Self::discover_images_internal(&paths))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn read_image(&self, path: &Path) -> Result<UploadItem> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::read_image_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FileImageRepository {
    fn default() -> Self {
        Self::new()
    }
}
