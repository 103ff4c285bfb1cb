//! # Load Images Use Case
//!
//! 選択されたパスから画像を発見し、アップロードアイテムとして読み込むユースケース

use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::upload_item::UploadItem;
use crate::domain::repositories::image_repository::ImageRepository;

/// 画像読み込みユースケース
///
/// バッチ開始前にすべてのファイルをメモリに読み込む
pub struct LoadImagesUseCase<R: ImageRepository> {
    image_repository: Arc<R>,
}

impl<R: ImageRepository> LoadImagesUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `image_repository` - 画像リポジトリ
    pub fn new(image_repository: Arc<R>) -> Self {
        Self { image_repository }
    }

    /// 画像を発見する（読み込みは行わない）
    ///
    /// # Arguments
    ///
    /// * `paths` - ファイルまたはディレクトリのパス
    pub async fn discover(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        self.image_repository.discover_images(paths).await
    }

    /// 画像を発見して読み込む
    ///
    /// # Arguments
    ///
    /// * `paths` - ファイルまたはディレクトリのパス
    ///
    /// # Returns
    ///
    /// 発見順のアップロードアイテム
    ///
    /// # Errors
    ///
    /// パスが存在しない、またはファイルの読み込みに失敗した場合にエラーを返す
    pub async fn execute(&self, paths: &[PathBuf]) -> Result<Vec<UploadItem>> {
        let files = self.discover(paths).await?;

        let mut items = Vec::with_capacity(files.len());
        for file in &files {
            let item = self
                .image_repository
                .read_image(file)
                .await
                .with_context(|| format!("Failed to load image: {}", file.display()))?;
            items.push(item);
        }

        info!(
            "Loaded {} images ({} bytes total)",
            items.len(),
            items.iter().map(UploadItem::len).sum::<usize>()
        );

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;

    struct MockImageRepository {
        files: Vec<PathBuf>,
        unreadable: Option<PathBuf>,
    }

    #[async_trait]
    impl ImageRepository for MockImageRepository {
        async fn discover_images(&self, _paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
            Ok(self.files.clone())
        }

        async fn read_image(&self, path: &Path) -> Result<UploadItem> {
            if self.unreadable.as_deref() == Some(path) {
                anyhow::bail!("permission denied");
            }
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            Ok(UploadItem::new(name.as_bytes().to_vec(), name))
        }
    }

    #[tokio::test]
    async fn test_load_images_in_order() {
        let repo = Arc::new(MockImageRepository {
            files: vec![PathBuf::from("/shots/b.png"), PathBuf::from("/shots/a.png")],
            unreadable: None,
        });
        let use_case = LoadImagesUseCase::new(repo);

        let items = use_case.execute(&[PathBuf::from("/shots")]).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].filename(), "b.png");
        assert_eq!(items[1].filename(), "a.png");
    }

    #[tokio::test]
    async fn test_load_images_empty() {
        let repo = Arc::new(MockImageRepository {
            files: vec![],
            unreadable: None,
        });
        let use_case = LoadImagesUseCase::new(repo);

        let items = use_case.execute(&[PathBuf::from("/empty")]).await.unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_load_images_read_failure() {
        let repo = Arc::new(MockImageRepository {
            files: vec![PathBuf::from("/shots/a.png"), PathBuf::from("/shots/b.png")],
            unreadable: Some(PathBuf::from("/shots/b.png")),
        });
        let use_case = LoadImagesUseCase::new(repo);

        let result = use_case.execute(&[PathBuf::from("/shots")]).await;

        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("/shots/b.png"));
    }
}
