//! # Batch Upload Use Case
//!
//! ファイルのリストを1件ずつ順番にアップロードし、全体の進捗を集計する
//!
//! ## 動作
//!
//! - 入力順に逐次処理（並列送信はしない）
//! - 1件の失敗はバッチを中断しない（失敗数として数えるのみ）
//! - 1件ごとに進捗レコードを更新し、`watch` チャネルで公開する
//! - 最後に割合を100に固定し、"Done!" と結果メッセージを設定する

use anyhow::{bail, Result};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::entities::batch_progress::BatchProgress;
use crate::domain::entities::session_status::Credential;
use crate::domain::entities::upload_item::UploadItem;
use crate::domain::repositories::upload_transport::UploadTransport;

/// バッチアップロードユースケース
pub struct BatchUploadUseCase<T: UploadTransport> {
    transport: Arc<T>,
    progress: watch::Sender<BatchProgress>,
    in_flight: AtomicBool,
}

/// 実行中フラグをスコープ終了時に戻す
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<T: UploadTransport> BatchUploadUseCase<T> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `transport` - アップロードトランスポート
    pub fn new(transport: Arc<T>) -> Self {
        let (progress, _) = watch::channel(BatchProgress::idle());
        Self {
            transport,
            progress,
            in_flight: AtomicBool::new(false),
        }
    }

    /// 進捗の変化を購読する
    pub fn subscribe(&self) -> watch::Receiver<BatchProgress> {
        self.progress.subscribe()
    }

    /// 現在の進捗のスナップショット
    pub fn progress(&self) -> BatchProgress {
        self.progress.borrow().clone()
    }

    /// バッチを実行する
    ///
    /// # Arguments
    ///
    /// * `items` - アップロードするアイテム（この順に処理される）
    /// * `credential` - バッチ開始時点のアクセストークン
    ///
    /// # Returns
    ///
    /// 完了時の進捗レコード（常に "Done!" で終わる）
    ///
    /// # Errors
    ///
    /// クレデンシャルが空、または別のバッチが実行中の場合にエラーを返す。
    /// 個々のアップロード失敗はエラーにならない
    pub async fn execute(
        &self,
        items: Vec<UploadItem>,
        credential: &Credential,
    ) -> Result<BatchProgress> {
        if credential.is_empty() {
            bail!("Cannot start an upload batch without an access token");
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            bail!("Another upload batch is already in progress");
        }
        let _guard = InFlightGuard(&self.in_flight);

        let total = items.len();
        info!("Starting upload batch of {} files", total);
        self.progress.send_replace(BatchProgress::start(total));

        for (index, item) in items.into_iter().enumerate() {
            let (bytes, filename) = item.into_parts();
            debug!(
                "Uploading {} ({} bytes, {}/{})",
                filename,
                bytes.len(),
                index + 1,
                total
            );

            let succeeded = match self
                .transport
                .upload(bytes, &filename, credential.as_str())
                .await
            {
                Ok(()) => {
                    info!("Uploaded {} ({}/{})", filename, index + 1, total);
                    true
                }
                Err(e) => {
                    warn!("Failed to upload {}: {}", filename, e);
                    false
                }
            };

            self.progress.send_modify(|progress| progress.record(succeeded));
        }

        self.progress.send_modify(BatchProgress::finish);

        let summary = self.progress();
        info!(
            "Upload batch finished: {}/{} succeeded, {} failed",
            summary.succeeded_count(),
            summary.total_count,
            summary.failed_count
        );

        Ok(summary)
    }
}
