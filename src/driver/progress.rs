//! Progress Renderer
//!
//! バッチ進捗チャネルに追従するプログレスバー

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::entities::batch_progress::BatchProgress;

/// `BatchProgress` のスナップショットを描画する
pub struct ProgressRenderer {
    bar: ProgressBar,
}

impl ProgressRenderer {
    /// stderrに描画するレンダラーを作成
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    /// 何も描画しないレンダラー（`--quiet` 用）
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// スナップショット1件をバーに反映
    pub fn apply(&self, progress: &BatchProgress) {
        self.bar.set_length(progress.total_count as u64);
        self.bar.set_position(progress.completed_count as u64);
        if progress.failed_count > 0 {
            self.bar.set_message(format!(
                "{} ({} failed)",
                progress.status_headline, progress.failed_count
            ));
        } else {
            self.bar.set_message(progress.status_headline.clone());
        }
    }

    /// バッチ完了または送信側の破棄までチャネルに追従する
    pub async fn run(self, mut progress: watch::Receiver<BatchProgress>) {
        loop {
            if progress.changed().await.is_err() {
                self.bar.abandon();
                return;
            }

            let snapshot = progress.borrow_and_update().clone();
            self.apply(&snapshot);

            if snapshot.is_done() {
                self.bar.finish_and_clear();
                return;
            }
        }
    }

    pub fn spawn(self, progress: watch::Receiver<BatchProgress>) -> JoinHandle<()> {
        tokio::spawn(self.run(progress))
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }

    #[cfg(test)]
    fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
