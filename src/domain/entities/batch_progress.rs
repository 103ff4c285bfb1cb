//! # BatchProgress Entity
//!
//! バッチアップロードの進捗と状態メッセージ

/// 待機中の見出し
pub const IDLE_HEADLINE: &str = "Please select files to upload.";
/// 待機中の詳細メッセージ
pub const IDLE_DETAIL: &str = "Waiting for you to select files to upload.";
/// アップロード中の見出し
pub const UPLOADING_HEADLINE: &str = "Uploading...";
/// アップロード中の詳細メッセージ
pub const UPLOADING_DETAIL: &str = "Fixing timestamps and uploading...";
/// 完了時の見出し
pub const DONE_HEADLINE: &str = "Done!";
/// 全件成功時の詳細メッセージ
pub const ALL_SUCCEEDED_DETAIL: &str = "All files uploaded successfully.";

/// バッチのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPhase {
    /// バッチ未開始
    #[default]
    Idle,
    /// アップロード中
    Uploading,
    /// 完了（成功・失敗を問わず）
    Done,
}

/// バッチ進捗
///
/// 実行中または完了したバッチを表す共有レコード。
/// 書き込みはオーケストレーターのみ、読み取りは表示層が行う
///
/// 不変条件:
/// - `failed_count <= completed_count <= total_count`
/// - `completed_count == total_count` の時 `percent_complete == 100.0`
#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress {
    pub completed_count: usize,
    pub total_count: usize,
    pub failed_count: usize,
    pub percent_complete: f64,
    pub status_headline: String,
    pub status_detail: String,
    pub phase: BatchPhase,
}

impl BatchProgress {
    /// バッチ開始前の待機状態
    pub fn idle() -> Self {
        Self {
            completed_count: 0,
            total_count: 0,
            failed_count: 0,
            percent_complete: 0.0,
            status_headline: IDLE_HEADLINE.to_string(),
            status_detail: IDLE_DETAIL.to_string(),
            phase: BatchPhase::Idle,
        }
    }

    /// 新しいバッチの進捗を作成
    ///
    /// # Arguments
    ///
    /// * `total_count` - バッチ内のアイテム数（バッチ中は固定）
    pub fn start(total_count: usize) -> Self {
        Self {
            completed_count: 0,
            total_count,
            failed_count: 0,
            percent_complete: 0.0,
            status_headline: UPLOADING_HEADLINE.to_string(),
            status_detail: UPLOADING_DETAIL.to_string(),
            phase: BatchPhase::Uploading,
        }
    }

    /// アイテム1件の完了を記録
    ///
    /// 成功・失敗を問わず完了数を進め、割合を再計算する
    ///
    /// # Arguments
    ///
    /// * `succeeded` - トランスポート呼び出しが成功したかどうか
    pub fn record(&mut self, succeeded: bool) {
        if self.completed_count >= self.total_count {
            log::warn!(
                "Ignoring progress record beyond batch size ({}/{})",
                self.completed_count,
                self.total_count
            );
            return;
        }

        self.completed_count += 1;
        if !succeeded {
            self.failed_count += 1;
        }
        self.percent_complete = self.completed_count as f64 / self.total_count as f64 * 100.0;
    }

    /// バッチを完了状態にする
    ///
    /// 浮動小数点の誤差に関わらず割合は正確に100になる
    pub fn finish(&mut self) {
        self.percent_complete = 100.0;
        self.phase = BatchPhase::Done;
        self.status_headline = DONE_HEADLINE.to_string();
        self.status_detail = if self.failed_count == 0 {
            ALL_SUCCEEDED_DETAIL.to_string()
        } else {
            format!("Failed to upload {} files.", self.failed_count)
        };
    }

    /// 成功したアイテム数
    #[inline]
    pub fn succeeded_count(&self) -> usize {
        self.completed_count - self.failed_count
    }

    /// バッチが完了したかどうか
    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == BatchPhase::Done
    }
}

impl Default for BatchProgress {
    fn default() -> Self {
        Self::idle()
    }
}
