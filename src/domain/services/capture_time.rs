//! # Capture Time Service
//!
//! ファイル名から撮影日時を抽出するサービス

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// 日付と時刻の区切りは `-` `_` `.` `:` 空白 ` at ` のいずれか、または無し
static CAPTURE_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d{4})-?(\d{2})-?(\d{2})(?:[ _T-]|\sat\s)?(\d{2})[-:._]?(\d{2})[-:._]?(\d{2})",
    )
    .unwrap()
});

/// 撮影日時サービス
///
/// スクリーンショットの命名規則（VRChat, Android, macOSなど）から
/// ローカル時刻の撮影日時を読み取る
pub struct CaptureTimeService;

impl CaptureTimeService {
    /// ファイル名から撮影日時を抽出
    ///
    /// # Arguments
    ///
    /// * `filename` - ファイル名（パスを含んでもよい）
    ///
    /// # Returns
    ///
    /// 暦として正しい最初の日時。見つからなければ `None`
    pub fn from_filename(filename: &str) -> Option<NaiveDateTime> {
        CAPTURE_TIME_PATTERN
            .captures_iter(filename)
            .find_map(|caps| {
                let field = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();

                let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
                NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?.and_hms_opt(
                    field(4)?,
                    field(5)?,
                    field(6)?,
                )
            })
    }

    /// EXIFの日時形式（`YYYY:MM:DD HH:MM:SS`）に整形
    pub fn to_exif_datetime(datetime: &NaiveDateTime) -> String {
        datetime.format("%Y:%m:%d %H:%M:%S").to_string()
    }
}
