//! Photos Upload Transport Implementation
//!
//! UploadTransportのGoogle Photos実装

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use crate::adapter::photos::client::PhotosApi;
use crate::adapter::photos::timestamp::{embed_capture_time, is_png};
use crate::domain::repositories::upload_transport::{TransportError, UploadTransport};
use crate::domain::services::capture_time::CaptureTimeService;

const PNG_MIME_TYPE: &str = "image/png";

/// Google Photosアップロードトランスポート
///
/// PNG検証 → キャプチャ日時の埋め込み → バイト列アップロード → メディアアイテム作成
pub struct PhotosUploadTransport<P: PhotosApi> {
    api: Arc<P>,
    fix_timestamps: bool,
}

impl<P: PhotosApi> PhotosUploadTransport<P> {
    /// 新しいトランスポートを作成
    ///
    /// # Arguments
    ///
    /// * `api` - Photos APIクライアント
    /// * `fix_timestamps` - ファイル名から復元した撮影日時を埋め込むかどうか
    pub fn new(api: Arc<P>, fix_timestamps: bool) -> Self {
        Self {
            api,
            fix_timestamps,
        }
    }

    fn prepare(&self, bytes: Vec<u8>, filename: &str) -> Result<Vec<u8>, TransportError> {
        if !self.fix_timestamps {
            return Ok(bytes);
        }

        match CaptureTimeService::from_filename(filename) {
            Some(captured_at) => {
                let exif_datetime = CaptureTimeService::to_exif_datetime(&captured_at);
                debug!("Embedding capture time {} into {}", exif_datetime, filename);
                embed_capture_time(bytes, &exif_datetime)
            }
            None => {
                warn!(
                    "No capture time found in {}, uploading without timestamp fix",
                    filename
                );
                Ok(bytes)
            }
        }
    }
}

#[async_trait]
impl<P: PhotosApi> UploadTransport for PhotosUploadTransport<P> {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        token: &str,
    ) -> Result<(), TransportError> {
        if !is_png(&bytes) {
            return Err(TransportError::UnsupportedFormat {
                filename: filename.to_string(),
            });
        }

        let payload = self.prepare(bytes, filename)?;
        let upload_token = self
            .api
            .upload_bytes(payload, filename, PNG_MIME_TYPE, token)
            .await?;
        self.api
            .create_media_item(&upload_token, filename, token)
            .await
    }
}
