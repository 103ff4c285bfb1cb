//! PNG Capture Time Embedding
//!
//! PNGのEXIFに DateTimeOriginal を書き込む（既存のタグは保持する）

use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;
use log::debug;

use crate::domain::repositories::upload_transport::TransportError;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Raw `eXIf` chunk, not zTXt
const PNG_EXTENSION: FileExtension = FileExtension::PNG {
    as_zTXt_chunk: false,
};

/// PNGシグネチャで始まるかどうか
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() >= PNG_SIGNATURE.len() && bytes[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// キャプチャ日時を埋め込んだPNGを返す
///
/// 既存のEXIFを読み込み、DateTimeOriginal だけを上書きして書き戻す
///
/// # Arguments
///
/// * `png` - PNGの生バイト列
/// * `exif_datetime` - `YYYY:MM:DD HH:MM:SS` 形式の日時
///
/// # Errors
///
/// PNGでない、またはEXIFの書き込みに失敗した場合
/// `TransportError::InvalidPayload` を返す
pub fn embed_capture_time(
    mut png: Vec<u8>,
    exif_datetime: &str,
) -> Result<Vec<u8>, TransportError> {
    if !is_png(&png) {
        return Err(TransportError::InvalidPayload(
            "Missing PNG signature".to_string(),
        ));
    }

    let mut metadata = match Metadata::new_from_vec(&png, PNG_EXTENSION) {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!("No readable EXIF in PNG, starting empty: {}", e);
            Metadata::new()
        }
    };

    metadata.set_tag(ExifTag::DateTimeOriginal(exif_datetime.to_string()));

    metadata
        .write_to_vec(&mut png, PNG_EXTENSION)
        .map_err(|e| TransportError::InvalidPayload(format!("Error writing EXIF data: {}", e)))?;

    Ok(png)
}
