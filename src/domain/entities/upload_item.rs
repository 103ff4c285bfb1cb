//! # UploadItem Value Object
//!
//! アップロード対象ファイル1件のバリューオブジェクト

/// アップロードアイテム
///
/// ファイルから読み込んだ生バイト列とファイル名。
/// 読み込み後は不変で、トランスポート呼び出しで一度だけ消費される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    bytes: Vec<u8>,
    filename: String,
}

impl UploadItem {
    /// 新しいアップロードアイテムを作成
    ///
    /// # Arguments
    ///
    /// * `bytes` - ファイルの生バイト列
    /// * `filename` - ファイル名（ディレクトリを含まない）
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
        }
    }

    /// バイト列への参照を返す
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// ファイル名を返す
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// バイト数を返す
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 空ファイルかどうかを返す
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 所有権を移動して (バイト列, ファイル名) を返す
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_item_new() {
        let item = UploadItem::new(vec![1, 2, 3], "photo.png");

        assert_eq!(item.filename(), "photo.png");
        assert_eq!(item.bytes(), &[1, 2, 3]);
        assert_eq!(item.len(), 3);
        assert!(!item.is_empty());
    }

    #[test]
    fn test_upload_item_into_parts() {
        let item = UploadItem::new(vec![9], "a.png".to_string());

        let (bytes, filename) = item.into_parts();

        assert_eq!(bytes, vec![9]);
        assert_eq!(filename, "a.png");
    }
}
