use serde::{Deserialize, Serialize};

// Request body for mediaItems:batchCreate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateRequest {
    pub new_media_items: Vec<NewMediaItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    pub description: String,
    pub simple_media_item: SimpleMediaItem,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMediaItem {
    pub file_name: String,
    pub upload_token: String,
}

impl BatchCreateRequest {
    /// Single item request with an empty description
    pub fn single(upload_token: &str, filename: &str) -> Self {
        Self {
            new_media_items: vec![NewMediaItem {
                description: String::new(),
                simple_media_item: SimpleMediaItem {
                    file_name: filename.to_string(),
                    upload_token: upload_token.to_string(),
                },
            }],
        }
    }
}

// Response body for mediaItems:batchCreate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResponse {
    #[serde(default)]
    pub new_media_item_results: Vec<NewMediaItemResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItemResult {
    #[serde(default)]
    pub upload_token: Option<String>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub media_item: Option<MediaItem>,
}

// google.rpc.Status; code 0 (or omitted) is OK
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl NewMediaItemResult {
    pub fn is_success(&self) -> bool {
        self.status.as_ref().map(|s| s.code == 0).unwrap_or(true)
    }

    pub fn status_message(&self) -> String {
        self.status
            .as_ref()
            .map(|s| s.message.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_create_request_serialization() {
        let request = BatchCreateRequest::single("upload-token-1", "VRChat_2024-01-02.png");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "newMediaItems": [{
                    "description": "",
                    "simpleMediaItem": {
                        "fileName": "VRChat_2024-01-02.png",
                        "uploadToken": "upload-token-1"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_batch_create_response_success() {
        let json = r#"{
            "newMediaItemResults": [{
                "uploadToken": "tok",
                "status": {"message": "Success"},
                "mediaItem": {"id": "AF1Qip", "filename": "a.png", "mimeType": "image/png"}
            }]
        }"#;

        let response: BatchCreateResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.new_media_item_results.len(), 1);
        let result = &response.new_media_item_results[0];
        assert!(result.is_success());
        assert_eq!(result.media_item.as_ref().unwrap().id, "AF1Qip");
    }

    #[test]
    fn test_batch_create_response_failure() {
        let json = r#"{
            "newMediaItemResults": [{
                "uploadToken": "tok",
                "status": {"code": 3, "message": "Failed: There was an error while trying to create this media item."}
            }]
        }"#;

        let response: BatchCreateResponse = serde_json::from_str(json).unwrap();
        let result = &response.new_media_item_results[0];

        assert!(!result.is_success());
        assert!(result.status_message().starts_with("Failed"));
    }
}
