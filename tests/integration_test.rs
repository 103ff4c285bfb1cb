//! Integration tests for photosync
//!
//! File discovery, timestamp fixing and the Photos HTTP calls wired together
//! against a local mock server.

use photosync::adapter::photos::client::HttpPhotosApi;
use photosync::adapter::repositories::file_image_repository::FileImageRepository;
use photosync::adapter::repositories::photos_upload_transport::PhotosUploadTransport;
use photosync::application::use_cases::load_images::LoadImagesUseCase;
use photosync::application::use_cases::run_batch::BatchUploadUseCase;
use photosync::domain::entities::batch_progress::{BatchPhase, DONE_HEADLINE};
use photosync::domain::entities::session_status::Credential;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    let mut crc_input = chunk_type.to_vec();
    crc_input.extend_from_slice(data);
    out.extend_from_slice(&crc32fast::hash(&crc_input).to_be_bytes());
    out
}

/// Smallest structurally valid PNG the transport accepts
fn write_png(dir: &Path, name: &str) {
    let mut png = vec![137, 80, 78, 71, 13, 10, 26, 10];
    png.extend(chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]));
    png.extend(chunk(b"IDAT", &[0x78, 0x9c, 0x63, 0x00, 0x00]));
    png.extend(chunk(b"IEND", &[]));
    fs::write(dir.join(name), png).unwrap();
}

async fn mount_photos_api(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/uploads"))
        .and(header("X-Goog-Upload-File-Name", "b.png"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("upload-token"))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:batchCreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "newMediaItemResults": [{
                "uploadToken": "upload-token",
                "status": {"message": "Success"},
                "mediaItem": {"id": "item"}
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_directory_upload_with_one_failure() {
    let server = MockServer::start().await;
    mount_photos_api(&server).await;

    let temp_dir = TempDir::new().unwrap();
    write_png(temp_dir.path(), "a.png");
    write_png(temp_dir.path(), "b.png");
    write_png(temp_dir.path(), "VRChat_2024-05-06_07-08-09.000_1920x1080.png");
    fs::write(temp_dir.path().join("readme.txt"), "not an image").unwrap();

    let loader = LoadImagesUseCase::new(Arc::new(FileImageRepository::new()));
    let items = loader
        .execute(&[temp_dir.path().to_path_buf()])
        .await
        .unwrap();
    assert_eq!(items.len(), 3);

    let api = Arc::new(HttpPhotosApi::new(&server.uri(), 5).unwrap());
    let transport = Arc::new(PhotosUploadTransport::new(api, true));
    let batch = BatchUploadUseCase::new(transport);

    let progress = batch
        .execute(items, &Credential::new("ya29.integration"))
        .await
        .unwrap();

    assert_eq!(progress.total_count, 3);
    assert_eq!(progress.completed_count, 3);
    assert_eq!(progress.failed_count, 1);
    assert_eq!(progress.percent_complete, 100.0);
    assert_eq!(progress.phase, BatchPhase::Done);
    assert_eq!(progress.status_headline, DONE_HEADLINE);
    assert_eq!(progress.status_detail, "Failed to upload 1 files.");

    let requests = server.received_requests().await.unwrap();
    let uploads: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/v1/uploads")
        .collect();
    let creates = requests
        .iter()
        .filter(|r| r.url.path() == "/v1/mediaItems:batchCreate")
        .count();
    assert_eq!(uploads.len(), 3);
    assert_eq!(creates, 2);

    for upload in &uploads {
        assert_eq!(
            upload.headers.get("authorization").unwrap(),
            "Bearer ya29.integration"
        );
    }

    // only the file named with a capture time gets an eXIf chunk
    let vrchat = uploads
        .iter()
        .find(|r| {
            r.headers
                .get("x-goog-upload-file-name")
                .map(|v| v.to_str().unwrap().starts_with("VRChat_"))
                .unwrap_or(false)
        })
        .unwrap();
    assert!(vrchat
        .body
        .windows(19)
        .any(|w| w == b"2024:05:06 07:08:09"));
}

#[tokio::test]
async fn test_non_png_file_counts_as_failure() {
    let server = MockServer::start().await;
    mount_photos_api(&server).await;

    let temp_dir = TempDir::new().unwrap();
    write_png(temp_dir.path(), "a.png");
    fs::write(temp_dir.path().join("photo.jpg"), b"\xFF\xD8\xFF\xE0jpeg").unwrap();

    let loader = LoadImagesUseCase::new(Arc::new(FileImageRepository::new()));
    let items = loader
        .execute(&[
            temp_dir.path().join("photo.jpg"),
            temp_dir.path().join("a.png"),
        ])
        .await
        .unwrap();

    let api = Arc::new(HttpPhotosApi::new(&server.uri(), 5).unwrap());
    let batch = BatchUploadUseCase::new(Arc::new(PhotosUploadTransport::new(api, false)));

    let progress = batch
        .execute(items, &Credential::new("tok"))
        .await
        .unwrap();

    assert_eq!(progress.completed_count, 2);
    assert_eq!(progress.failed_count, 1);
    assert_eq!(progress.succeeded_count(), 1);
}
