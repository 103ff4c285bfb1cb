//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapter::auth::GoogleOAuthProvider;
use crate::adapter::config::Config;
use crate::adapter::photos::client::HttpPhotosApi;
use crate::adapter::repositories::file_image_repository::FileImageRepository;
use crate::adapter::repositories::photos_upload_transport::PhotosUploadTransport;
use crate::application::use_cases::load_images::LoadImagesUseCase;
use crate::application::use_cases::run_batch::BatchUploadUseCase;
use crate::application::use_cases::session_state::SessionState;
use crate::domain::entities::batch_progress::BatchProgress;
use crate::domain::services::capture_time::CaptureTimeService;

use super::cli::Args;
use super::progress::ProgressRenderer;

/// Human readable capture time for a file name
pub fn describe_capture_time(filename: &str) -> String {
    match CaptureTimeService::from_filename(filename) {
        Some(captured_at) => captured_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "no capture time in name".to_string(),
    }
}

/// バッチ完了時に表示する結果行
///
/// 空のバッチでも「Done!」と全件成功のメッセージを返す
pub fn summary_lines(progress: &BatchProgress) -> Vec<String> {
    let detail = if progress.failed_count > 0 {
        format!("⚠ {}", progress.status_detail)
    } else {
        format!("  {}", progress.status_detail)
    };
    vec![format!("✓ {}", progress.status_headline), detail]
}

/// Photo Upload Workflow
pub struct UploadWorkflow {
    config: Config,
    load_use_case: LoadImagesUseCase<FileImageRepository>,
}

impl UploadWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let image_repo = Arc::new(FileImageRepository::new());
        let load_use_case = LoadImagesUseCase::new(image_repo);

        Self {
            config,
            load_use_case,
        }
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting photo uploader...");
        info!("Dry run: {}", args.dry_run);

        let fix_timestamps = self.config.fix_timestamps && !args.no_fix_timestamps;

        if args.dry_run {
            return self.preview(&args.paths, fix_timestamps).await;
        }

        // Sign in
        let auth_provider = Arc::new(GoogleOAuthProvider::new(self.config.clone())?);
        let mut session = SessionState::new(auth_provider);
        session.initialize().await?;

        if !session.current_status().is_authenticated() {
            println!("⚠ Not signed in, starting Google sign-in...");
            let outcome = session.sign_in().await?;
            if !outcome.is_authenticated() {
                if let Some(notice) = outcome.notice {
                    println!("✗ {}", notice);
                }
                return Ok(());
            }
        }
        let credential = session
            .credential()
            .cloned()
            .context("Signed in without an access token")?;
        println!("✓ Signed in to Google Photos");

        // Load files
        let items = self.load_use_case.execute(&args.paths).await?;
        println!("✓ Loaded {} files", items.len());

        // Upload
        let api = Arc::new(HttpPhotosApi::new(
            &self.config.api_base_url,
            self.config.request_timeout_secs,
        )?);
        let transport = Arc::new(PhotosUploadTransport::new(api, fix_timestamps));
        let batch = BatchUploadUseCase::new(transport);

        let renderer = if args.quiet {
            ProgressRenderer::hidden()
        } else {
            ProgressRenderer::new()
        };
        let handle = renderer.spawn(batch.subscribe());

        let result = batch.execute(items, &credential).await;
        if result.is_ok() {
            let _ = handle.await;
        } else {
            handle.abort();
        }
        let progress = result?;

        for line in summary_lines(&progress) {
            println!("{}", line);
        }

        Ok(())
    }

    /// List what would be uploaded without signing in
    async fn preview(&self, paths: &[PathBuf], fix_timestamps: bool) -> Result<()> {
        let files = self.load_use_case.discover(paths).await?;
        println!("✓ Dry-run mode (not actually uploading)");
        println!("  Would upload {} files:", files.len());

        for file in &files {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if fix_timestamps {
                println!("    - {} | {}", file.display(), describe_capture_time(&name));
            } else {
                println!("    - {}", file.display());
            }
        }

        Ok(())
    }
}
