//! JSON Token Cache
//!
//! アクセストークンをJSONファイルで永続化

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Tokens this close to expiry are treated as expired
const EXPIRY_SKEW_SECS: i64 = 60;

/// 保存済みトークン
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CachedToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    /// 実際に付与されたスコープ
    pub scopes: Vec<String>,
}

impl CachedToken {
    /// 有効期限切れ（または期限間近）かどうか
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }

    /// 必要なスコープがすべて付与されているかどうか
    pub fn has_scopes(&self, required: &[String]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }
}

/// JSONファイルベースのトークンキャッシュ
pub struct JsonTokenCache {
    path: PathBuf,
}

impl JsonTokenCache {
    /// 新しいキャッシュを作成（`~` は展開される）
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルからトークンを読み込む（同期処理）
    fn load_sync(path: &Path) -> Result<Option<CachedToken>> {
        if !path.exists() {
            info!("No cached token found at {}", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(path).context("Failed to read token cache file")?;
        let token: CachedToken =
            serde_json::from_str(&content).context("Failed to parse token cache JSON")?;

        info!("Loaded cached token (expires at {})", token.expires_at);

        Ok(Some(token))
    }

    /// ファイルにトークンを保存する（同期処理）
    fn save_sync(path: &Path, token: &CachedToken) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create token cache directory")?;
        }

        let json = serde_json::to_string_pretty(token).context("Failed to serialize token")?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // 新規作成時から所有者のみ読み書き可
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(path)
            .context("Failed to open token cache file")?;

        // 既存ファイルは mode() が効かないため明示的に絞る
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .context("Failed to restrict token cache permissions")?;
        }

        file.write_all(json.as_bytes())
            .context("Failed to write token cache file")?;

        info!("Saved token cache to {}", path.display());

        Ok(())
    }

    pub async fn load(&self) -> Result<Option<CachedToken>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    pub async fn save(&self, token: &CachedToken) -> Result<()> {
        let path = self.path.clone();
        let token = token.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &token))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
