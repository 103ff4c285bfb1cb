//! Google OAuth Provider
//!
//! インストール型アプリのループバックフローによるGoogle認証

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;
use uuid::Uuid;

use super::consent::{ConsentCallback, ConsentListener};
use super::token_cache::{CachedToken, JsonTokenCache};
use crate::adapter::config::Config;
use crate::domain::repositories::auth_provider::AuthProvider;

/// トークンエンドポイントのレスポンス
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
    /// 付与されたスコープ（空白区切り）
    #[serde(default)]
    scope: Option<String>,
}

/// Google OAuth 2.0 プロバイダー
///
/// キャッシュ済みトークンの読み込み・更新と、ブラウザ同意によるトークン取得を行う
pub struct GoogleOAuthProvider {
    config: Config,
    http: reqwest::Client,
    cache: JsonTokenCache,
    token: RwLock<Option<CachedToken>>,
    initialized: AtomicBool,
}

impl GoogleOAuthProvider {
    /// 新しいプロバイダーを作成
    ///
    /// # Errors
    ///
    /// HTTPクライアントの作成に失敗した場合
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        let cache = JsonTokenCache::new(&config.token_cache_path);

        Ok(Self {
            config,
            http,
            cache,
            token: RwLock::new(None),
            initialized: AtomicBool::new(false),
        })
    }

    /// 同意画面のURLを組み立てる
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - ループバックのリダイレクト先
    /// * `state` - リダイレクトで照合するランダム値
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String> {
        let scope = self.config.scopes.join(" ");
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .context("Invalid auth_url in config")?;

        Ok(url.into())
    }

    fn current_token(&self) -> Option<CachedToken> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_token(&self, token: Option<CachedToken>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    async fn post_token_form(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(params)
            .send()
            .await
            .context("Failed to reach token endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("Token endpoint returned {}: {}", status, body);
        }

        response
            .json::<TokenResponse>()
            .await
            .context("Failed to parse token response")
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenResponse> {
        self.post_token_form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ])
        .await
        .context("Failed to exchange authorization code")
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        self.post_token_form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ])
        .await
        .context("Failed to refresh access token")
    }

    /// トークンレスポンスをメモリとディスクに保存
    async fn store(
        &self,
        response: TokenResponse,
        previous_refresh: Option<String>,
        fallback_scopes: Vec<String>,
    ) -> CachedToken {
        // scope省略時は要求どおり付与
        let scopes = match response.scope {
            Some(scope) => scope.split_whitespace().map(str::to_string).collect(),
            None => fallback_scopes,
        };
        let token = CachedToken {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: Utc::now() + ChronoDuration::seconds(response.expires_in),
            scopes,
        };

        if let Err(e) = self.cache.save(&token).await {
            warn!("Failed to save token cache (non-critical): {:#}", e);
        }
        self.set_token(Some(token.clone()));

        token
    }
}

#[async_trait]
impl AuthProvider for GoogleOAuthProvider {
    async fn initialize(&self) -> Result<()> {
        if self.initialized.load(Ordering::SeqCst) {
            return Ok(());
        }

        let cached = self.cache.load().await?;
        self.initialized.store(true, Ordering::SeqCst);

        let Some(token) = cached else {
            return Ok(());
        };

        if !token.is_expired(Utc::now()) {
            self.set_token(Some(token));
            return Ok(());
        }

        match token.refresh_token.clone() {
            Some(refresh_token) => match self.refresh(&refresh_token).await {
                Ok(response) => {
                    self.store(response, Some(refresh_token), token.scopes)
                        .await;
                    info!("Refreshed expired access token");
                }
                Err(e) => warn!("Could not refresh access token: {:#}", e),
            },
            None => info!("Cached access token expired, sign-in required"),
        }

        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.current_token()
            .map(|token| {
                !token.is_expired(Utc::now()) && token.has_scopes(&self.config.scopes)
            })
            .unwrap_or(false)
    }

    async fn request_access_token(&self) -> Result<()> {
        let listener = ConsentListener::bind(self.config.redirect_port).await?;
        let redirect_uri = listener.redirect_uri().to_string();
        let state = Uuid::new_v4().to_string();
        let consent_url = self.authorization_url(&redirect_uri, &state)?;

        println!("Open the following URL in your browser to grant access:");
        println!("  {}", consent_url);

        let wait = Duration::from_secs(self.config.consent_timeout_secs);
        let callback = match timeout(wait, listener.wait_for_callback()).await {
            Ok(callback) => callback?,
            Err(_) => {
                warn!("Timed out after {:?} waiting for consent", wait);
                return Ok(());
            }
        };

        match callback {
            ConsentCallback::Denied { error } => {
                warn!("Consent was not granted: {}", error);
                Ok(())
            }
            ConsentCallback::Granted {
                code,
                state: returned_state,
            } => {
                if returned_state.as_deref() != Some(state.as_str()) {
                    bail!("OAuth state mismatch in redirect, refusing authorization code");
                }

                let response = self.exchange_code(&code, &redirect_uri).await?;
                let token = self
                    .store(response, None, self.config.scopes.clone())
                    .await;

                if !token.has_scopes(&self.config.scopes) {
                    warn!(
                        "Granted scopes {:?} do not cover required scopes {:?}",
                        token.scopes, self.config.scopes
                    );
                }
                debug!("Access token expires at {}", token.expires_at);

                Ok(())
            }
        }
    }

    fn get_access_token(&self) -> String {
        self.current_token()
            .map(|token| token.access_token)
            .unwrap_or_default()
    }
}
