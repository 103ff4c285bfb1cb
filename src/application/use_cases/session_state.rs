//! # Session State
//!
//! 認証状態を管理するユースケース
//!
//! オーケストレーターを起動できるかどうかの唯一の情報源。
//! 状態は `watch` チャネルで公開し、表示層は購読して画面を切り替える

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;

use crate::application::dto::sign_in_outcome::SignInOutcome;
use crate::domain::entities::session_status::{Credential, SessionStatus};
use crate::domain::repositories::auth_provider::AuthProvider;

/// セッション状態
///
/// 状態遷移:
/// - `Checking -> {Unauthenticated, Authenticated}`（初回チェック）
/// - `Unauthenticated -> {Unauthenticated, Authenticated}`（サインインごと）
/// - `Authenticated` はセッション中は終端
pub struct SessionState<A: AuthProvider> {
    auth_provider: Arc<A>,
    status: watch::Sender<SessionStatus>,
    credential: Option<Credential>,
    initialized: bool,
}

impl<A: AuthProvider> SessionState<A> {
    /// 新しいセッション状態を作成（状態は `Checking`）
    ///
    /// # Arguments
    ///
    /// * `auth_provider` - 認証プロバイダー
    pub fn new(auth_provider: Arc<A>) -> Self {
        let (status, _) = watch::channel(SessionStatus::Checking);
        Self {
            auth_provider,
            status,
            credential: None,
            initialized: false,
        }
    }

    /// 認証プロバイダーを初期化し、初回の状態チェックを行う
    ///
    /// 2回目以降の呼び出しは何もしない
    ///
    /// # Errors
    ///
    /// プロバイダーの初期化に失敗した場合にエラーを返す（状態は `Checking` のまま）
    pub async fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            debug!("Session state already initialized");
            return Ok(());
        }

        self.auth_provider
            .initialize()
            .await
            .context("Failed to initialize authentication provider")?;
        self.initialized = true;

        let status = self.resolve_from_provider();
        info!("Initial session status: {}", status);

        Ok(())
    }

    /// 現在の状態（キャッシュの読み取りのみ）
    pub fn current_status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// 現在のクレデンシャル（認証済みの場合のみ）
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// 状態の変化を購読する
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// 対話的な同意フローでサインインする
    ///
    /// # Returns
    ///
    /// サインイン後の状態。同意が得られなかった場合は
    /// `Unauthenticated` とユーザー向けの通知を返す
    ///
    /// # Errors
    ///
    /// 同意以外の理由（通信失敗など）でプロバイダーが失敗した場合にエラーを返す
    pub async fn sign_in(&mut self) -> Result<SignInOutcome> {
        self.initialize().await?;

        if self.current_status().is_authenticated() {
            debug!("Already signed in, skipping consent flow");
            return Ok(SignInOutcome::authenticated());
        }

        let requested = self.auth_provider.request_access_token().await;
        if let Err(e) = requested {
            self.status.send_replace(SessionStatus::Unauthenticated);
            return Err(e).context("Sign-in failed");
        }

        if self.resolve_from_provider().is_authenticated() {
            info!("Signed in successfully");
            Ok(SignInOutcome::authenticated())
        } else {
            warn!("Required permission was not granted");
            Ok(SignInOutcome::denied())
        }
    }

    /// プロバイダーに問い合わせて状態とクレデンシャルを確定する
    fn resolve_from_provider(&mut self) -> SessionStatus {
        let status = if self.auth_provider.is_authenticated() {
            let token = self.auth_provider.get_access_token();
            if token.is_empty() {
                warn!("Provider reported a session without an access token");
                self.credential = None;
                SessionStatus::Unauthenticated
            } else {
                self.credential = Some(Credential::new(token));
                SessionStatus::Authenticated
            }
        } else {
            self.credential = None;
            SessionStatus::Unauthenticated
        };

        self.status.send_replace(status);
        status
    }
}
