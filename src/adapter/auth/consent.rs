//! Loopback Consent Listener
//!
//! ブラウザでの同意後のリダイレクトを127.0.0.1で受け取る

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::debug;
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

const SUCCESS_PAGE: &str = "<!DOCTYPE html><html><body>\
<h1>photosync</h1><p>Authorization finished. You can close this window.</p>\
</body></html>";

/// リダイレクトで受け取った同意結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentCallback {
    Granted { code: String, state: Option<String> },
    Denied { error: String },
}

/// リダイレクトのクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl RedirectParams {
    /// 同意結果に変換（`code` も `error` もなければ `None`）
    pub fn into_callback(self) -> Option<ConsentCallback> {
        if let Some(error) = self.error {
            return Some(ConsentCallback::Denied { error });
        }
        self.code.map(|code| ConsentCallback::Granted {
            code,
            state: self.state,
        })
    }
}

type CallbackSender = Arc<watch::Sender<Option<ConsentCallback>>>;

async fn handle_redirect(
    State(sender): State<CallbackSender>,
    Query(params): Query<RedirectParams>,
) -> Response {
    let Some(callback) = params.into_callback() else {
        debug!("Ignoring redirect without code or error");
        return (StatusCode::BAD_REQUEST, "Missing authorization response").into_response();
    };

    // first callback wins
    sender.send_if_modified(|slot| {
        if slot.is_none() {
            *slot = Some(callback);
            true
        } else {
            false
        }
    });

    Html(SUCCESS_PAGE).into_response()
}

/// 同意リダイレクト用のループバックリスナー
pub struct ConsentListener {
    listener: TcpListener,
    redirect_uri: String,
}

impl ConsentListener {
    /// 127.0.0.1 にバインドする（port 0 は空きポートを自動選択）
    pub async fn bind(port: u16) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("Failed to bind loopback port {}", port))?;
        let local = listener
            .local_addr()
            .context("Failed to read loopback address")?;
        let redirect_uri = format!("http://127.0.0.1:{}", local.port());

        debug!("Listening for OAuth redirect on {}", redirect_uri);

        Ok(Self {
            listener,
            redirect_uri,
        })
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// 同意結果を含むリダイレクトを1件受け取るまで待つ
    ///
    /// 無関係なリクエスト（favicon、`code` のないクエリ等）には404/400を返して待ち続け、
    /// 結果を受け取ったらサーバーを停止する
    pub async fn wait_for_callback(self) -> Result<ConsentCallback> {
        let (sender, mut received) = watch::channel(None);
        let app = Router::new()
            .route("/", get(handle_redirect))
            .with_state(Arc::new(sender));

        let mut shutdown = received.clone();
        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(Option::is_some).await;
            })
            .await
            .context("Consent listener failed")?;

        let callback = received.borrow_and_update().clone();
        callback.context("Consent listener stopped before a redirect arrived")
    }
}
