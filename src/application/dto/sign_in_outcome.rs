//! # Sign-in Outcome DTO
//!
//! サインイン結果のData Transfer Object

use crate::domain::entities::session_status::SessionStatus;

/// 権限が付与されなかった時にユーザーへ表示するメッセージ
pub const CONSENT_DENIED_NOTICE: &str = "You must grant the permission to use this app.";

/// サインイン結果
///
/// 同意拒否はエラーではなく、未認証の状態と通知メッセージで表す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    /// サインイン後の状態
    pub status: SessionStatus,
    /// ユーザー向けの通知（同意拒否時のみ）
    pub notice: Option<String>,
}

impl SignInOutcome {
    /// 認証成功の結果を作成
    pub fn authenticated() -> Self {
        Self {
            status: SessionStatus::Authenticated,
            notice: None,
        }
    }

    /// 同意拒否の結果を作成
    pub fn denied() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            notice: Some(CONSENT_DENIED_NOTICE.to_string()),
        }
    }

    /// 認証に成功したかどうか
    pub fn is_authenticated(&self) -> bool {
        self.status.is_authenticated()
    }
}
