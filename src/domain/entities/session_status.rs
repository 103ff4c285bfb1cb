//! # Session Status Entity
//!
//! 認証状態とアクセストークンのバリューオブジェクト

use std::fmt;

/// 認証セッションの状態
///
/// 起動時は `Checking` で始まり、初回チェックまたはサインイン後に
/// `Unauthenticated` か `Authenticated` に確定する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// 認証状態を確認中
    #[default]
    Checking,
    /// 未認証（サインインが必要）
    Unauthenticated,
    /// 認証済み（アップロード可能）
    Authenticated,
}

impl SessionStatus {
    /// アップロードを開始できる状態かどうか
    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Checking => "checking",
            SessionStatus::Unauthenticated => "unauthenticated",
            SessionStatus::Authenticated => "authenticated",
        };
        f.write_str(label)
    }
}

/// アクセストークン
///
/// SessionStateが所有し、オーケストレーターは参照のみ行う。
/// ログに漏れないよう `Debug` 出力は伏せ字にする
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// 新しいクレデンシャルを作成
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// トークン文字列への参照を返す
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// トークンが空かどうかを返す
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}
