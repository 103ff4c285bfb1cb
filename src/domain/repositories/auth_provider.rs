//! # Authentication Provider Trait
//!
//! 外部の認証プロバイダーを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// 認証プロバイダー
///
/// OAuth同意フローの内部は実装側に閉じ込め、
/// SessionStateは結果の問い合わせのみ行う
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// プロバイダーの初期化
    ///
    /// 複数回呼ばれても2回目以降は何もしない
    ///
    /// # Errors
    ///
    /// 保存済みトークンの読み込みなどに失敗した場合にエラーを返す
    async fn initialize(&self) -> Result<()>;

    /// 必要な権限を持つ有効なトークンがあるかどうか
    fn is_authenticated(&self) -> bool;

    /// 対話的な同意フローを実行してアクセストークンを要求
    ///
    /// ユーザーが許可しなかった場合はエラーではなく、
    /// その後の `is_authenticated()` が `false` を返す
    ///
    /// # Errors
    ///
    /// 通信失敗など同意以外の理由で失敗した場合にエラーを返す
    async fn request_access_token(&self) -> Result<()>;

    /// 現在のアクセストークン（未取得なら空文字列）
    fn get_access_token(&self) -> String;
}
