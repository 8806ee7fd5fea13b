/// Authorizerハンドラー
///
/// API GatewayのLambda Authorizerイベントから資格情報を取り出し、
/// usersテーブルのレコードと照合してIAMポリシーを返す。
/// 判定できない場合はすべて拒否ポリシーになり、エラーは返さない。
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::policy::UNKNOWN_PRINCIPAL;
use crate::domain::{AuthorizerResponse, Credential};
use crate::infrastructure::UserRepository;

/// 資格情報を探すヘッダー名（大文字小文字の両方）
const AUTHORIZATION_HEADERS: &[&str] = &["authorization", "Authorization"];

/// Authorizerリクエストを処理するハンドラー
pub struct AuthorizerHandler<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> AuthorizerHandler<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Authorizerイベントを処理
    ///
    /// # 処理フロー
    /// 1. `headers.authorization`、`headers.Authorization`、`authorizationToken`の順に資格情報を探す
    /// 2. 「書類番号:名前」にデコード（失敗時はプリンシパル「unknown」で拒否）
    /// 3. 名前でユーザーを取得（見つからなければ名前をプリンシパルとして拒否）
    /// 4. 書類番号がユーザーのdnisに含まれていれば許可
    ///
    /// リポジトリのエラーはプリンシパル「unknown」で拒否する。
    pub async fn handle(&self, event: &Value) -> AuthorizerResponse {
        let method_arn = event
            .get("methodArn")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let Some(header) = Self::extract_header(event) else {
            warn!("Authorizationヘッダーがない");
            return AuthorizerResponse::deny(UNKNOWN_PRINCIPAL, method_arn);
        };

        let credential = match Credential::decode(header) {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "資格情報をデコードできない");
                return AuthorizerResponse::deny(UNKNOWN_PRINCIPAL, method_arn);
            }
        };

        let user = match self.repository.get(&credential.name).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(username = %credential.name, "ユーザーが見つからない");
                return AuthorizerResponse::deny(&credential.name, method_arn);
            }
            Err(e) => {
                error!(error = %e, "ユーザーの取得に失敗");
                return AuthorizerResponse::deny(UNKNOWN_PRINCIPAL, method_arn);
            }
        };

        if !user.contains_document(&credential.document) {
            warn!(username = %credential.name, "書類番号がユーザーに紐づいていない");
            return AuthorizerResponse::deny(&credential.name, method_arn);
        }

        info!(username = %credential.name, "認可成功");
        AuthorizerResponse::allow(&credential.name, &credential.document, method_arn)
    }

    fn extract_header(event: &Value) -> Option<&str> {
        let headers = event.get("headers");
        AUTHORIZATION_HEADERS
            .iter()
            .find_map(|name| headers.and_then(|h| h.get(*name)).and_then(|v| v.as_str()))
            .or_else(|| event.get("authorizationToken").and_then(|v| v.as_str()))
            .filter(|value| !value.trim().is_empty())
    }
}
