// API Gateway Lambda Authorizerの応答（IAMポリシー）

use serde::{Deserialize, Serialize};

/// IAMポリシー言語のバージョン
pub const POLICY_VERSION: &str = "2012-10-17";

/// API呼び出しのアクション
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// 資格情報を特定できない場合のプリンシパル
pub const UNKNOWN_PRINCIPAL: &str = "unknown";

/// 許可/拒否
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

/// 許可時にAPI Gatewayへ渡すコンテキスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizerContext {
    pub username: String,
    pub dni: String,
}

/// Authorizerの応答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<AuthorizerContext>,
}

impl AuthorizerResponse {
    /// 1ステートメントのポリシーを生成する
    pub fn new(principal_id: impl Into<String>, effect: Effect, method_arn: &str) -> Self {
        Self {
            principal_id: principal_id.into(),
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![PolicyStatement {
                    action: INVOKE_ACTION.to_string(),
                    effect,
                    resource: method_arn.to_string(),
                }],
            },
            context: None,
        }
    }

    /// ユーザー名と書類番号をコンテキストに載せた許可ポリシー
    pub fn allow(username: &str, dni: &str, method_arn: &str) -> Self {
        Self {
            context: Some(AuthorizerContext {
                username: username.to_string(),
                dni: dni.to_string(),
            }),
            ..Self::new(username, Effect::Allow, method_arn)
        }
    }

    pub fn deny(principal_id: impl Into<String>, method_arn: &str) -> Self {
        Self::new(principal_id, Effect::Deny, method_arn)
    }

    /// 最初のステートメントの効果
    pub fn effect(&self) -> Option<Effect> {
        self.policy_document
            .statement
            .first()
            .map(|statement| statement.effect)
    }
}
