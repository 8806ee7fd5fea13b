/// Lambda関数の環境変数設定
///
/// バッチツールの設定はclapの`env`属性で同じ環境変数から読み込むため、ここには含めない。
use thiserror::Error;

/// usersテーブル名の環境変数
pub const USERS_TABLE_NAME_VAR: &str = "USERS_TABLE_NAME";
/// 写真バケット名の環境変数
pub const CONTENT_BUCKET_NAME_VAR: &str = "CONTENT_BUCKET_NAME";
/// CORS許可オリジンの環境変数
pub const APP_URL_VAR: &str = "CBTC_APP_URL";

/// Authorizerでテーブル名が未設定の場合の既定値
const DEFAULT_USERS_TABLE: &str = "users";

/// 設定のエラー型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// 必須の環境変数を読む（空文字列も未設定として扱う）
fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Authorizer Lambda設定
///
/// 以下の環境変数から読み込む:
/// - USERS_TABLE_NAME: usersテーブル名（未設定時は「users」）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerConfig {
    users_table: String,
}

impl AuthorizerConfig {
    pub fn from_env() -> Self {
        let users_table = required_var(USERS_TABLE_NAME_VAR)
            .unwrap_or_else(|_| DEFAULT_USERS_TABLE.to_string());
        Self { users_table }
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(users_table: String) -> Self {
        Self { users_table }
    }

    pub fn users_table(&self) -> &str {
        &self.users_table
    }
}

/// 写真配信Lambda設定
///
/// 以下の環境変数から読み込む（すべて必須）:
/// - CBTC_APP_URL: CORS許可オリジン
/// - USERS_TABLE_NAME: usersテーブル名
/// - CONTENT_BUCKET_NAME: 写真バケット名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentServiceConfig {
    app_url: String,
    users_table: String,
    bucket_name: String,
}

impl ContentServiceConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    /// 必要な環境変数が設定されていない場合はエラーを返す
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app_url: required_var(APP_URL_VAR)?,
            users_table: required_var(USERS_TABLE_NAME_VAR)?,
            bucket_name: required_var(CONTENT_BUCKET_NAME_VAR)?,
        })
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(app_url: String, users_table: String, bucket_name: String) -> Self {
        Self {
            app_url,
            users_table,
            bucket_name,
        }
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    pub fn users_table(&self) -> &str {
        &self.users_table
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}
