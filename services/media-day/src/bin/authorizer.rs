/// API Gateway Lambda Authorizerエントリポイント
///
/// Authorizationヘッダーの「書類番号:名前」をusersテーブルと照合し、
/// execute-api:Invokeの許可または拒否ポリシーを返す。
///
/// # 環境変数
/// - `USERS_TABLE_NAME`: ユーザーテーブル名（デフォルト: users）
use aws_sdk_dynamodb::Client as DynamoDbClient;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use media_day::application::AuthorizerHandler;
use media_day::infrastructure::{init_logging, AuthorizerConfig, DynamoUserRepository};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("Authorizer Lambda関数を初期化");

    lambda_runtime::run(service_fn(handler)).await
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. テーブル名を環境から読み込み
/// 2. AuthorizerHandlerで資格情報を検証
/// 3. IAMポリシーをJSONで返却（判定不能な場合も拒否ポリシー）
async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AuthorizerConfig::from_env();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let repository = DynamoUserRepository::new(
        DynamoDbClient::new(&aws_config),
        config.users_table().to_string(),
    );

    let authorizer = AuthorizerHandler::new(repository);
    let response = authorizer.handle(&event.payload).await;

    Ok(serde_json::to_value(response)?)
}
