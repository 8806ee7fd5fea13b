/// 写真配信HTTP Lambdaエントリポイント
///
/// Authorizerを通過したリクエストの選手名から写真キーを引き、
/// S3の写真をZIPにまとめて返却する。
///
/// # 環境変数
/// - `USERS_TABLE_NAME`: ユーザーテーブル名（必須）
/// - `CONTENT_BUCKET_NAME`: 写真バケット名（必須）
/// - `CBTC_APP_URL`: CORSで許可するオリジン（必須）
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use lambda_http::http::HeaderValue;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use media_day::application::{internal_error_response, ContentHandler};
use media_day::infrastructure::{
    init_logging, ContentServiceConfig, DynamoUserRepository, S3PhotoStore,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("写真配信Lambda関数を初期化");

    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// 設定の読み込みに失敗した場合は詳細を含めない500を返す。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let config = match ContentServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "設定の読み込みに失敗");
            return Ok(internal_error_response());
        }
    };

    let allow_origin = match HeaderValue::from_str(config.app_url()) {
        Ok(origin) => origin,
        Err(e) => {
            error!(error = %e, app_url = %config.app_url(), "CORSオリジンが不正");
            return Ok(internal_error_response());
        }
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let repository = DynamoUserRepository::new(
        DynamoDbClient::new(&aws_config),
        config.users_table().to_string(),
    );
    let photo_store = S3PhotoStore::new(
        S3Client::new(&aws_config),
        config.bucket_name().to_string(),
    );

    let content_handler = ContentHandler::new(repository, photo_store, allow_origin);
    Ok(content_handler.handle(&request).await)
}
