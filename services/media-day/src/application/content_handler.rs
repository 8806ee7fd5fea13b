// 写真配信ハンドラー
//
// Authorizationヘッダーの資格情報からユーザーを引き、登録された写真を
// S3から取得してZIPにまとめて返す。存在しない写真はスキップし、
// 1枚も取得できなければ404にする。内部エラーの詳細は応答に含めない。

use lambda_http::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_DISPOSITION,
    CONTENT_TYPE,
};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::Credential;
use crate::infrastructure::{build_zip, PhotoStore, PhotoStoreError, UserRepository};

const MISSING_HEADER_MESSAGE: &str = "Missing Authorization header";
const INVALID_HEADER_MESSAGE: &str = "Invalid Authorization header format";
const NO_PHOTOS_MESSAGE: &str = "No photos associated to this player";
const NO_RETRIEVABLE_PHOTOS_MESSAGE: &str = "No photos available for this player";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

const ZIP_CONTENT_TYPE: &str = "application/zip";
const ZIP_DISPOSITION: &str = "attachment; filename=photos.zip";

/// 写真配信リクエストを処理するハンドラー
pub struct ContentHandler<R, S>
where
    R: UserRepository,
    S: PhotoStore,
{
    repository: R,
    photo_store: S,
    /// CORS許可オリジン
    allow_origin: HeaderValue,
}

impl<R, S> ContentHandler<R, S>
where
    R: UserRepository,
    S: PhotoStore,
{
    pub fn new(repository: R, photo_store: S, allow_origin: HeaderValue) -> Self {
        Self {
            repository,
            photo_store,
            allow_origin,
        }
    }

    /// HTTPリクエストを処理
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        self.respond(authorization).await
    }

    /// Authorizationヘッダー値から応答を作る
    ///
    /// # 処理フロー
    /// 1. ヘッダーがなければ401
    /// 2. 資格情報をデコードできなければ400
    /// 3. ユーザーがいない、または写真が登録されていなければ404
    /// 4. 写真を順に取得（存在しないものはスキップ、それ以外の失敗は500）
    /// 5. 1枚も取得できなければ404、取得できた分をZIPにして200
    pub async fn respond(&self, authorization: Option<&str>) -> Response<Body> {
        let Some(header) = authorization.filter(|value| !value.trim().is_empty()) else {
            return self.json_error(StatusCode::UNAUTHORIZED, MISSING_HEADER_MESSAGE);
        };

        let credential = match Credential::decode(header) {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Authorizationヘッダーの形式が不正");
                return self.json_error(StatusCode::BAD_REQUEST, INVALID_HEADER_MESSAGE);
            }
        };

        let user = match self.repository.get(&credential.name).await {
            Ok(Some(user)) if !user.photos.is_empty() => user,
            Ok(_) => {
                info!(username = %credential.name, "写真が登録されていない");
                return self.json_error(StatusCode::NOT_FOUND, NO_PHOTOS_MESSAGE);
            }
            Err(e) => {
                error!(error = %e, "ユーザーの取得に失敗");
                return self.internal_error();
            }
        };

        let mut photos = Vec::with_capacity(user.photos.len());
        for key in &user.photos {
            match self.photo_store.fetch(key).await {
                Ok(content) => photos.push((key.clone(), content)),
                Err(PhotoStoreError::NotFound(_)) => {
                    warn!(key = %key, "写真が存在しないためスキップ");
                }
                Err(e) => {
                    error!(key = %key, error = %e, "写真の取得に失敗");
                    return self.internal_error();
                }
            }
        }

        if photos.is_empty() {
            return self.json_error(StatusCode::NOT_FOUND, NO_RETRIEVABLE_PHOTOS_MESSAGE);
        }

        let archive = match build_zip(&photos) {
            Ok(archive) => archive,
            Err(e) => {
                error!(error = %e, "ZIPの作成に失敗");
                return self.internal_error();
            }
        };

        info!(
            username = %credential.name,
            photos = photos.len(),
            bytes = archive.len(),
            "写真を配信"
        );

        let mut response = Response::new(Body::Binary(archive));
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(ZIP_CONTENT_TYPE));
        headers.insert(CONTENT_DISPOSITION, HeaderValue::from_static(ZIP_DISPOSITION));
        response
    }

    fn json_error(&self, status: StatusCode, message: &str) -> Response<Body> {
        json_error_response(status, message, Some(&self.allow_origin))
    }

    fn internal_error(&self) -> Response<Body> {
        self.json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

/// `{message, success: false}`形式のエラー応答
///
/// 設定を読み込めずオリジンが不明な場合は`allow_origin`に`None`を渡す。
pub fn json_error_response(
    status: StatusCode,
    message: &str,
    allow_origin: Option<&HeaderValue>,
) -> Response<Body> {
    let body = json!({ "message": message, "success": false }).to_string();

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(origin) = allow_origin {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    }

    let mut response = Response::new(Body::Text(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// 設定不備などで処理できない場合の500応答
pub fn internal_error_response() -> Response<Body> {
    json_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;
    use crate::infrastructure::photo_store::tests::MockPhotoStore;
    use crate::infrastructure::user_repository::tests::MockUserRepository;
    use crate::infrastructure::RepositoryError;
    use std::io::Cursor;
    use zip::ZipArchive;

    const ORIGIN: &str = "https://media.example.com";

    // ==================== テストヘルパー ====================

    fn user() -> UserRecord {
        UserRecord {
            username: "juan_garcia".to_string(),
            dnis: vec!["12345678Z".to_string()],
            photos: vec![
                "juan_garcia/001.png".to_string(),
                "juan_garcia/002.png".to_string(),
                "Teams/Alevin.png".to_string(),
            ],
        }
    }

    fn create_handler(
        repository: MockUserRepository,
        store: MockPhotoStore,
    ) -> ContentHandler<MockUserRepository, MockPhotoStore> {
        ContentHandler::new(repository, store, HeaderValue::from_static(ORIGIN))
    }

    fn header() -> String {
        Credential {
            document: "12345678Z".to_string(),
            name: "juan_garcia".to_string(),
        }
        .encode()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            _ => panic!("予期しないBody型"),
        }
    }

    fn zip_names(response: &Response<Body>) -> Vec<String> {
        let bytes = match response.body() {
            Body::Binary(bytes) => bytes.clone(),
            _ => panic!("予期しないBody型"),
        };
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    // ==================== 成功 ====================

    #[tokio::test]
    async fn test_returns_zip_of_all_photos() {
        let store = MockPhotoStore::new()
            .with_object("juan_garcia/001.png", b"1")
            .with_object("juan_garcia/002.png", b"2")
            .with_object("Teams/Alevin.png", b"t");
        let handler = create_handler(MockUserRepository::new().with_user(user()), store);

        let response = handler.respond(Some(&header())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/zip");
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=photos.zip"
        );
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
        assert_eq!(zip_names(&response), vec!["001.png", "002.png", "Alevin.png"]);
    }

    #[tokio::test]
    async fn test_missing_photos_are_skipped() {
        let store = MockPhotoStore::new().with_object("Teams/Alevin.png", b"t");
        let handler = create_handler(MockUserRepository::new().with_user(user()), store);

        let response = handler.respond(Some(&format!("Basic {}", header()))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(zip_names(&response), vec!["Alevin.png"]);
    }

    #[tokio::test]
    async fn test_handle_reads_header_from_request() {
        let store = MockPhotoStore::new().with_object("juan_garcia/001.png", b"1");
        let handler = create_handler(MockUserRepository::new().with_user(user()), store);
        let request = lambda_http::http::Request::builder()
            .uri("/content")
            .header("authorization", header())
            .body(Body::Empty)
            .unwrap();

        let response = handler.handle(&request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    // ==================== クライアントエラー ====================

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let handler = create_handler(MockUserRepository::new(), MockPhotoStore::new());

        let response = handler.respond(None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(&response);
        assert_eq!(body["message"], "Missing Authorization header");
        assert_eq!(body["success"], false);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    }

    #[tokio::test]
    async fn test_malformed_header_is_bad_request() {
        let handler = create_handler(MockUserRepository::new(), MockPhotoStore::new());

        let response = handler.respond(Some("***")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(&response)["message"],
            "Invalid Authorization header format"
        );
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let handler = create_handler(MockUserRepository::new(), MockPhotoStore::new());

        let response = handler.respond(Some(&header())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(&response)["message"],
            "No photos associated to this player"
        );
    }

    #[tokio::test]
    async fn test_user_without_photos_is_not_found() {
        let repository = MockUserRepository::new().with_user(UserRecord {
            photos: vec![],
            ..user()
        });
        let handler = create_handler(repository, MockPhotoStore::new());

        let response = handler.respond(Some(&header())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_no_retrievable_photo_is_not_found() {
        let handler = create_handler(
            MockUserRepository::new().with_user(user()),
            MockPhotoStore::new(),
        );

        let response = handler.respond(Some(&header())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(&response)["message"],
            "No photos available for this player"
        );
    }

    // ==================== サーバーエラー ====================

    #[tokio::test]
    async fn test_repository_error_hides_detail() {
        let repository = MockUserRepository::new();
        repository.set_next_error(RepositoryError::ReadError("secret detail".to_string()));
        let handler = create_handler(repository, MockPhotoStore::new());

        let response = handler.respond(Some(&header())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(&response);
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("error").is_none());
        assert!(!body.to_string().contains("secret detail"));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let store = MockPhotoStore::new()
            .with_object("juan_garcia/001.png", b"1")
            .with_failure(
                "juan_garcia/002.png",
                PhotoStoreError::ReadError("access denied".to_string()),
            );
        let handler = create_handler(MockUserRepository::new().with_user(user()), store);

        let response = handler.respond(Some(&header())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_response_without_origin() {
        let response = internal_error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
