/// 写真オブジェクトの取得
///
/// 写真はS3バケットに`{username}/001.png`などのキーで置かれている。
/// オブジェクトが存在しない場合は他のエラーと区別して返す。
///
/// 実行ロールに`s3:ListBucket`がないと、S3は存在しないキーに対して
/// NoSuchKeyではなく403 AccessDeniedを返す。そのため単一キーの403も
/// 「存在しない」として扱う。
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;
use tracing::warn;

/// ListBucket権限がない場合に存在しないキーへ返されるステータス
const ACCESS_DENIED_STATUS: u16 = 403;

/// 写真取得のエラー型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhotoStoreError {
    /// オブジェクトが存在しない（スキップしてよい）
    #[error("Object not found: {0}")]
    NotFound(String),

    /// 取得または本文の読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),
}

/// 写真ストア操作用トレイト
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// キーを指定してオブジェクトの内容を取得
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, PhotoStoreError>;
}

/// PhotoStoreのS3実装
#[derive(Debug, Clone)]
pub struct S3PhotoStore {
    client: S3Client,
    bucket_name: String,
}

impl S3PhotoStore {
    pub fn new(client: S3Client, bucket_name: String) -> Self {
        Self {
            client,
            bucket_name,
        }
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, PhotoStoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let no_such_key = e
                    .as_service_error()
                    .is_some_and(|service_error| service_error.is_no_such_key());
                let status = e.raw_response().map(|response| response.status().as_u16());
                if is_missing_object(no_such_key, status) {
                    if !no_such_key {
                        warn!(key = %key, "403を存在しないオブジェクトとして扱う");
                    }
                    PhotoStoreError::NotFound(key.to_string())
                } else {
                    PhotoStoreError::ReadError(e.to_string())
                }
            })?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| PhotoStoreError::ReadError(e.to_string()))?;

        Ok(body.into_bytes().to_vec())
    }
}

/// GetObjectの失敗が「オブジェクトなし」かどうか
fn is_missing_object(no_such_key: bool, status: Option<u16>) -> bool {
    no_such_key || status == Some(ACCESS_DENIED_STATUS)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_photo_store_error_display() {
        assert_eq!(
            PhotoStoreError::NotFound("a/001.png".to_string()).to_string(),
            "Object not found: a/001.png"
        );
        assert_eq!(
            PhotoStoreError::ReadError("timeout".to_string()).to_string(),
            "Read error: timeout"
        );
    }

    #[test]
    fn test_is_missing_object() {
        assert!(is_missing_object(true, Some(404)));
        // ListBucket権限なしで存在しないキーを取得した場合
        assert!(is_missing_object(false, Some(403)));
        assert!(!is_missing_object(false, Some(500)));
        assert!(!is_missing_object(false, Some(503)));
        // タイムアウトなど応答がない場合
        assert!(!is_missing_object(false, None));
    }

    /// ユニットテスト用のモックPhotoStore
    ///
    /// 登録されていないキーは`NotFound`になる。
    #[derive(Debug, Clone, Default)]
    pub struct MockPhotoStore {
        objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        /// キーごとに返すエラー
        failures: Arc<Mutex<HashMap<String, PhotoStoreError>>>,
    }

    impl MockPhotoStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_object(self, key: &str, content: &[u8]) -> Self {
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), content.to_vec());
            self
        }

        pub fn with_failure(self, key: &str, error: PhotoStoreError) -> Self {
            self.failures
                .lock()
                .unwrap()
                .insert(key.to_string(), error);
            self
        }
    }

    #[async_trait]
    impl PhotoStore for MockPhotoStore {
        async fn fetch(&self, key: &str) -> Result<Vec<u8>, PhotoStoreError> {
            if let Some(error) = self.failures.lock().unwrap().get(key) {
                return Err(error.clone());
            }
            self.objects
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| PhotoStoreError::NotFound(key.to_string()))
        }
    }

    #[tokio::test]
    async fn test_mock_missing_key_is_not_found() {
        let store = MockPhotoStore::new().with_object("a/001.png", b"png");

        assert_eq!(store.fetch("a/001.png").await.unwrap(), b"png".to_vec());
        assert_eq!(
            store.fetch("a/002.png").await,
            Err(PhotoStoreError::NotFound("a/002.png".to_string()))
        );
    }
}
