/// DynamoDBのusersテーブルにアクセスするリポジトリ
///
/// アップローダーが書き込み、AuthorizerとContent Serviceが読み取る。
/// アイテムとUserRecordの変換はserde_dynamoで行う。
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::UserRecord;

/// パーティションキーの属性名
const USERNAME_KEY: &str = "username";

/// BatchWriteItemは1回最大25件まで
const BATCH_SIZE: usize = 25;

/// 未処理アイテムの再送回数の上限
const MAX_UNPROCESSED_RETRIES: u32 = 5;

/// 再送前の待機時間の単位（回数に比例して延ばす）
const RETRY_BACKOFF_MILLIS: u64 = 100;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// usersテーブル操作用トレイト
///
/// 実際のDynamoDBとテスト用モックを差し替えられるように抽象化する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザー名でレコードを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(UserRecord))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(RepositoryError)`
    async fn get(&self, username: &str) -> Result<Option<UserRecord>, RepositoryError>;

    /// レコードをまとめて保存（同じユーザー名は上書き）
    ///
    /// # 戻り値
    /// * 成功時は保存した件数
    /// * 失敗時は`Err(RepositoryError)`
    async fn put_all(&self, records: &[UserRecord]) -> Result<usize, RepositoryError>;
}

/// UserRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoUserRepository {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoUserRepository {
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// UserRecordをPutリクエストに変換
    fn to_write_request(record: &UserRecord) -> Result<WriteRequest, RepositoryError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(record)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let put_request = PutRequest::builder()
            .set_item(Some(item))
            .build()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(WriteRequest::builder().put_request(put_request).build())
    }

    /// 1チャンクを書き込み、未処理アイテムは上限回数まで再送する
    async fn write_chunk(&self, chunk: Vec<WriteRequest>) -> Result<(), RepositoryError> {
        let mut pending = chunk;
        let mut attempt = 0;

        while !pending.is_empty() {
            if attempt > MAX_UNPROCESSED_RETRIES {
                return Err(RepositoryError::WriteError(format!(
                    "{} items left unprocessed after {} retries",
                    pending.len(),
                    MAX_UNPROCESSED_RETRIES
                )));
            }
            if attempt > 0 {
                warn!(
                    unprocessed = pending.len(),
                    attempt = attempt,
                    "未処理アイテムを再送"
                );
                tokio::time::sleep(Duration::from_millis(
                    RETRY_BACKOFF_MILLIS * u64::from(attempt),
                ))
                .await;
            }

            let response = self
                .client
                .batch_write_item()
                .request_items(&self.table_name, pending)
                .send()
                .await
                .map_err(|e| RepositoryError::WriteError(e.to_string()))?;

            pending = response
                .unprocessed_items
                .and_then(|mut unprocessed| unprocessed.remove(&self.table_name))
                .unwrap_or_default();
            attempt += 1;
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for DynamoUserRepository {
    async fn get(&self, username: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(USERNAME_KEY, AttributeValue::S(username.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.to_string()))?;

        match result.item {
            Some(item) => {
                let record: UserRecord = serde_dynamo::from_item(item)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn put_all(&self, records: &[UserRecord]) -> Result<usize, RepositoryError> {
        let write_requests = records
            .iter()
            .map(Self::to_write_request)
            .collect::<Result<Vec<_>, _>>()?;

        for (index, chunk) in write_requests.chunks(BATCH_SIZE).enumerate() {
            debug!(chunk = index, items = chunk.len(), "BatchWriteItem送信");
            self.write_chunk(chunk.to_vec()).await?;
        }

        Ok(records.len())
    }
}
