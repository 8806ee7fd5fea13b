/// 選手データのアップロード
///
/// メディアデー出力行からユーザーレコードを作り、usersテーブルへ保存する。
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{MediaDayPlayerRow, UserRecord};
use crate::infrastructure::{read_media_day_rows, RepositoryError, RosterError, UserRepository};

/// アップロードのエラー型
#[derive(Debug, Error)]
pub enum UploadError {
    /// 出力CSVの読み込みに失敗
    #[error("Failed to read media day output: {0}")]
    Roster(#[from] RosterError),

    /// usersテーブルへの書き込みに失敗
    #[error("Failed to store user records: {0}")]
    Repository(#[from] RepositoryError),
}

/// 出力行からユーザーレコードを作る
///
/// 正準名が空の行はキーにできないため除外し、警告を出す。
pub fn generate_user_records(rows: &[MediaDayPlayerRow]) -> Vec<UserRecord> {
    rows.iter()
        .filter(|row| {
            let has_name = !row.canonical_name.trim().is_empty();
            if !has_name {
                warn!(team = ?row.team, "正準名が空の行をスキップ");
            }
            has_name
        })
        .map(UserRecord::from_media_day_row)
        .collect()
}

/// ユーザーレコードをリポジトリに保存するアップローダー
pub struct PlayerDataUploader<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> PlayerDataUploader<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// 出力行をアップロードする
    ///
    /// # 戻り値
    /// * 成功時は保存した件数
    /// * 失敗時は`Err(UploadError)`（途中までの書き込みは取り消さない）
    pub async fn upload(&self, rows: &[MediaDayPlayerRow]) -> Result<usize, UploadError> {
        let records = generate_user_records(rows);
        info!(records = records.len(), "ユーザーレコードを生成");

        let stored = self.repository.put_all(&records).await?;
        info!(stored = stored, "ユーザーレコードをアップロード");

        Ok(stored)
    }

    /// 出力CSVを読み込んでアップロードする
    pub async fn upload_file(&self, path: &Path) -> Result<usize, UploadError> {
        let rows = read_media_day_rows(path)?;
        info!(rows = rows.len(), path = %path.display(), "出力CSVを読み込み");

        self.upload(&rows).await
    }
}
