// usersテーブルに保存するユーザーレコード
//
// メディアデー出力行1行から1レコードを作る。Authorizerと写真配信Lambdaが
// 同じレコードを参照する。

use serde::{Deserialize, Serialize};

use super::media_day_row::MediaDayPlayerRow;

/// チーム写真を格納するプレフィックス
pub const TEAM_PHOTO_PREFIX: &str = "Teams";

/// 選手ごとの個人写真の枚数
const PERSONAL_PHOTO_COUNT: usize = 2;

/// usersテーブルの1アイテム
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// パーティションキー（選手の正準名）
    pub username: String,
    /// 認証に使える身分証明書番号（選手本人と保護者）
    #[serde(default)]
    pub dnis: Vec<String>,
    /// 写真オブジェクトのキー
    #[serde(default)]
    pub photos: Vec<String>,
}

impl UserRecord {
    /// メディアデー出力行からレコードを作る
    ///
    /// # 処理フロー
    /// 1. usernameは出力行の`CanonicalName`
    /// 2. dnisは書類9列のうち空でない値（trim済み）を列順に並べたもの
    /// 3. photosは命名規則に従う写真キー
    pub fn from_media_day_row(row: &MediaDayPlayerRow) -> Self {
        let dnis = row
            .document_columns()
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            username: row.canonical_name.clone(),
            dnis,
            photos: photo_keys(&row.canonical_name, row.team.as_deref().unwrap_or_default()),
        }
    }

    /// 指定した書類番号がこのユーザーに紐づいているか
    pub fn contains_document(&self, document: &str) -> bool {
        self.dnis.iter().any(|dni| dni == document)
    }
}

/// 写真オブジェクトのキーを命名規則に従って生成する
///
/// `{username}/001.png`、`{username}/002.png`、`Teams/{team}.png`の順。
pub fn photo_keys(username: &str, team: &str) -> Vec<String> {
    let mut keys: Vec<String> = (1..=PERSONAL_PHOTO_COUNT)
        .map(|index| format!("{}/{:03}.png", username, index))
        .collect();
    keys.push(format!("{}/{}.png", TEAM_PHOTO_PREFIX, team));
    keys
}
