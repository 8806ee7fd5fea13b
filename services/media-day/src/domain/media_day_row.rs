// メディアデー出力行
//
// 突合できた出席者1人につき1行。CSVの列名は下流のアップローダーと共有する。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attendee::Attendee;
use super::identity_document::{non_blank, normalize_document, IdentityDocuments};
use super::roster::{ResolvedPlayer, NOT_FOUND_SENTINEL};

/// メディアデー出力CSVの1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDayPlayerRow {
    /// 出席者側の正準名（アップロード時のユーザー名になる）
    #[serde(rename = "CanonicalName")]
    pub canonical_name: String,
    /// 出席者の所属チーム
    #[serde(rename = "Equipo")]
    pub team: Option<String>,

    #[serde(rename = "Player_DNI")]
    pub player_dni: Option<String>,
    #[serde(rename = "Player_NIE")]
    pub player_nie: Option<String>,
    #[serde(rename = "Player_Pasaporte")]
    pub player_passport: Option<String>,
    #[serde(rename = "Player_BirthDate")]
    pub player_birth_date: Option<NaiveDate>,

    #[serde(rename = "Player_Tutor1", default)]
    pub tutor1: String,
    #[serde(rename = "Player_Tutor1DNI")]
    pub tutor1_dni: Option<String>,
    #[serde(rename = "Player_Tutor1NIE")]
    pub tutor1_nie: Option<String>,
    #[serde(rename = "Player_Tutor1Passport")]
    pub tutor1_passport: Option<String>,

    #[serde(rename = "Player_Tutor2", default)]
    pub tutor2: String,
    #[serde(rename = "Player_Tutor2DNI")]
    pub tutor2_dni: Option<String>,
    #[serde(rename = "Player_Tutor2NIE")]
    pub tutor2_nie: Option<String>,
    #[serde(rename = "Player_Tutor2Passport")]
    pub tutor2_passport: Option<String>,
}

impl MediaDayPlayerRow {
    /// 出席者と突合した選手から出力行を作る
    ///
    /// DNI列（選手、Tutor1、Tutor2）は`normalize_document`で正規化する。
    pub fn from_match(attendee: &Attendee, player: &ResolvedPlayer) -> Self {
        let empty = IdentityDocuments::default();
        let tutor1_documents = player.tutor1.documents().unwrap_or(&empty);
        let tutor2_documents = player.tutor2.documents().unwrap_or(&empty);

        Self {
            canonical_name: attendee.canonical_name(),
            team: non_blank(attendee.team.as_deref()),
            player_dni: normalize_document(player.documents.dni.as_deref()),
            player_nie: player.documents.nie.clone(),
            player_passport: player.documents.passport.clone(),
            player_birth_date: player.birth_date,
            tutor1: player.tutor1.column_name().to_string(),
            tutor1_dni: normalize_document(tutor1_documents.dni.as_deref()),
            tutor1_nie: tutor1_documents.nie.clone(),
            tutor1_passport: tutor1_documents.passport.clone(),
            tutor2: player.tutor2.column_name().to_string(),
            tutor2_dni: normalize_document(tutor2_documents.dni.as_deref()),
            tutor2_nie: tutor2_documents.nie.clone(),
            tutor2_passport: tutor2_documents.passport.clone(),
        }
    }

    /// 身分証明書の9列を列順に返す
    ///
    /// 選手（DNI, NIE, Pasaporte）、Tutor1（同）、Tutor2（同）の順。
    pub fn document_columns(&self) -> [Option<&str>; 9] {
        [
            self.player_dni.as_deref(),
            self.player_nie.as_deref(),
            self.player_passport.as_deref(),
            self.tutor1_dni.as_deref(),
            self.tutor1_nie.as_deref(),
            self.tutor1_passport.as_deref(),
            self.tutor2_dni.as_deref(),
            self.tutor2_nie.as_deref(),
            self.tutor2_passport.as_deref(),
        ]
    }

    /// 選手本人も保護者2人も身分証明書を持たない行かどうか
    ///
    /// 監査用の判定で、該当行を出力から除外するものではない。
    /// 以下の3条件がすべて成り立つ場合に真:
    /// - 選手のDNI/NIE/Pasaporteがすべて空
    /// - Tutor1が空か「not_found」、または書類3列がすべて空
    /// - Tutor2も同様
    pub fn lacks_identity_documents(&self) -> bool {
        let player_lacks = all_blank(&[
            &self.player_dni,
            &self.player_nie,
            &self.player_passport,
        ]);
        let tutor1_lacks = guardian_lacks(
            &self.tutor1,
            &[&self.tutor1_dni, &self.tutor1_nie, &self.tutor1_passport],
        );
        let tutor2_lacks = guardian_lacks(
            &self.tutor2,
            &[&self.tutor2_dni, &self.tutor2_nie, &self.tutor2_passport],
        );

        player_lacks && tutor1_lacks && tutor2_lacks
    }
}

fn all_blank(values: &[&Option<String>]) -> bool {
    values
        .iter()
        .all(|value| value.as_deref().is_none_or(|v| v.trim().is_empty()))
}

fn guardian_lacks(name: &str, documents: &[&Option<String>]) -> bool {
    name.is_empty() || name == NOT_FOUND_SENTINEL || all_blank(documents)
}
