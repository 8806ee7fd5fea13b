// 選手・保護者レコード
//
// 会員名簿を役割で振り分けた後の、パイプライン各段の入出力となる型。
// 各段は前段の値を消費して新しい値を返し、途中の値を書き換えない。

use chrono::NaiveDate;

use super::identity_document::IdentityDocuments;
use super::tutor_field::TutorNames;

/// 保護者が名簿に見つからなかったことを示す値
pub const NOT_FOUND_SENTINEL: &str = "not_found";

/// 保護者枠（1人目/2人目）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorSlot {
    Tutor1,
    Tutor2,
}

impl std::fmt::Display for TutorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TutorSlot::Tutor1 => write!(f, "Tutor1"),
            TutorSlot::Tutor2 => write!(f, "Tutor2"),
        }
    }
}

/// 保護者解決前の選手レコード
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCandidate {
    /// 選手の正準名（一意とは限らない）
    pub canonical_name: String,
    /// 選手本人の身分証明書
    pub documents: IdentityDocuments,
    /// 生年月日
    pub birth_date: Option<NaiveDate>,
    /// 「Tutores」欄から得た保護者の正準名
    pub tutor_names: TutorNames,
}

/// 保護者レコード（正準名と身分証明書のみ）
#[derive(Debug, Clone, PartialEq)]
pub struct TutorRecord {
    pub canonical_name: String,
    pub documents: IdentityDocuments,
}

/// 保護者名の解決結果
#[derive(Debug, Clone, PartialEq)]
pub enum Guardian {
    /// 保護者欄が空
    Absent,
    /// 保護者名簿で見つかった
    Resolved {
        name: String,
        documents: IdentityDocuments,
    },
    /// 保護者名簿に存在しない名前（元の正準名を保持する）
    NotFound { name: String },
}

impl Guardian {
    /// 出力列に書く保護者名（空、正準名、または「not_found」）
    pub fn column_name(&self) -> &str {
        match self {
            Guardian::Absent => "",
            Guardian::Resolved { name, .. } => name,
            Guardian::NotFound { .. } => NOT_FOUND_SENTINEL,
        }
    }

    /// 解決済みの場合のみ身分証明書を返す
    pub fn documents(&self) -> Option<&IdentityDocuments> {
        match self {
            Guardian::Resolved { documents, .. } => Some(documents),
            _ => None,
        }
    }

    /// 保護者名が記載されているか（「not_found」も記載ありとして数える）
    pub fn is_present(&self) -> bool {
        !matches!(self, Guardian::Absent)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Guardian::NotFound { .. })
    }
}

/// 保護者解決後の選手レコード
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlayer {
    pub canonical_name: String,
    pub documents: IdentityDocuments,
    pub birth_date: Option<NaiveDate>,
    pub tutor1: Guardian,
    pub tutor2: Guardian,
}
