// 会員名簿の1行
//
// Excel/CSVから読み込んだ生の値を保持する。欠損や不正値はエラーにせず
// `None`に落とし、後段で「not_found」や「身分証なし」として表面化させる。

use chrono::{NaiveDate, NaiveDateTime};

use super::canonical_name::canonical_full_name;
use super::identity_document::IdentityDocuments;

/// 日付文字列として受け付ける書式（日が先）
///
/// 2桁年の書式は4桁年より先に試す（4桁年の書式は「12」も西暦12年として受理するため）。
const DATE_FORMATS: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// 時刻付き日付として受け付ける書式
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// 会員名簿の1行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Member {
    /// 名（Nombre）
    pub given_name: Option<String>,
    /// 姓（Apellidos）
    pub family_name: Option<String>,
    /// 役割（Roles、自由記述）
    pub roles: Option<String>,
    /// 身分証明書（DNI/NIE/Pasaporte）
    pub documents: IdentityDocuments,
    /// 保護者欄（Tutores、「/」区切り）
    pub tutors: Option<String>,
    /// 生年月日（Fecha nac.、解析できない場合は`None`）
    pub birth_date: Option<NaiveDate>,
}

impl Member {
    /// 名と姓から正準名を生成する
    pub fn canonical_name(&self) -> String {
        canonical_full_name(self.given_name.as_deref(), self.family_name.as_deref())
    }
}

/// 日が先の書式で書かれた日付文字列を解析する
///
/// 解析できない値はエラーにせず`None`を返す。
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}
