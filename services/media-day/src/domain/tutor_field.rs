// 「Tutores」欄の解析
//
// 名簿の「Tutores」欄には0〜2名の保護者名が「/」または「//」区切りで
// 自由記述されている。これをTutor1/Tutor2の正準名に分解する。

use super::canonical_name::{strip_not_available, to_canonical};

/// 選手1人あたりの保護者名（正準名）
///
/// 欠けている枠は`None`ではなく空文字で表す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorNames {
    /// 1人目の保護者の正準名
    pub tutor1: String,
    /// 2人目の保護者の正準名
    pub tutor2: String,
}

impl TutorNames {
    /// 2枠とも空かどうか
    pub fn is_empty(&self) -> bool {
        self.tutor1.is_empty() && self.tutor2.is_empty()
    }
}

/// 「Tutores」欄を解析してTutor1/Tutor2の正準名を返す
///
/// # 処理フロー
/// 1. 「N/A」トークンを除去
/// 2. 「/」で分割し、各要素をtrimして空要素を捨てる（「//」もこれで吸収）
/// 3. 先頭2要素をTutor1/Tutor2とし、それぞれ正準化
/// 4. 両者が空でなく同一なら、同じ保護者の二重記載とみなしTutor2を空にする
pub fn parse_tutor_field(raw: Option<&str>) -> TutorNames {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return TutorNames::default();
    };

    let cleaned = strip_not_available(raw);
    let mut parts = cleaned
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty());

    let tutor1 = to_canonical(parts.next().unwrap_or_default());
    let mut tutor2 = to_canonical(parts.next().unwrap_or_default());

    if !tutor1.is_empty() && tutor1 == tutor2 {
        tutor2.clear();
    }

    TutorNames { tutor1, tutor2 }
}
