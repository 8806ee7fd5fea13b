// 身分証明書（DNI/NIE/Pasaporte）
//
// 1人につき高々1種類が埋まっている想定だが、ここでは強制しない。
// 正規化は表記を揃えるだけで、番号の妥当性（チェック文字など）は検証しない。

/// 空白のみの値を`None`に寄せ、それ以外はtrimして返す
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// DNI形式の値を正規化する
///
/// 欠損・空白は`None`。それ以外はtrim、大文字化、先頭の「0」除去を行う。
/// 除去の結果が空（「000」など）になった場合も`None`とする。
pub fn normalize_document(value: Option<&str>) -> Option<String> {
    let trimmed = non_blank(value)?;
    let normalized = trimmed.to_uppercase().trim_start_matches('0').to_string();

    (!normalized.is_empty()).then_some(normalized)
}

/// 1人分の身分証明書
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityDocuments {
    /// スペイン国民身分証（DNI）
    pub dni: Option<String>,
    /// 外国人識別番号（NIE）
    pub nie: Option<String>,
    /// パスポート番号
    pub passport: Option<String>,
}

impl IdentityDocuments {
    /// 名簿の生の値から作成する（空白のみの値は`None`）
    pub fn from_raw(dni: Option<&str>, nie: Option<&str>, passport: Option<&str>) -> Self {
        Self {
            dni: non_blank(dni),
            nie: non_blank(nie),
            passport: non_blank(passport),
        }
    }

    /// いずれの書類も持っていないかどうか
    pub fn is_empty(&self) -> bool {
        self.dni.is_none() && self.nie.is_none() && self.passport.is_none()
    }
}
