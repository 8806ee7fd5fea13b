// メディアデー出席者
//
// 出席者エクスポート（CSV）の1行。Role列が数値（背番号など）の行だけが
// 選手として突合の対象になる。

use super::canonical_name::canonical_full_name;

/// メディアデー出席者エクスポートの1行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attendee {
    /// 名（Nombre）
    pub given_name: Option<String>,
    /// 姓（Apellidos）
    pub family_name: Option<String>,
    /// 役割コード（Role）
    pub role: Option<String>,
    /// 所属チーム（Equipo）
    pub team: Option<String>,
}

impl Attendee {
    pub fn canonical_name(&self) -> String {
        canonical_full_name(self.given_name.as_deref(), self.family_name.as_deref())
    }

    /// 選手かどうか
    ///
    /// Role列をtrimした値が空でなく、すべてASCII数字の場合のみ真。
    /// 欠損や非数値（「Entrenador」など）は選手ではない。
    pub fn is_player(&self) -> bool {
        self.role.as_deref().map(str::trim).is_some_and(|role| {
            !role.is_empty() && role.chars().all(|c| c.is_ascii_digit())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee_with_role(role: Option<&str>) -> Attendee {
        Attendee {
            given_name: Some("Juan".to_string()),
            family_name: Some("Garcia".to_string()),
            role: role.map(str::to_string),
            team: Some("Infantil A".to_string()),
        }
    }

    #[test]
    fn test_numeric_role_is_player() {
        assert!(attendee_with_role(Some("1")).is_player());
        assert!(attendee_with_role(Some(" 23 ")).is_player());
    }

    #[test]
    fn test_non_numeric_role_is_not_player() {
        assert!(!attendee_with_role(Some("Tutor")).is_player());
        assert!(!attendee_with_role(Some("")).is_player());
        assert!(!attendee_with_role(Some("1.0")).is_player());
        assert!(!attendee_with_role(None).is_player());
    }

    #[test]
    fn test_attendee_canonical_name() {
        assert_eq!(attendee_with_role(None).canonical_name(), "juan_garcia");
    }
}
