// 役割（Roles）欄による分類
//
// 名簿の「Roles」欄は上流で手入力された自由記述で、大文字小文字も
// 入力されたまま比較する。選手判定と保護者判定は互いに独立しており、
// 両方に該当する会員もあり得る。

/// 選手を示す役割の部分文字列
pub const PLAYER_ROLE_MARKER: &str = "Deportista";

/// 保護者を示す役割の部分文字列
pub const TUTOR_ROLE_MARKER: &str = "Tutor";

/// 選手と同様に扱うファン会員の役割（完全一致）
pub const FAN_ROLES: &[&str] = &["Fan", "Fan/Socio"];

/// 選手（またはファン会員）かどうか
///
/// 「Deportista」を含むか、trim後に「Fan」「Fan/Socio」と完全一致する場合に真。
pub fn is_player_role(roles: Option<&str>) -> bool {
    let Some(roles) = roles else {
        return false;
    };

    roles.contains(PLAYER_ROLE_MARKER) || FAN_ROLES.contains(&roles.trim())
}

/// 保護者かどうか（「Tutor」を含む）
pub fn is_tutor_role(roles: Option<&str>) -> bool {
    roles.is_some_and(|roles| roles.contains(TUTOR_ROLE_MARKER))
}
