// パイプラインの診断情報
//
// 各段は出力と一緒に警告のリストを返す。ログへの出力は呼び出し側が行う。

use super::roster::TutorSlot;

/// 実行を止めない警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    /// 保護者名が保護者名簿に見つからない
    UnresolvedTutor {
        slot: TutorSlot,
        tutor: String,
        player: String,
    },
    /// 役割が選手と保護者の両方に該当する会員
    DualRoleMember { canonical_name: String },
}

impl std::fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineWarning::UnresolvedTutor {
                slot,
                tutor,
                player,
            } => write!(f, "{} '{}' not found for player '{}'", slot, tutor, player),
            PipelineWarning::DualRoleMember { canonical_name } => write!(
                f,
                "Member '{}' matches both player and tutor roles",
                canonical_name
            ),
        }
    }
}
