/// 役割による会員の振り分け
///
/// 会員名簿を選手と保護者に分け、それぞれ正準名を付与する。
/// 選手側では「Tutores」欄を解析して保護者の正準名を得る。
use crate::domain::{
    is_player_role, is_tutor_role, parse_tutor_field, Member, PipelineWarning, PlayerCandidate,
    TutorRecord,
};

/// 振り分け結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedMembers {
    /// 選手（名簿の並び順を保持）
    pub players: Vec<PlayerCandidate>,
    /// 保護者（名簿の並び順を保持、重複除去前）
    pub tutors: Vec<TutorRecord>,
    pub warnings: Vec<PipelineWarning>,
}

/// 会員を選手と保護者に振り分ける
///
/// 2つの判定は独立しており、両方に該当する会員は両方に入る。
/// その場合は`PipelineWarning::DualRoleMember`を記録する。
/// どちらにも該当しない会員は捨てる。
pub fn partition_members(members: Vec<Member>) -> PartitionedMembers {
    let mut partitioned = PartitionedMembers::default();

    for member in members {
        let roles = member.roles.as_deref();
        let is_player = is_player_role(roles);
        let is_tutor = is_tutor_role(roles);
        let canonical_name = member.canonical_name();

        if is_player && is_tutor {
            partitioned.warnings.push(PipelineWarning::DualRoleMember {
                canonical_name: canonical_name.clone(),
            });
        }

        if is_tutor {
            partitioned.tutors.push(TutorRecord {
                canonical_name: canonical_name.clone(),
                documents: member.documents.clone(),
            });
        }

        if is_player {
            partitioned.players.push(PlayerCandidate {
                canonical_name,
                tutor_names: parse_tutor_field(member.tutors.as_deref()),
                documents: member.documents,
                birth_date: member.birth_date,
            });
        }
    }

    partitioned
}
