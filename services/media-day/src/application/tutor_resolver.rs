/// 保護者の解決
///
/// 選手の保護者名を保護者名簿と突き合わせ、身分証明書を引き当てる。
/// 入力の選手リストを消費し、解決済みの新しいリストを返す。
use std::collections::HashMap;

use crate::domain::{
    Guardian, IdentityDocuments, PipelineWarning, PlayerCandidate, ResolvedPlayer, TutorRecord,
    TutorSlot,
};

/// 正準名から保護者の身分証明書を引く表
///
/// 同じ正準名の保護者が複数いる場合は名簿で最初の行だけを残す。
#[derive(Debug, Clone, Default)]
pub struct TutorLookup {
    documents_by_name: HashMap<String, IdentityDocuments>,
}

impl TutorLookup {
    pub fn from_records(records: Vec<TutorRecord>) -> Self {
        let mut documents_by_name = HashMap::with_capacity(records.len());
        for record in records {
            documents_by_name
                .entry(record.canonical_name)
                .or_insert(record.documents);
        }
        Self { documents_by_name }
    }

    pub fn get(&self, canonical_name: &str) -> Option<&IdentityDocuments> {
        self.documents_by_name.get(canonical_name)
    }

    /// 重複除去後の保護者数
    pub fn len(&self) -> usize {
        self.documents_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents_by_name.is_empty()
    }
}

/// 保護者解決の結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRoster {
    pub players: Vec<ResolvedPlayer>,
    /// 未解決の保護者参照1件につき1つ
    pub warnings: Vec<PipelineWarning>,
}

/// 全選手の保護者を解決する
///
/// # 処理フロー
/// 各選手の保護者枠ごとに:
/// 1. 空なら`Guardian::Absent`
/// 2. 表にあれば`Guardian::Resolved`（書類をコピー）
/// 3. 表になければ`Guardian::NotFound`とし、警告を記録
pub fn resolve_tutors(players: Vec<PlayerCandidate>, lookup: &TutorLookup) -> ResolvedRoster {
    let mut warnings = Vec::new();

    let players = players
        .into_iter()
        .map(|candidate| {
            let tutor1 = resolve_guardian(
                TutorSlot::Tutor1,
                candidate.tutor_names.tutor1,
                &candidate.canonical_name,
                lookup,
                &mut warnings,
            );
            let tutor2 = resolve_guardian(
                TutorSlot::Tutor2,
                candidate.tutor_names.tutor2,
                &candidate.canonical_name,
                lookup,
                &mut warnings,
            );

            ResolvedPlayer {
                canonical_name: candidate.canonical_name,
                documents: candidate.documents,
                birth_date: candidate.birth_date,
                tutor1,
                tutor2,
            }
        })
        .collect();

    ResolvedRoster { players, warnings }
}

fn resolve_guardian(
    slot: TutorSlot,
    name: String,
    player: &str,
    lookup: &TutorLookup,
    warnings: &mut Vec<PipelineWarning>,
) -> Guardian {
    if name.is_empty() {
        return Guardian::Absent;
    }

    match lookup.get(&name) {
        Some(documents) => Guardian::Resolved {
            documents: documents.clone(),
            name,
        },
        None => {
            warnings.push(PipelineWarning::UnresolvedTutor {
                slot,
                tutor: name.clone(),
                player: player.to_string(),
            });
            Guardian::NotFound { name }
        }
    }
}
