/// 選手・保護者突合パイプライン
///
/// 会員名簿と出席者リストから、メディアデー出力行と統計を作る。
/// 入出力は呼び出し側（バイナリ）が担当し、ここではメモリ上の値だけを扱う。
use tracing::{info, warn};

use crate::application::attendance_matcher::{match_attendance, select_player_attendees};
use crate::application::partition::partition_members;
use crate::application::tutor_resolver::{resolve_tutors, TutorLookup};
use crate::domain::{
    Attendee, MediaDayPlayerRow, Member, PipelineStatistics, PipelineWarning,
};

/// パイプラインの実行結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    /// 出力行（突合できた出席者の並び順）
    pub rows: Vec<MediaDayPlayerRow>,
    /// 突合できなかった出席者
    pub not_found: Vec<Attendee>,
    pub statistics: PipelineStatistics,
    /// 全段の警告（発生順）
    pub warnings: Vec<PipelineWarning>,
}

/// パイプラインを実行する
///
/// # 処理フロー
/// 1. 会員を選手と保護者に振り分け、正準名と保護者名を付与
/// 2. 保護者表を作成（同名は最初の行を採用）
/// 3. 選手の保護者を解決
/// 4. 出席者を選手（Roleが数値）に絞り込み
/// 5. 前方一致で選手と突合
/// 6. 出力行を作成（DNI列を正規化）
/// 7. 統計を計算
///
/// 各段の警告は`tracing::warn!`で出力し、レポートにも含める。
pub fn run_players_tutors(members: Vec<Member>, attendees: Vec<Attendee>) -> PipelineReport {
    info!(members = members.len(), attendees = attendees.len(), "パイプライン開始");

    let partitioned = partition_members(members);
    info!(
        players = partitioned.players.len(),
        tutors = partitioned.tutors.len(),
        "会員を振り分け"
    );
    let mut warnings = partitioned.warnings;
    let tutors_total = partitioned.tutors.len();

    let lookup = TutorLookup::from_records(partitioned.tutors);
    if lookup.is_empty() {
        warn!("保護者が1人もいないため、保護者参照はすべて未解決になる");
    } else {
        info!(tutors = lookup.len(), "保護者表を作成");
    }
    let roster = resolve_tutors(partitioned.players, &lookup);
    warnings.extend(roster.warnings);
    let players = roster.players;

    let attendees = select_player_attendees(attendees);
    let attendees_total = attendees.len();
    info!(attendees = attendees_total, "選手の出席者を抽出");

    let matched = match_attendance(attendees, &players);
    let rows: Vec<MediaDayPlayerRow> = matched
        .found
        .iter()
        .map(|found| MediaDayPlayerRow::from_match(&found.attendee, &players[found.player_position]))
        .collect();

    let statistics = PipelineStatistics::compute(
        attendees_total,
        &rows,
        matched.not_found.len(),
        &players,
        tutors_total,
    );

    for warning in &warnings {
        log_warning(warning);
    }

    info!(
        found = statistics.attendees_found,
        not_found = statistics.attendees_not_found,
        without_id = statistics.rows_without_identity_documents,
        "パイプライン完了"
    );

    PipelineReport {
        rows,
        not_found: matched.not_found,
        statistics,
        warnings,
    }
}

fn log_warning(warning: &PipelineWarning) {
    match warning {
        PipelineWarning::UnresolvedTutor {
            slot,
            tutor,
            player,
        } => warn!(
            slot = %slot,
            tutor = %tutor,
            player = %player,
            "{}",
            warning
        ),
        PipelineWarning::DualRoleMember { canonical_name } => {
            warn!(member = %canonical_name, "{}", warning)
        }
    }
}
