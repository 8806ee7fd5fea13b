// 突合結果の統計
//
// 出席者の突合率、選手ごとの保護者数、未解決の保護者、身分証なしの行を集計する。
// 割合は小数2桁で表示し、分母が0のときは0とする。

use std::fmt;

use super::media_day_row::MediaDayPlayerRow;
use super::roster::ResolvedPlayer;

const RULE_WIDTH: usize = 60;

/// 分母が0のときは0を返す百分率
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// 統計レポート
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStatistics {
    /// 選手として扱った出席者数（Roleが数値の行）
    pub attendees_total: usize,
    pub attendees_found: usize,
    pub attendees_not_found: usize,

    /// 選手パーティションの行数
    pub players_total: usize,
    /// 保護者パーティションの行数（重複除去前）
    pub tutors_total: usize,

    pub players_with_both_tutors: usize,
    pub players_with_tutor1_only: usize,
    pub players_with_tutor2_only: usize,
    pub players_without_tutors: usize,

    pub tutor1_not_found: usize,
    pub tutor2_not_found: usize,

    /// 出力行のうち身分証明書を1つも持たない行
    pub rows_without_identity_documents: usize,
}

impl PipelineStatistics {
    /// 各段の結果から統計を計算する
    ///
    /// 保護者の有無は「not_found」も記載ありとして数える。
    pub fn compute(
        attendees_total: usize,
        rows: &[MediaDayPlayerRow],
        attendees_not_found: usize,
        players: &[ResolvedPlayer],
        tutors_total: usize,
    ) -> Self {
        let mut statistics = Self {
            attendees_total,
            attendees_found: rows.len(),
            attendees_not_found,
            players_total: players.len(),
            tutors_total,
            rows_without_identity_documents: rows
                .iter()
                .filter(|row| row.lacks_identity_documents())
                .count(),
            ..Default::default()
        };

        for player in players {
            match (player.tutor1.is_present(), player.tutor2.is_present()) {
                (true, true) => statistics.players_with_both_tutors += 1,
                (true, false) => statistics.players_with_tutor1_only += 1,
                (false, true) => statistics.players_with_tutor2_only += 1,
                (false, false) => statistics.players_without_tutors += 1,
            }
            if player.tutor1.is_not_found() {
                statistics.tutor1_not_found += 1;
            }
            if player.tutor2.is_not_found() {
                statistics.tutor2_not_found += 1;
            }
        }

        statistics
    }
}

impl fmt::Display for PipelineStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let attendees = |count| percentage(count, self.attendees_total);
        let players = |count| percentage(count, self.players_total);

        writeln!(f, "{}", heavy)?;
        writeln!(f, "MEDIA DAY PLAYERS STATISTICS")?;
        writeln!(f, "{}", heavy)?;
        writeln!(f, "Total Media Day Players: {}", self.attendees_total)?;
        writeln!(
            f,
            "Found in players: {} ({:.2}%)",
            self.attendees_found,
            attendees(self.attendees_found)
        )?;
        writeln!(
            f,
            "NOT found in players: {} ({:.2}%)",
            self.attendees_not_found,
            attendees(self.attendees_not_found)
        )?;
        writeln!(f, "{}", light)?;

        writeln!(f, "{}", heavy)?;
        writeln!(f, "STATISTICS")?;
        writeln!(f, "{}", heavy)?;
        writeln!(f, "Total Players: {}", self.players_total)?;
        writeln!(f, "Total Tutors: {}", self.tutors_total)?;
        writeln!(
            f,
            "Players with two tutors: {} ({:.2}%)",
            self.players_with_both_tutors,
            players(self.players_with_both_tutors)
        )?;
        writeln!(
            f,
            "Players with Tutor1 only: {} ({:.2}%)",
            self.players_with_tutor1_only,
            players(self.players_with_tutor1_only)
        )?;
        writeln!(
            f,
            "Players with Tutor2 only: {} ({:.2}%)",
            self.players_with_tutor2_only,
            players(self.players_with_tutor2_only)
        )?;
        writeln!(
            f,
            "Players without tutors: {} ({:.2}%)",
            self.players_without_tutors,
            players(self.players_without_tutors)
        )?;
        writeln!(f, "{}", light)?;

        writeln!(f, "{}", heavy)?;
        writeln!(f, "NOT FOUND TUTORS STATISTICS")?;
        writeln!(f, "{}", heavy)?;
        writeln!(f, "Players with Tutor1 not found: {}", self.tutor1_not_found)?;
        writeln!(f, "Players with Tutor2 not found: {}", self.tutor2_not_found)?;
        writeln!(f, "{}", light)?;

        writeln!(f, "{}", heavy)?;
        writeln!(f, "PLAYERS WITHOUT ANY ID (PLAYER AND TUTORS)")?;
        writeln!(f, "{}", heavy)?;
        writeln!(
            f,
            "Media Day players without ID (Player, Tutor1 or Tutor2): {} ({:.2}%)",
            self.rows_without_identity_documents,
            attendees(self.rows_without_identity_documents)
        )?;
        write!(f, "{}", light)
    }
}
