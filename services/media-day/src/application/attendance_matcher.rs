/// 出席者と選手の突合
///
/// 出席者の正準名を前方一致で選手の正準名に当てる。
/// 一致する選手が複数いる場合は名簿で最初の選手を採用する。
use crate::domain::{Attendee, ResolvedPlayer};

/// 選手の正準名の前方一致索引
///
/// 正準名でソートした配列を持ち、接頭辞に一致する範囲を二分探索で求める。
/// 範囲内で元の並び順が最小の選手を返すため、線形走査と同じ結果になる。
#[derive(Debug, Clone, Default)]
pub struct PlayerIndex {
    /// (正準名, 名簿上の位置)を正準名順に並べたもの
    sorted: Vec<(String, usize)>,
}

impl PlayerIndex {
    pub fn new(players: &[ResolvedPlayer]) -> Self {
        let mut sorted: Vec<(String, usize)> = players
            .iter()
            .enumerate()
            .map(|(position, player)| (player.canonical_name.clone(), position))
            .collect();
        sorted.sort();
        Self { sorted }
    }

    /// `prefix`で始まる選手のうち名簿で最初のものの位置
    ///
    /// 空の接頭辞は何にも一致しない。
    pub fn first_with_prefix(&self, prefix: &str) -> Option<usize> {
        if prefix.is_empty() {
            return None;
        }

        let start = self
            .sorted
            .partition_point(|(name, _)| name.as_str() < prefix);

        self.sorted[start..]
            .iter()
            .take_while(|(name, _)| name.starts_with(prefix))
            .map(|(_, position)| *position)
            .min()
    }
}

/// 選手と突合できた出席者
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedAttendee {
    pub attendee: Attendee,
    /// 選手リスト上の位置
    pub player_position: usize,
}

/// 突合結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceMatch {
    /// 突合できた出席者（出席者の並び順）
    pub found: Vec<MatchedAttendee>,
    /// 突合できなかった出席者（加工せずそのまま）
    pub not_found: Vec<Attendee>,
}

/// 選手として扱う出席者だけを残す（Roleが数値の行）
pub fn select_player_attendees(attendees: Vec<Attendee>) -> Vec<Attendee> {
    attendees
        .into_iter()
        .filter(Attendee::is_player)
        .collect()
}

/// 出席者を選手と突合する
pub fn match_attendance(attendees: Vec<Attendee>, players: &[ResolvedPlayer]) -> AttendanceMatch {
    let index = PlayerIndex::new(players);
    let mut result = AttendanceMatch::default();

    for attendee in attendees {
        match index.first_with_prefix(&attendee.canonical_name()) {
            Some(player_position) => result.found.push(MatchedAttendee {
                attendee,
                player_position,
            }),
            None => result.not_found.push(attendee),
        }
    }

    result
}
