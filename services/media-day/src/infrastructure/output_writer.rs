/// メディアデー出力CSVの読み書き
///
/// 突合パイプラインが書き、アップローダーが読む。列名と列順は
/// `MediaDayPlayerRow`のシリアライズ定義に従う。
use std::path::Path;

use crate::domain::MediaDayPlayerRow;
use crate::infrastructure::roster_reader::RosterError;

/// 出力行をCSVに書き出す
///
/// 親ディレクトリがなければ作成する。`None`は空セルになる。
pub fn write_media_day_rows(path: &Path, rows: &[MediaDayPlayerRow]) -> Result<(), RosterError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        // 行がなくても見出しだけは書く
        writer.write_record(OUTPUT_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// 出力CSVを読み込む
pub fn read_media_day_rows(path: &Path) -> Result<Vec<MediaDayPlayerRow>, RosterError> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<MediaDayPlayerRow>, csv::Error>>()?;
    Ok(rows)
}

/// 出力CSVの列（順序どおり）
pub const OUTPUT_COLUMNS: [&str; 14] = [
    "CanonicalName",
    "Equipo",
    "Player_DNI",
    "Player_NIE",
    "Player_Pasaporte",
    "Player_BirthDate",
    "Player_Tutor1",
    "Player_Tutor1DNI",
    "Player_Tutor1NIE",
    "Player_Tutor1Passport",
    "Player_Tutor2",
    "Player_Tutor2DNI",
    "Player_Tutor2NIE",
    "Player_Tutor2Passport",
];
