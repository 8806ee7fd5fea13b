/// 写真のZIPアーカイブ化
use std::collections::HashSet;
use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ZIP作成のエラー型
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// キーと内容の組からDeflate圧縮のZIPを作る
///
/// エントリ名はキーの最後のセグメント（`juan/001.png` → `001.png`）。
/// 同じ名前が既にあればキー全体を使い、それも重複すれば連番を付ける。
pub fn build_zip(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut used_names = HashSet::new();

    for (index, (key, content)) in entries.iter().enumerate() {
        let name = entry_name(key, index, &used_names);
        writer.start_file(name.as_str(), options)?;
        writer.write_all(content)?;
        used_names.insert(name);
    }

    Ok(writer.finish()?.into_inner())
}

fn entry_name(key: &str, index: usize, used_names: &HashSet<String>) -> String {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    [file_name.to_string(), key.to_string()]
        .into_iter()
        .find(|candidate| !candidate.is_empty() && !used_names.contains(candidate))
        .unwrap_or_else(|| format!("{}_{}", index, key))
}
