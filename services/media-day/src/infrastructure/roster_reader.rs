/// 名簿ファイルの読み込み
///
/// 会員名簿（Excel/ODSの最初のシート、またはCSV）と出席者エクスポート（CSV）を
/// 列名で読み取り、ドメインの行型に変換する。
/// セルの欠損や不正値はエラーにせず`None`として扱う。
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use thiserror::Error;

use crate::domain::{parse_birth_date, Attendee, IdentityDocuments, Member};

// 会員名簿の列名
const GIVEN_NAME_COLUMN: &str = "Nombre";
const FAMILY_NAME_COLUMN: &str = "Apellidos";
const ROLES_COLUMN: &str = "Roles";
const DNI_COLUMN: &str = "DNI";
const NIE_COLUMN: &str = "NIE";
const PASSPORT_COLUMN: &str = "Pasaporte";
const TUTORS_COLUMN: &str = "Tutores";
const BIRTH_DATE_COLUMN: &str = "Fecha nac.";

// 出席者エクスポートの列名
const ROLE_COLUMN: &str = "Role";
const TEAM_COLUMN: &str = "Equipo";

/// スプレッドシートとして読む拡張子
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 名簿ファイル読み書きのエラー型
#[derive(Debug, Error)]
pub enum RosterError {
    /// ファイルの入出力に失敗
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSVの解析または書き込みに失敗
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// スプレッドシートの解析に失敗
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// ワークブックにシートがない
    #[error("Workbook has no worksheets: {0}")]
    EmptyWorkbook(String),

    /// 必須の列がない
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

/// 見出し行と文字列セルからなる表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RosterTable {
    /// 見出しと行から表を作る（見出しはtrimし、先頭のBOMを除く）
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let headers = headers
            .into_iter()
            .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self { headers, rows }
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn required_column(&self, name: &str) -> Result<usize, RosterError> {
        self.column(name)
            .ok_or_else(|| RosterError::MissingColumn(name.to_string()))
    }

    /// 行ごとに列を引くアクセサを返す
    fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(|cells| RowView { cells })
    }
}

struct RowView<'a> {
    cells: &'a [Option<String>],
}

impl RowView<'_> {
    fn get(&self, column: Option<usize>) -> Option<&str> {
        column
            .and_then(|index| self.cells.get(index))
            .and_then(|cell| cell.as_deref())
    }

    fn owned(&self, column: Option<usize>) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

/// 拡張子に応じてスプレッドシートまたはCSVとして表を読む
pub fn read_table(path: &Path) -> Result<RosterTable, RosterError> {
    let is_spreadsheet = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SPREADSHEET_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
        });

    if is_spreadsheet {
        read_spreadsheet(path)
    } else {
        read_csv(path)
    }
}

/// ワークブックの最初のシートを読む
fn read_spreadsheet(path: &Path) -> Result<RosterTable, RosterError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| RosterError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| RosterError::EmptyWorkbook(path.display().to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| RosterError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header_row| {
            header_row
                .iter()
                .map(|cell| cell_to_string(cell).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(Option::is_some))
        .collect();

    Ok(RosterTable::new(headers, rows))
}

/// UTF-8のCSVを読む
fn read_csv(path: &Path) -> Result<RosterTable, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let cells: Vec<Option<String>> = record?
            .iter()
            .map(|field| {
                let field = field.trim();
                (!field.is_empty()).then(|| field.to_string())
            })
            .collect();
        if cells.iter().any(Option::is_some) {
            rows.push(cells);
        }
    }

    Ok(RosterTable::new(headers, rows))
}

/// スプレッドシートのセルを文字列にする
///
/// 整数値の浮動小数点は小数部なしで表す（DNIが数値セルで保存されている場合など）。
/// 日付セルは`YYYY-MM-DD`にする。空セルとエラーセルは`None`。
fn cell_to_string(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(value) => value.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(_) => cell.as_date()?.format("%Y-%m-%d").to_string(),
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.trim().to_string(),
    };

    (!text.is_empty()).then_some(text)
}

/// 表から会員名簿を作る
///
/// 「Nombre」「Apellidos」列は必須。その他の列はなければ空として扱う。
pub fn members_from_table(table: &RosterTable) -> Result<Vec<Member>, RosterError> {
    let given_name = Some(table.required_column(GIVEN_NAME_COLUMN)?);
    let family_name = Some(table.required_column(FAMILY_NAME_COLUMN)?);
    let roles = table.column(ROLES_COLUMN);
    let dni = table.column(DNI_COLUMN);
    let nie = table.column(NIE_COLUMN);
    let passport = table.column(PASSPORT_COLUMN);
    let tutors = table.column(TUTORS_COLUMN);
    let birth_date = table.column(BIRTH_DATE_COLUMN);

    Ok(table
        .rows()
        .map(|row| Member {
            given_name: row.owned(given_name),
            family_name: row.owned(family_name),
            roles: row.owned(roles),
            documents: IdentityDocuments::from_raw(
                row.get(dni),
                row.get(nie),
                row.get(passport),
            ),
            tutors: row.owned(tutors),
            birth_date: row.get(birth_date).and_then(parse_birth_date),
        })
        .collect())
}

/// 表から出席者リストを作る
///
/// 「Nombre」「Apellidos」列は必須。
pub fn attendees_from_table(table: &RosterTable) -> Result<Vec<Attendee>, RosterError> {
    let given_name = Some(table.required_column(GIVEN_NAME_COLUMN)?);
    let family_name = Some(table.required_column(FAMILY_NAME_COLUMN)?);
    let role = table.column(ROLE_COLUMN);
    let team = table.column(TEAM_COLUMN);

    Ok(table
        .rows()
        .map(|row| Attendee {
            given_name: row.owned(given_name),
            family_name: row.owned(family_name),
            role: row.owned(role),
            team: row.owned(team),
        })
        .collect())
}

/// 会員名簿ファイルを読む
pub fn read_members(path: &Path) -> Result<Vec<Member>, RosterError> {
    members_from_table(&read_table(path)?)
}

/// 出席者エクスポートを読む
pub fn read_attendees(path: &Path) -> Result<Vec<Attendee>, RosterError> {
    attendees_from_table(&read_table(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // ==================== セル変換 ====================

    #[test]
    fn test_cell_to_string_numbers() {
        assert_eq!(
            cell_to_string(&Data::Float(12345678.0)),
            Some("12345678".to_string())
        );
        assert_eq!(cell_to_string(&Data::Float(1.5)), Some("1.5".to_string()));
        assert_eq!(cell_to_string(&Data::Int(7)), Some("7".to_string()));
    }

    #[test]
    fn test_cell_to_string_blank_cells() {
        assert_eq!(cell_to_string(&Data::Empty), None);
        assert_eq!(cell_to_string(&Data::String("   ".to_string())), None);
    }

    #[test]
    fn test_cell_to_string_iso_datetime() {
        let text = cell_to_string(&Data::DateTimeIso("2012-05-03T00:00:00".to_string()));
        assert_eq!(
            text.as_deref().and_then(parse_birth_date),
            NaiveDate::from_ymd_opt(2012, 5, 3)
        );
    }

    // ==================== 会員名簿 ====================

    #[test]
    fn test_read_members_from_csv() {
        let file = csv_file(
            "Nombre,Apellidos,Roles,DNI,NIE,Pasaporte,Tutores,Fecha nac.\n\
             Juan,García López,Deportista,,,,Ana Gómez/Luis Ruiz,03/05/2012\n\
             Ana,Gómez,Tutor,011111111H,,,,\n\
             ,,,,,,,\n",
        );

        let members = read_members(file.path()).unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].canonical_name(), "juan_garcia_lopez");
        assert_eq!(members[0].tutors.as_deref(), Some("Ana Gómez/Luis Ruiz"));
        assert_eq!(members[0].birth_date, NaiveDate::from_ymd_opt(2012, 5, 3));
        assert!(members[0].documents.is_empty());
        assert_eq!(members[1].documents.dni.as_deref(), Some("011111111H"));
    }

    #[test]
    fn test_read_members_optional_columns_missing() {
        let file = csv_file("Nombre,Apellidos\nJuan,García\n");

        let members = read_members(file.path()).unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].roles, None);
        assert_eq!(members[0].birth_date, None);
    }

    #[test]
    fn test_read_members_invalid_birth_date_is_none() {
        let file = csv_file("Nombre,Apellidos,Fecha nac.\nJuan,García,desconocida\n");

        let members = read_members(file.path()).unwrap();

        assert_eq!(members[0].birth_date, None);
    }

    #[test]
    fn test_missing_required_column() {
        let file = csv_file("Nombre,Roles\nJuan,Deportista\n");

        let result = read_members(file.path());

        assert!(matches!(
            result,
            Err(RosterError::MissingColumn(column)) if column == "Apellidos"
        ));
    }

    // ==================== 出席者 ====================

    #[test]
    fn test_read_attendees_from_csv_with_bom() {
        let file = csv_file("\u{feff}Nombre,Apellidos,Role,Equipo\nJuan,García,7,Infantil A\nPepe,Ruiz,,Staff\n");

        let attendees = read_attendees(file.path()).unwrap();

        assert_eq!(attendees.len(), 2);
        assert_eq!(attendees[0].team.as_deref(), Some("Infantil A"));
        assert!(attendees[0].is_player());
        assert!(!attendees[1].is_player());
    }

    #[test]
    fn test_read_table_missing_file() {
        let result = read_table(Path::new("/nonexistent/roster.csv"));
        assert!(result.is_err());
    }

    // ==================== スプレッドシート ====================

    /// インライン文字列のセル
    fn text_cell(reference: &str, value: &str) -> String {
        format!(r#"<c r="{reference}" t="inlineStr"><is><t>{value}</t></is></c>"#)
    }

    /// 最小構成の.xlsxを作る（スタイル1番が日付書式）
    fn xlsx_file(sheet_rows: &str) -> NamedTempFile {
        let parts = [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#
                    .to_string(),
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
                    .to_string(),
            ),
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Socios" sheetId="1" r:id="rId1"/></sheets></workbook>"#
                    .to_string(),
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#
                    .to_string(),
            ),
            (
                "xl/styles.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#
                    .to_string(),
            ),
            (
                "xl/worksheets/sheet1.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_rows}</sheetData></worksheet>"#
                ),
            ),
        ];

        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut writer = zip::ZipWriter::new(file.as_file_mut());
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in parts {
            writer.start_file(name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        drop(writer);
        file
    }

    #[test]
    fn test_read_members_from_xlsx() {
        let header = [
            ("A1", "Nombre"),
            ("B1", "Apellidos"),
            ("C1", "Roles"),
            ("D1", "DNI"),
            ("E1", "Tutores"),
            ("F1", "Fecha nac."),
        ]
        .iter()
        .map(|(reference, value)| text_cell(reference, value))
        .collect::<String>();
        let sheet_rows = format!(
            r#"<row r="1">{header}</row><row r="2">{}{}{}<c r="D2"><v>12345678</v></c>{}<c r="F2" s="1"><v>41032</v></c></row><row r="4">{}{}{}</row>"#,
            text_cell("A2", "Juan"),
            text_cell("B2", "García López"),
            text_cell("C2", "Deportista"),
            text_cell("E2", "Ana Gómez"),
            text_cell("A4", "Ana"),
            text_cell("B4", "Gómez"),
            text_cell("C4", "Tutor"),
        );
        let file = xlsx_file(&sheet_rows);

        let members = read_members(file.path()).unwrap();

        // 3行目の空行は読み飛ばす
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].canonical_name(), "juan_garcia_lopez");
        assert_eq!(members[0].documents.dni.as_deref(), Some("12345678"));
        assert_eq!(members[0].birth_date, NaiveDate::from_ymd_opt(2012, 5, 3));
        assert_eq!(members[0].tutors.as_deref(), Some("Ana Gómez"));
        assert_eq!(members[1].roles.as_deref(), Some("Tutor"));
        assert_eq!(members[1].birth_date, None);
    }

    #[test]
    fn test_read_table_invalid_spreadsheet() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"not a workbook").unwrap();

        let result = read_table(file.path());

        assert!(matches!(result, Err(RosterError::Spreadsheet(_))));
    }
}
