/// 選手・保護者突合バッチ
///
/// 会員名簿（Excel/CSV）と出席者CSVを読み込み、メディアデー出力CSVを書き出す。
///
/// # 環境変数（CLI引数のデフォルト値）
/// - `CBTC_ALL_PLAYERS_PATH`: 会員名簿のパス（デフォルト: data/cbtc_all.xlsx）
/// - `CBTC_MEDIA_DAY_PATH`: 出席者CSVのパス（デフォルト: data/cbtc_media_day.csv）
/// - `CBTC_MEDIA_DAY_OUTPUT_PATH`: 出力CSVのパス（デフォルト: output/cbtc_media_day_players.csv）
/// - `PLAYERS_TUTORS_LOG_LEVEL`: ログレベル（RUST_LOGが優先）
use std::path::PathBuf;

use clap::Parser;
use media_day::application::run_players_tutors;
use media_day::infrastructure::{
    init_cli_logging, read_attendees, read_members, write_media_day_rows,
};
use tracing::{debug, info};

/// ログレベルを指定する環境変数
const LOG_LEVEL_VAR: &str = "PLAYERS_TUTORS_LOG_LEVEL";

/// CLI引数
#[derive(Parser, Debug)]
#[command(name = "players_tutors")]
#[command(about = "会員名簿と出席者リストを突合してメディアデー出力CSVを作成")]
struct CliArgs {
    /// 会員名簿（.xlsx/.xls/.ods/.csv）
    #[arg(long, short = 'm', env = "CBTC_ALL_PLAYERS_PATH", default_value = "data/cbtc_all.xlsx")]
    members: PathBuf,

    /// 出席者CSV
    #[arg(long, short = 'a', env = "CBTC_MEDIA_DAY_PATH", default_value = "data/cbtc_media_day.csv")]
    attendees: PathBuf,

    /// 出力CSV（親ディレクトリは自動作成）
    #[arg(
        long,
        short = 'o',
        env = "CBTC_MEDIA_DAY_OUTPUT_PATH",
        default_value = "output/cbtc_media_day_players.csv"
    )]
    output: PathBuf,

    /// 統計レポートの書き出し先（省略時はログのみ）
    #[arg(long)]
    report_path: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    init_cli_logging(LOG_LEVEL_VAR);

    info!(
        members = %args.members.display(),
        attendees = %args.attendees.display(),
        "選手・保護者突合を開始"
    );

    let members = read_members(&args.members)?;
    let attendees = read_attendees(&args.attendees)?;

    let report = run_players_tutors(members, attendees);

    write_media_day_rows(&args.output, &report.rows)?;
    info!(
        rows = report.rows.len(),
        output = %args.output.display(),
        "出力CSVを書き出し"
    );

    let statistics = report.statistics.to_string();
    info!("\n{}", statistics);

    for attendee in &report.not_found {
        debug!(canonical_name = %attendee.canonical_name(), "選手が見つからない出席者");
    }

    if let Some(path) = &args.report_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &statistics)?;
        info!(report = %path.display(), "統計レポートを書き出し");
    }

    Ok(())
}
