/// 選手データアップロードバッチ
///
/// メディアデー出力CSVからユーザーレコードを作り、DynamoDBテーブルへ書き込む。
///
/// # 環境変数（CLI引数のデフォルト値）
/// - `CBTC_MEDIA_DAY_OUTPUT_PATH`: 入力CSVのパス（デフォルト: output/cbtc_media_day_players.csv）
/// - `CBTC_PLAYERS_TABLE_NAME`: 書き込み先テーブル名（デフォルト: players）
/// - `PLAYERS_DATA_UPLOADER_LOG_LEVEL`: ログレベル（RUST_LOGが優先）
use std::path::PathBuf;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use clap::Parser;
use media_day::application::{generate_user_records, PlayerDataUploader};
use media_day::infrastructure::{init_cli_logging, read_media_day_rows, DynamoUserRepository};
use tracing::info;

/// ログレベルを指定する環境変数
const LOG_LEVEL_VAR: &str = "PLAYERS_DATA_UPLOADER_LOG_LEVEL";

/// CLI引数
#[derive(Parser, Debug)]
#[command(name = "player_data_uploader")]
#[command(about = "メディアデー出力CSVの選手データをDynamoDBへアップロード")]
struct CliArgs {
    /// 入力CSV（players_tutorsの出力）
    #[arg(
        long,
        short = 'i',
        env = "CBTC_MEDIA_DAY_OUTPUT_PATH",
        default_value = "output/cbtc_media_day_players.csv"
    )]
    input: PathBuf,

    /// 書き込み先テーブル名
    #[arg(long, short = 't', env = "CBTC_PLAYERS_TABLE_NAME", default_value = "players")]
    table: String,

    /// アップロードせずにレコードをJSON Linesで標準出力へ書く
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    init_cli_logging(LOG_LEVEL_VAR);

    info!(input = %args.input.display(), table = %args.table, "選手データのアップロードを開始");

    if args.dry_run {
        let rows = read_media_day_rows(&args.input)?;
        for record in generate_user_records(&rows) {
            println!("{}", serde_json::to_string(&record)?);
        }
        info!("ドライランのため書き込みをスキップ");
        return Ok(());
    }

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let repository = DynamoUserRepository::new(DynamoDbClient::new(&aws_config), args.table);

    let uploader = PlayerDataUploader::new(repository);
    let stored = uploader.upload_file(&args.input).await?;

    info!(stored = stored, "選手データのアップロード完了");

    Ok(())
}
