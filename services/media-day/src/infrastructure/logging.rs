/// ログ基盤モジュール
///
/// Lambda向けのJSON構造化ログと、バッチツール向けの人間が読みやすいログを提供する。
/// どちらもtracingクレートを使用する。
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// バッチツールのログレベル未指定時の既定値
const DEFAULT_CLI_LEVEL: &str = "info";

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// JSON形式での構造化ログ出力を設定し、環境変数`RUST_LOG`または
/// デフォルトのログレベル（info）でフィルタリングを行う。
///
/// この関数は複数回呼び出しても安全で、最初の呼び出しのみ初期化を実行する。
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        // JSON形式のログレイヤー（Lambda/CloudWatch向け）
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .init();
    });
}

/// バッチツール向けのログサブスクライバーを初期化する
///
/// `RUST_LOG`が設定されていればそれを優先し、なければ`level_env`で指定した
/// 環境変数（FATAL/ERROR/WARNING/INFO/DEBUG）からレベルを決める。
///
/// # 引数
/// * `level_env` - ツール固有のログレベル環境変数名
pub fn init_cli_logging(level_env: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = std::env::var(level_env)
                .ok()
                .and_then(|value| level_directive(&value))
                .unwrap_or(DEFAULT_CLI_LEVEL);
            EnvFilter::new(level)
        });

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    });
}

/// ログレベル名をtracingのフィルタ指定に変換する（大文字小文字を区別しない）
///
/// FATALに相当するレベルはないためERRORとして扱う。
fn level_directive(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_uppercase().as_str() {
        "FATAL" | "CRITICAL" | "ERROR" => Some("error"),
        "WARNING" | "WARN" => Some("warn"),
        "INFO" => Some("info"),
        "DEBUG" => Some("debug"),
        "TRACE" => Some("trace"),
        _ => None,
    }
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
///
/// # 注意
/// この関数はテスト専用であり、本番環境では`init_logging`を使用すること。
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
