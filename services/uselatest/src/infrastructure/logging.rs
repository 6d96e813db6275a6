/// ログ基盤モジュール
///
/// tracingクレートによる構造化ログ設定を提供する。
/// - Lambda環境: JSON形式（CloudWatch Logs向け）
/// - ローカル実行: 人間が読みやすい形式を標準エラー出力へ（標準出力はレスポンスJSON用）
use std::sync::Once;

use tracing::Span;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// `RUST_LOG`未設定時のログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// JSON形式で出力し、`macro_span`のフィールド（request_id等）を各ログに含める。
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
pub fn init_logging() {
    INIT.call_once(|| {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false);

        tracing_subscriber::registry()
            .with(env_filter())
            .with(json_layer)
            .init();
    });
}

/// ローカル実行向けのログサブスクライバーを初期化する
///
/// `init_logging`とは排他で、先に呼ばれた方のみ有効になる。
pub fn init_local_logging() {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer)
            .init();
    });
}

/// マクロ呼び出し1回分のspanを作成する
pub fn macro_span(request_id: &str) -> Span {
    tracing::info_span!("macro_invocation", request_id = request_id)
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(fmt_layer)
            .try_init();
    });
}
