/// UseLatestLayers CloudFormationマクロ Lambda関数
///
/// テンプレートフラグメント内のLambda Layer参照（名前またはバージョンなしARN）を
/// 最新バージョンのレイヤーARNに書き換える。
/// Lambda関数としても、ローカルスクリプトとしても実行可能。
///
/// # 環境変数
/// - AWS_LAMBDA_FUNCTION_NAME: 設定されていればLambda関数として起動
/// - RUST_LOG: ログレベル（デフォルト: info）
/// - AWS_REGION / AWS_PROFILE 等: aws-configの標準設定
///
/// # ローカル実行
/// ```bash
/// # 呼び出しイベントJSONを変換してレスポンスを出力
/// cargo run --bin transform -- --event event.json --pretty
///
/// # 標準入力から読み込み
/// cat event.json | cargo run --bin transform
/// ```
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{Instrument, debug, error, info};
use uselatest::application::FragmentTransformer;
use uselatest::domain::MacroResponse;
use uselatest::infrastructure::{AwsLayerSource, init_local_logging, init_logging, macro_span};

/// FragmentTransformerの静的インスタンス
///
/// Lambda warm start時にSDKクライアントとレイヤー一覧キャッシュを再利用するため、
/// 一度初期化したインスタンスを静的に保持する。
static TRANSFORMER: OnceCell<FragmentTransformer<AwsLayerSource>> = OnceCell::const_new();

/// FragmentTransformerを取得（初期化されていなければ初期化）
async fn get_transformer() -> &'static FragmentTransformer<AwsLayerSource> {
    TRANSFORMER
        .get_or_init(|| async { FragmentTransformer::new(AwsLayerSource::from_config().await) })
        .await
}

/// コマンドライン引数（ローカル実行用）
#[derive(Parser, Debug)]
#[command(name = "transform")]
#[command(about = "CloudFormationマクロ呼び出しイベントのLayersを最新バージョンに書き換える")]
struct CliArgs {
    /// 呼び出しイベントJSONファイルのパス（`-`で標準入力）
    #[arg(long, short = 'e', default_value = "-")]
    event: PathBuf,

    /// レスポンスJSONを整形して出力する
    #[arg(long, short = 'p')]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok() {
        init_logging();
        info!("Lambda関数として起動");
        let func = service_fn(handler);
        lambda_runtime::run(func).await?;
    } else {
        init_local_logging();
        run_local(CliArgs::parse()).await?;
    }

    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// 変換に失敗した場合はエラーを返して呼び出しを失敗させる
/// （`status: "failure"`のレスポンスは返さない）。
async fn handler(event: LambdaEvent<Value>) -> Result<MacroResponse, Error> {
    transform(event.payload).await
}

/// イベントを変換してレスポンスを返す（Lambda/ローカル共通）
async fn transform(event: Value) -> Result<MacroResponse, Error> {
    let request_id = event
        .get("requestId")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let span = macro_span(&request_id);

    async move {
        debug!(event = %event, "マクロ呼び出しイベント");

        let transformer = get_transformer().await;
        match transformer.handle(event).await {
            Ok(response) => {
                debug!(
                    fragment = %response.fragment,
                    status = ?response.status,
                    "マクロレスポンス"
                );
                info!("フラグメント変換完了");
                Ok(response)
            }
            Err(err) => {
                error!(error = %err, "フラグメント変換失敗");
                Err(err.into())
            }
        }
    }
    .instrument(span)
    .await
}

/// ローカルスクリプトとして実行
async fn run_local(args: CliArgs) -> Result<(), Error> {
    info!(event_path = %args.event.display(), "ローカルスクリプトとして起動");

    let raw = read_event_text(&args.event).await?;
    let output = get_transformer().await.handle_json(&raw, args.pretty).await?;
    println!("{}", output);

    Ok(())
}

/// 呼び出しイベントJSONを読み込む（`-`なら標準入力）
async fn read_event_text(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(path).await
    }
}
