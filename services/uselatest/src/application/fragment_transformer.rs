/// フラグメント変換ハンドラー
///
/// CloudFormationマクロの呼び出しイベントを受け取り、テンプレートフラグメント内の
/// `Layers`リストを最新バージョンのレイヤーARNに書き換えてレスポンスを返す。
///
/// 書き換え対象:
/// - `Globals.Function.Layers`
/// - `Resources.<論理ID>.Properties.Layers`（`AWS::Serverless::Function`と`AWS::Lambda::Function`のみ）
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::LayerResolver;
use crate::domain::{MacroRequest, MacroResponse};
use crate::infrastructure::{LayerSource, LayerSourceError};

/// `Layers`を書き換えるリソースタイプ
pub const TRANSFORMABLE_TYPES: [&str; 2] = ["AWS::Serverless::Function", "AWS::Lambda::Function"];

/// フラグメント変換のエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// 必須フィールドが欠落（または型が不正）
    #[error("Missing required field in event: {0}")]
    MissingField(&'static str),
    /// イベントJSONの解析・レスポンスJSONの生成に失敗
    #[error("Invalid event JSON: {0}")]
    InvalidJson(String),
    /// レイヤー一覧取得エラー
    #[error(transparent)]
    LayerSource(#[from] LayerSourceError),
}

/// CloudFormationマクロのフラグメント変換ハンドラー
///
/// LayerSourceはコンストラクタで注入する。
/// 同じインスタンスを使い回す限り、レイヤー一覧の取得は1回だけ行われる。
pub struct FragmentTransformer<S>
where
    S: LayerSource,
{
    resolver: LayerResolver<S>,
}

impl<S> FragmentTransformer<S>
where
    S: LayerSource,
{
    /// 新しいFragmentTransformerを作成
    pub fn new(source: S) -> Self {
        Self {
            resolver: LayerResolver::new(source),
        }
    }

    /// マクロ呼び出しイベントを処理
    ///
    /// # 処理フロー
    /// 1. イベントからregion、accountId、requestId、fragmentを抽出
    /// 2. `Globals.Function.Layers`を解決して書き戻す
    /// 3. 対象タイプの各リソースの`Properties.Layers`を解決して書き戻す
    /// 4. `{ fragment, requestId, status: "success" }`を返す
    ///
    /// # 戻り値
    /// * 成功時は`Ok(MacroResponse)`（statusは常に`success`）
    /// * 必須フィールド欠落・レイヤー一覧取得失敗時は`Err(TransformError)`
    pub async fn handle(&self, event: Value) -> Result<MacroResponse, TransformError> {
        let MacroRequest {
            request_id,
            region,
            account_id,
            mut fragment,
        } = parse_request(event)?;

        info!(
            request_id = %request_id,
            region = %region,
            account_id = %account_id,
            "マクロ呼び出しを受信"
        );

        if let Some(layers) = global_layers_mut(&mut fragment) {
            let latest = self.resolver.ensure_latest(layers, &region, &account_id).await?;
            debug!(layer_count = latest.len(), "Globals.Function.Layersを書き換え");
            *layers = latest;
        }

        if let Some(resources) = fragment.get_mut("Resources").and_then(Value::as_object_mut) {
            for (logical_id, resource) in resources.iter_mut() {
                let Some(layers) = resource_layers_mut(resource) else {
                    continue;
                };

                let latest = self.resolver.ensure_latest(layers, &region, &account_id).await?;
                debug!(
                    logical_id = %logical_id,
                    layer_count = latest.len(),
                    "Properties.Layersを書き換え"
                );
                *layers = latest;
            }
        }

        Ok(MacroResponse::success(request_id, fragment))
    }

    /// JSON文字列の呼び出しイベントを処理し、レスポンスをJSON文字列で返す
    ///
    /// ローカル実行用。`pretty`が真なら整形して出力する。
    pub async fn handle_json(&self, raw: &str, pretty: bool) -> Result<String, TransformError> {
        let event: Value =
            serde_json::from_str(raw).map_err(|err| TransformError::InvalidJson(err.to_string()))?;

        let response = self.handle(event).await?;

        let output = if pretty {
            serde_json::to_string_pretty(&response)
        } else {
            serde_json::to_string(&response)
        };
        output.map_err(|err| TransformError::InvalidJson(err.to_string()))
    }
}

/// イベントから必須フィールドを抽出する
fn parse_request(mut event: Value) -> Result<MacroRequest, TransformError> {
    let region = required_str(&event, "region")?;
    let account_id = required_str(&event, "accountId")?;
    let request_id = required_str(&event, "requestId")?;

    let fragment = event
        .get_mut("fragment")
        .filter(|fragment| !fragment.is_null())
        .map(Value::take)
        .ok_or(TransformError::MissingField("fragment"))?;

    Ok(MacroRequest {
        request_id,
        region,
        account_id,
        fragment,
    })
}

fn required_str(event: &Value, field: &'static str) -> Result<String, TransformError> {
    event
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(TransformError::MissingField(field))
}

/// 空でない`Globals.Function.Layers`を取得
fn global_layers_mut(fragment: &mut Value) -> Option<&mut Vec<Value>> {
    fragment
        .pointer_mut("/Globals/Function/Layers")
        .and_then(Value::as_array_mut)
        .filter(|layers| !layers.is_empty())
}

/// 対象タイプのリソースであれば、空でない`Properties.Layers`を取得
fn resource_layers_mut(resource: &mut Value) -> Option<&mut Vec<Value>> {
    let resource_type = resource.get("Type").and_then(Value::as_str)?;
    if !TRANSFORMABLE_TYPES.contains(&resource_type) {
        return None;
    }

    resource
        .pointer_mut("/Properties/Layers")
        .and_then(Value::as_array_mut)
        .filter(|layers| !layers.is_empty())
}
