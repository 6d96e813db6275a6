/// レイヤー参照解決
///
/// `Layers`リストの各要素を分類し、名前またはバージョンなしARNを
/// 最新バージョンのレイヤーARNに置き換える。
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{LayerDirectory, LayerReference};
use crate::infrastructure::{LayerDirectoryCache, LayerSource, LayerSourceError};

/// `Layers`リストを最新バージョンに解決するリゾルバー
pub struct LayerResolver<S>
where
    S: LayerSource,
{
    /// プロセス生存期間中キャッシュされるレイヤー一覧
    layers: LayerDirectoryCache<S>,
}

impl<S> LayerResolver<S>
where
    S: LayerSource,
{
    /// 新しいLayerResolverを作成
    pub fn new(source: S) -> Self {
        Self {
            layers: LayerDirectoryCache::new(source),
        }
    }

    /// `Layers`リストの各要素を最新バージョンに解決する
    ///
    /// # 処理フロー
    /// 1. レイヤー一覧を取得（キャッシュ済みならそれを使用）
    /// 2. 一覧が空なら入力をそのまま返す
    /// 3. 各要素を分類し、名前・バージョンなしARNのみ解決する
    ///
    /// 要素の順序は保持される。
    ///
    /// # 引数
    /// * `references` - テンプレートの`Layers`リスト
    /// * `region` - 呼び出し元リージョン（ログ用）
    /// * `account_id` - 呼び出し元アカウントID（ログ用）
    pub async fn ensure_latest(
        &self,
        references: &[Value],
        region: &str,
        account_id: &str,
    ) -> Result<Vec<Value>, LayerSourceError> {
        let directory = self.layers.get_available_layers().await?;

        if directory.is_empty() {
            warn!(
                region = region,
                account_id = account_id,
                "No Lambda Layers available under account in region"
            );
            return Ok(references.to_vec());
        }

        Ok(references
            .iter()
            .map(|value| resolve_reference(LayerReference::classify(value), directory))
            .collect())
    }
}

/// 分類済みの参照を1件解決する
fn resolve_reference(reference: LayerReference, directory: &LayerDirectory) -> Value {
    match reference.lookup_name() {
        Some(name) => {
            let arn = directory.resolve_layer_name(name);
            debug!(layer_name = name, layer_arn = %arn, "レイヤー参照を解決");
            Value::String(arn)
        }
        None => reference.into_value(),
    }
}
