//! レイヤー一覧取得モジュール
//!
//! ListLayers APIでアカウント・リージョン内の利用可能なLambda Layerを取得する。
//! - 最初のページのみを使用する（ページネーションしない）
//! - 失敗時の再試行は行わない

use async_trait::async_trait;
use aws_sdk_lambda::Client as LambdaClient;
use aws_sdk_lambda::types::LayersListItem;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{LayerDirectory, LayerRecord};

/// レイヤー一覧取得のエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerSourceError {
    /// AWS SDK エラー
    #[error("AWS Lambda APIエラー: {0}")]
    AwsSdkError(String),
}

/// レイヤー一覧取得トレイト（テスト用の抽象化）
#[async_trait]
pub trait LayerSource: Send + Sync {
    /// 利用可能なレイヤーの一覧を取得する
    ///
    /// # 戻り値
    /// * `Ok(LayerDirectory)` - レイヤー一覧（空の場合もある）
    /// * `Err(LayerSourceError)` - API呼び出しエラー
    async fn list_layers(&self) -> Result<LayerDirectory, LayerSourceError>;
}

/// 実際のAWS Lambda SDKを使用したレイヤー一覧取得実装
pub struct AwsLayerSource {
    client: LambdaClient,
}

impl AwsLayerSource {
    /// 新しいAwsLayerSourceを作成
    pub fn new(client: LambdaClient) -> Self {
        Self { client }
    }

    /// AWS設定からデフォルトのクライアントを作成
    ///
    /// リージョンと認証情報は標準の環境変数・認証情報チェーンから読み込む。
    pub async fn from_config() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = LambdaClient::new(&config);
        Self::new(client)
    }

    /// ListLayersの1件をLayerRecordに変換する
    ///
    /// レイヤー名または最新バージョンARNが欠けている項目はNoneを返す。
    fn to_record(item: &LayersListItem) -> Option<LayerRecord> {
        let name = item.layer_name()?;
        let arn = item.latest_matching_version()?.layer_version_arn()?;
        Some(LayerRecord::new(name, arn))
    }
}

#[async_trait]
impl LayerSource for AwsLayerSource {
    async fn list_layers(&self) -> Result<LayerDirectory, LayerSourceError> {
        let output = self.client.list_layers().send().await.map_err(|err| {
            warn!(error = %err, "ListLayersエラー");
            LayerSourceError::AwsSdkError(err.to_string())
        })?;

        let items = output.layers();
        let directory: LayerDirectory = items
            .iter()
            .filter_map(|item| {
                let record = Self::to_record(item);
                if record.is_none() {
                    warn!(
                        layer_name = ?item.layer_name(),
                        "レイヤー名または最新バージョンARNが欠落した項目をスキップ"
                    );
                }
                record
            })
            .collect();

        info!(
            layer_count = directory.len(),
            has_next_page = output.next_marker().is_some(),
            "ListLayers成功"
        );

        Ok(directory)
    }
}
