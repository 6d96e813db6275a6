//! レイヤー一覧キャッシュ
//!
//! LayerSourceの結果をプロセス生存期間中メモ化する。
//! Lambda warm start時はListLayersを再呼び出ししない。

use tokio::sync::OnceCell;
use tracing::debug;

use super::layer_source::{LayerSource, LayerSourceError};
use crate::domain::LayerDirectory;

/// 一度だけ取得するレイヤー一覧
///
/// 初回の`get_available_layers`でのみLayerSourceを呼び出し、以降はキャッシュを返す。
/// 取得に失敗した場合はキャッシュせず、エラーをそのまま返す。
/// 無効化の手段は持たない（テストでは新しいインスタンスを作成する）。
pub struct LayerDirectoryCache<S>
where
    S: LayerSource,
{
    source: S,
    directory: OnceCell<LayerDirectory>,
}

impl<S> LayerDirectoryCache<S>
where
    S: LayerSource,
{
    /// 新しいLayerDirectoryCacheを作成
    pub fn new(source: S) -> Self {
        Self {
            source,
            directory: OnceCell::new(),
        }
    }

    /// 利用可能なレイヤー一覧を取得（未取得ならLayerSourceから取得）
    pub async fn get_available_layers(&self) -> Result<&LayerDirectory, LayerSourceError> {
        if let Some(directory) = self.directory.get() {
            debug!(layer_count = directory.len(), "キャッシュ済みレイヤー一覧を使用");
            return Ok(directory);
        }

        self.directory
            .get_or_try_init(|| async { self.source.list_layers().await })
            .await
    }

    /// キャッシュ済みかどうか
    #[cfg(test)]
    fn is_populated(&self) -> bool {
        self.directory.initialized()
    }
}
