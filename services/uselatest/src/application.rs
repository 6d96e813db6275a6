// アプリケーション層モジュール
pub mod fragment_transformer;
pub mod layer_resolver;

// 再エクスポート
pub use fragment_transformer::{FragmentTransformer, TransformError};
pub use layer_resolver::LayerResolver;
