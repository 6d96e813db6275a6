// Infrastructure layer modules
pub mod layer_directory_cache;
pub mod layer_source;
pub mod logging;

// Re-exports
pub use layer_directory_cache::LayerDirectoryCache;
pub use layer_source::{AwsLayerSource, LayerSource, LayerSourceError};
pub use logging::{init_local_logging, init_logging, macro_span};
