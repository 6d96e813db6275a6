// Domain layer modules
pub mod layer_directory;
pub mod layer_reference;
pub mod macro_envelope;

// Re-exports
pub use layer_directory::{LayerDirectory, LayerRecord};
pub use layer_reference::LayerReference;
pub use macro_envelope::{MacroRequest, MacroResponse, MacroStatus};
