//! Configuration model for p4lockmon.
//!
//! An optional YAML file supplies output locations and snapshot settings.
//! Missing keys take defaults matching an SDP layout, unknown keys are
//! ignored, and command-line flags override file values.

mod model;
mod operations;


// Re-export public API
pub use model::Config;
pub use operations::Overrides;
