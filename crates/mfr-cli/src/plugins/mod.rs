pub mod resolve;

pub use resolve::{resolve_plugin_paths, RequirementKind, RequirementSelection, ALL_PLUGINS};
