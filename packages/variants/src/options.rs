use serde::{Deserialize, Serialize};

/// Resolved expansion configuration, immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOptions {
    /// String joining a variant-name prefix to the base class name, before
    /// escaping.
    pub separator: String,

    /// Enables externally registered variants and switches emission to the
    /// order variants are written at the call site.
    pub plugin_variants: bool,
}

impl Default for VariantOptions {
    fn default() -> Self {
        Self {
            separator: ":".to_string(),
            plugin_variants: false,
        }
    }
}

impl VariantOptions {
    pub fn with_plugin_variants() -> Self {
        Self {
            plugin_variants: true,
            ..Self::default()
        }
    }
}
