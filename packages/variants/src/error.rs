use thiserror::Error;

pub type ExpandResult<T> = Result<T, ExpandError>;

/// Configuration errors. These abort the whole run before any output is
/// produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpandError {
    #[error("Unknown variant `{name}` requested by `@variants {params}`")]
    UnknownVariant { name: String, params: String },

    #[error("Variant `{name}` is registered by a plugin but plugin variants are not enabled")]
    PluginVariantsDisabled { name: String },
}

/// Failures raised by a single generator invocation. Fatal to the block being
/// expanded, not to the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("{0}")]
    Failed(String),

    #[error("Variant generator left its container without any rules")]
    EmptyContainer,
}

impl GeneratorError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// One per-block generator failure, reported alongside the best-effort
/// document. The failing block keeps its unexpanded form.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDiagnostic {
    /// The variant list as written in the block's `@variants` params.
    pub params: String,
    /// The variant whose generator failed.
    pub variant: String,
    pub error: GeneratorError,
}
