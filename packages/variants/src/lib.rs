//! Variant expansion for `@variants` blocks.
//!
//! An `@variants hover, focus { ... }` block is replaced by its original
//! rules followed by one rewritten copy per requested variant, so utilities
//! gain state-conditional forms like `.hover\:banana:hover`. Emission order is
//! canonical by default (`group-hover`, `hover`, `focus`, `active`, then
//! plugins) for stable cascade precedence; enabling plugin variants switches
//! to the order written at the call site. Requesting `responsive` wraps the
//! whole expansion in a single `@responsive` at-rule for downstream
//! breakpoint processing.

pub mod context;
pub mod error;
pub mod expand;
pub mod options;
pub mod ordering;
pub mod registry;
pub mod rewrite;

pub use context::{RuleSelector, VariantContext};
pub use error::{BlockDiagnostic, ExpandError, ExpandResult, GeneratorError};
pub use expand::{ExpansionReport, VariantExpander, VARIANTS_AT_RULE};
pub use options::VariantOptions;
pub use ordering::{OrderingMode, OrderingPolicy, ResolvedVariants, RESPONSIVE};
pub use registry::{GeneratorFn, VariantRegistry};
