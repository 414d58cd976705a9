use crate::error::{ExpandError, ExpandResult};
use crate::registry::VariantRegistry;
use serde::{Deserialize, Serialize};

/// The `responsive` pseudo-variant: no generator of its own, it wraps the
/// whole expansion instead.
pub const RESPONSIVE: &str = "responsive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderingMode {
    /// Emit in registry order (built-ins in canonical order, then plugins in
    /// registration order), regardless of how the call site is written.
    Canonical,
    /// Emit in exactly the order written at the call site.
    Authored,
}

/// Decides generator sequence for a requested variant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingPolicy {
    mode: OrderingMode,
}

/// Outcome of name resolution for one block: the generating variants in
/// emission order, plus whether `responsive` wrapping was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariants {
    pub names: Vec<String>,
    pub responsive: bool,
}

impl OrderingPolicy {
    pub fn new(mode: OrderingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OrderingMode {
        self.mode
    }

    /// Validate and order a requested variant list.
    ///
    /// Duplicates collapse to their first occurrence; `responsive` is lifted
    /// out into a flag; any other name missing from the registry is a
    /// configuration error.
    pub fn resolve(
        &self,
        requested: &[String],
        registry: &VariantRegistry,
        params: &str,
    ) -> ExpandResult<ResolvedVariants> {
        let mut names: Vec<String> = Vec::new();
        let mut responsive = false;

        for name in requested {
            let name = name.trim();
            if name.is_empty() || names.iter().any(|n| n == name) {
                continue;
            }
            if name == RESPONSIVE {
                responsive = true;
                continue;
            }
            if !registry.contains(name) {
                return Err(ExpandError::UnknownVariant {
                    name: name.to_string(),
                    params: params.to_string(),
                });
            }
            names.push(name.to_string());
        }

        if self.mode == OrderingMode::Canonical {
            names.sort_by_key(|n| registry.position(n).unwrap_or(usize::MAX));
        }

        Ok(ResolvedVariants { names, responsive })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_canonical_order_ignores_authored_order() {
        let registry = VariantRegistry::with_builtins();
        let policy = OrderingPolicy::new(OrderingMode::Canonical);
        let resolved = policy
            .resolve(
                &requested(&["focus", "active", "hover", "group-hover"]),
                &registry,
                "",
            )
            .unwrap();
        assert_eq!(resolved.names, vec!["group-hover", "hover", "focus", "active"]);
    }

    #[test]
    fn test_authored_order_is_kept() {
        let registry = VariantRegistry::with_builtins();
        let policy = OrderingPolicy::new(OrderingMode::Authored);
        let resolved = policy
            .resolve(&requested(&["focus", "active", "hover"]), &registry, "")
            .unwrap();
        assert_eq!(resolved.names, vec!["focus", "active", "hover"]);
    }

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        let registry = VariantRegistry::with_builtins();
        let policy = OrderingPolicy::new(OrderingMode::Authored);
        let resolved = policy
            .resolve(&requested(&["focus", "hover", "focus"]), &registry, "")
            .unwrap();
        assert_eq!(resolved.names, vec!["focus", "hover"]);
    }

    #[test]
    fn test_responsive_is_lifted_out() {
        let registry = VariantRegistry::with_builtins();
        let policy = OrderingPolicy::new(OrderingMode::Canonical);
        let resolved = policy
            .resolve(&requested(&["responsive", "hover"]), &registry, "")
            .unwrap();
        assert!(resolved.responsive);
        assert_eq!(resolved.names, vec!["hover"]);
    }

    #[test]
    fn test_unknown_variant_errors() {
        let registry = VariantRegistry::with_builtins();
        let policy = OrderingPolicy::new(OrderingMode::Canonical);
        let err = policy
            .resolve(&requested(&["hocus"]), &registry, "hocus")
            .unwrap_err();
        assert_eq!(
            err,
            ExpandError::UnknownVariant {
                name: "hocus".to_string(),
                params: "hocus".to_string(),
            }
        );
    }

    #[test]
    fn test_plugins_follow_builtins_in_canonical_mode() {
        let mut registry = VariantRegistry::with_builtins();
        registry.add_selector_variant("first-child", |sel| {
            format!(".first-child{}{}:first-child", sel.separator, sel.class_name)
        });
        let policy = OrderingPolicy::new(OrderingMode::Canonical);
        let resolved = policy
            .resolve(&requested(&["first-child", "hover"]), &registry, "")
            .unwrap();
        assert_eq!(resolved.names, vec!["hover", "first-child"]);
    }
}
