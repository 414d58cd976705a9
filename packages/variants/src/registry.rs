use crate::context::{RuleSelector, VariantContext};
use crate::error::GeneratorError;
use crate::rewrite;

/// Unified generator signature: full tree mutation over the invocation
/// context. Simplified per-selector generators are wrapped into this form.
pub type GeneratorFn =
    Box<dyn Fn(&mut VariantContext<'_>) -> Result<(), GeneratorError> + Send + Sync>;

struct RegistryEntry {
    name: String,
    generator: GeneratorFn,
}

/// Ordered mapping from variant name to generator.
///
/// Registration order is load-bearing: it is the canonical emission order in
/// fixed mode. Built-ins come first (`group-hover`, `hover`, `focus`,
/// `active`), external registrations append after them. Re-registering an
/// existing name replaces its generator in place without moving its position.
pub struct VariantRegistry {
    entries: Vec<RegistryEntry>,
    builtin_count: usize,
}

impl VariantRegistry {
    /// Registry with the built-in variant table.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            builtin_count: 0,
        };
        registry.add_variant("group-hover", ancestor_state_variant("group", "hover"));
        registry.add_variant("hover", pseudo_class_variant("hover"));
        registry.add_variant("focus", pseudo_class_variant("focus"));
        registry.add_variant("active", pseudo_class_variant("active"));
        registry.builtin_count = registry.entries.len();
        registry
    }

    /// Register a raw-tree generator. Last registration for a name wins.
    pub fn add_variant<F>(&mut self, name: impl Into<String>, generator: F)
    where
        F: Fn(&mut VariantContext<'_>) -> Result<(), GeneratorError> + Send + Sync + 'static,
    {
        let name = name.into();
        let generator: GeneratorFn = Box::new(generator);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.generator = generator;
        } else {
            self.entries.push(RegistryEntry { name, generator });
        }
    }

    /// Register a simplified generator: a hook mapping each rule's class
    /// token to a replacement selector.
    pub fn add_selector_variant(
        &mut self,
        name: impl Into<String>,
        hook: impl Fn(&RuleSelector<'_>) -> String + Send + Sync + 'static,
    ) {
        self.add_variant(name, move |ctx: &mut VariantContext<'_>| {
            ctx.modify_selectors(&hook);
            Ok(())
        });
    }

    pub fn generator(&self, name: &str) -> Option<&GeneratorFn> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.generator)
    }

    /// Position in registration order; canonical emission order in fixed
    /// mode.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// True when anything beyond the built-in table is registered.
    pub fn has_plugins(&self) -> bool {
        self.entries.len() > self.builtin_count
    }

    /// Names registered after the built-in table, in registration order.
    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.entries[self.builtin_count..]
            .iter()
            .map(|e| e.name.as_str())
    }
}

/// Built-in pseudo-class form: `.banana` becomes `.hover\:banana:hover`.
fn pseudo_class_variant(
    pseudo: &'static str,
) -> impl Fn(&mut VariantContext<'_>) -> Result<(), GeneratorError> + Send + Sync + 'static {
    move |ctx: &mut VariantContext<'_>| {
        ctx.modify_selectors(|sel| {
            rewrite::pseudo_class_selector(pseudo, sel.separator, sel.selector, pseudo)
        });
        Ok(())
    }
}

/// Built-in ancestor-state form: `.banana` becomes
/// `.group:hover .group-hover\:banana`.
fn ancestor_state_variant(
    ancestor: &'static str,
    pseudo: &'static str,
) -> impl Fn(&mut VariantContext<'_>) -> Result<(), GeneratorError> + Send + Sync + 'static {
    move |ctx: &mut VariantContext<'_>| {
        let variant = format!("{}-{}", ancestor, pseudo);
        ctx.modify_selectors(|sel| {
            rewrite::ancestor_state_selector(ancestor, pseudo, &variant, sel.separator, sel.selector)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let registry = VariantRegistry::with_builtins();
        assert_eq!(registry.position("group-hover"), Some(0));
        assert_eq!(registry.position("hover"), Some(1));
        assert_eq!(registry.position("focus"), Some(2));
        assert_eq!(registry.position("active"), Some(3));
        assert!(!registry.has_plugins());
    }

    #[test]
    fn test_plugin_registration_appends() {
        let mut registry = VariantRegistry::with_builtins();
        registry.add_selector_variant("first-child", |sel| {
            format!(".first-child{}{}:first-child", sel.separator, sel.class_name)
        });
        assert_eq!(registry.position("first-child"), Some(4));
        assert!(registry.has_plugins());
        assert_eq!(registry.plugin_names().collect::<Vec<_>>(), vec!["first-child"]);
    }

    #[test]
    fn test_last_registration_wins_in_place() {
        let mut registry = VariantRegistry::with_builtins();
        registry.add_selector_variant("odd", |sel| format!(".one-{}", sel.class_name));
        registry.add_selector_variant("even", |sel| format!(".two-{}", sel.class_name));
        registry.add_selector_variant("odd", |sel| format!(".three-{}", sel.class_name));

        // Position is kept, the generator is replaced.
        assert_eq!(registry.position("odd"), Some(4));
        assert_eq!(registry.position("even"), Some(5));
    }

    #[test]
    fn test_unknown_lookup() {
        let registry = VariantRegistry::with_builtins();
        assert!(!registry.contains("hocus"));
        assert!(registry.generator("hocus").is_none());
    }
}
