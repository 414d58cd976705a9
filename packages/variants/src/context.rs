use crate::rewrite;
use filament_parser::{Document, NodeId};

/// Arguments handed to a selector-rewrite hook, once per comma-separated
/// selector part of each rule in the container.
#[derive(Debug)]
pub struct RuleSelector<'a> {
    /// First class token of the part, as written (escapes kept verbatim).
    pub class_name: &'a str,
    /// The whole selector part.
    pub selector: &'a str,
    /// The configured separator, pre-escaped for direct selector composition.
    pub separator: &'a str,
}

/// Everything a generator invocation may touch.
///
/// The container is a private clone of the block's content; mutating it never
/// affects the original document or any other generator's clone. The original
/// untransformed content stays readable through [`original`](Self::original).
pub struct VariantContext<'a> {
    container: &'a mut Document,
    original: &'a Document,
    separator: String,
    variant: &'a str,
}

impl<'a> VariantContext<'a> {
    pub(crate) fn new(
        container: &'a mut Document,
        original: &'a Document,
        escaped_separator: String,
        variant: &'a str,
    ) -> Self {
        Self {
            container,
            original,
            separator: escaped_separator,
            variant,
        }
    }

    /// The scratch document holding this invocation's clone. Its root
    /// children are the cloned rules; full tree mutation is allowed.
    pub fn container(&mut self) -> &mut Document {
        self.container
    }

    pub fn container_root(&self) -> NodeId {
        self.container.root()
    }

    /// Read-only view of the block content before any variant was applied.
    pub fn original(&self) -> &Document {
        self.original
    }

    /// The configured separator, escaped once so it can be spliced straight
    /// into a selector string.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Name of the variant being generated.
    pub fn variant(&self) -> &str {
        self.variant
    }

    /// Simplified rewrite entry point: `hook` maps each rule's class token to
    /// a complete replacement selector for that part.
    pub fn modify_selectors(&mut self, mut hook: impl FnMut(&RuleSelector<'_>) -> String) {
        let root = self.container.root();
        for rule in self.container.rules_in(root) {
            let Some(selector) = self.container.selector(rule) else {
                continue;
            };
            let selector = selector.to_owned();
            let mut rebuilt = Vec::new();
            for part in rewrite::split_selector_list(&selector) {
                match rewrite::class_name_of(part) {
                    Some(class_name) => rebuilt.push(hook(&RuleSelector {
                        class_name,
                        selector: part,
                        separator: &self.separator,
                    })),
                    None => rebuilt.push(part.to_string()),
                }
            }
            self.container.set_selector(rule, rebuilt.join(", "));
        }
    }
}
