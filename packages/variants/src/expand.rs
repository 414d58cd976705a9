use crate::context::VariantContext;
use crate::error::{BlockDiagnostic, ExpandError, ExpandResult, GeneratorError};
use crate::options::VariantOptions;
use crate::ordering::{OrderingMode, OrderingPolicy, ResolvedVariants, RESPONSIVE};
use crate::registry::VariantRegistry;
use crate::rewrite;
use filament_parser::{Document, NodeId};
use std::fmt;
use tracing::{debug, instrument, warn};

/// Name of the at-rule the engine consumes.
pub const VARIANTS_AT_RULE: &str = "variants";

/// Outcome of one document run. A non-empty diagnostics list means some
/// blocks kept their unexpanded form; callers should treat that as
/// build-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionReport {
    /// Number of blocks fully expanded and spliced.
    pub expanded: usize,
    pub diagnostics: Vec<BlockDiagnostic>,
}

impl ExpansionReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The expansion engine: finds `@variants` blocks, runs one generator per
/// requested variant over a private clone of the block's rules, and splices
/// base + generated groups back in place of the block.
pub struct VariantExpander {
    registry: VariantRegistry,
    policy: OrderingPolicy,
    options: VariantOptions,
}

// The registry holds boxed generator closures, so Debug is written by hand.
impl fmt::Debug for VariantExpander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantExpander")
            .field("policy", &self.policy)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl VariantExpander {
    /// Build an expander from resolved configuration.
    ///
    /// Externally registered variants require the `plugin_variants` flag;
    /// authored-order emission comes with it, so plugin authors control
    /// precedence at the call site.
    pub fn new(options: VariantOptions, registry: VariantRegistry) -> ExpandResult<Self> {
        if !options.plugin_variants {
            if let Some(name) = registry.plugin_names().next() {
                return Err(ExpandError::PluginVariantsDisabled {
                    name: name.to_string(),
                });
            }
        }
        let mode = if options.plugin_variants {
            OrderingMode::Authored
        } else {
            OrderingMode::Canonical
        };
        Ok(Self {
            registry,
            policy: OrderingPolicy::new(mode),
            options,
        })
    }

    /// Built-in variants only, canonical ordering, `:` separator.
    pub fn with_defaults() -> Self {
        Self {
            registry: VariantRegistry::with_builtins(),
            policy: OrderingPolicy::new(OrderingMode::Canonical),
            options: VariantOptions::default(),
        }
    }

    pub fn options(&self) -> &VariantOptions {
        &self.options
    }

    /// Expand every `@variants` block in the document.
    ///
    /// Unknown variant names abort the run before any mutation. Generator
    /// failures are collected per block; failing blocks keep their unexpanded
    /// form while sibling blocks continue.
    #[instrument(skip_all)]
    pub fn expand_document(&self, doc: &mut Document) -> ExpandResult<ExpansionReport> {
        let root = doc.root();
        let blocks: Vec<NodeId> = doc
            .at_rules_in(root)
            .into_iter()
            .filter(|&id| doc.at_rule_name(id) == Some(VARIANTS_AT_RULE))
            .collect();

        // Resolve every block up front: configuration errors must surface
        // before any output is produced.
        let mut resolved: Vec<(String, ResolvedVariants)> = Vec::with_capacity(blocks.len());
        for &block in &blocks {
            let params = doc.at_rule_params(block).unwrap_or("").to_string();
            let requested: Vec<String> = params
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
            let variants = self.policy.resolve(&requested, &self.registry, &params)?;
            resolved.push((params, variants));
        }

        debug!(blocks = blocks.len(), "Expanding variant blocks");

        let escaped_separator = rewrite::escape_class_name(&self.options.separator);
        let mut report = ExpansionReport {
            expanded: 0,
            diagnostics: Vec::new(),
        };

        for (&block, (params, variants)) in blocks.iter().zip(resolved) {
            debug!(params = %params, responsive = variants.responsive, "Expanding @variants block");
            match self.expand_block(doc, block, &variants, &escaped_separator) {
                Ok(()) => report.expanded += 1,
                Err((variant, error)) => {
                    warn!(
                        params = %params,
                        variant = %variant,
                        error = %error,
                        "Variant generator failed; block left unexpanded"
                    );
                    report.diagnostics.push(BlockDiagnostic {
                        params,
                        variant,
                        error,
                    });
                }
            }
        }

        Ok(report)
    }

    fn expand_block(
        &self,
        doc: &mut Document,
        block: NodeId,
        variants: &ResolvedVariants,
        escaped_separator: &str,
    ) -> Result<(), (String, GeneratorError)> {
        // Read-only clone of the untransformed content; survives as the
        // reference handed to every generator.
        let mut original = Document::new();
        let original_root = original.root();
        let base: Vec<NodeId> = doc.children(block).to_vec();
        for &child in &base {
            let copy = original.import(doc, child);
            original.append_child(original_root, copy);
        }

        // One private clone per variant. Nothing touches the main document
        // until every generator has succeeded.
        let mut groups: Vec<Document> = Vec::with_capacity(variants.names.len());
        for name in &variants.names {
            let mut scratch = Document::new();
            let scratch_root = scratch.root();
            let originals: Vec<NodeId> = original.children(original_root).to_vec();
            for child in originals {
                let copy = scratch.import(&original, child);
                scratch.append_child(scratch_root, copy);
            }

            let Some(generator) = self.registry.generator(name) else {
                return Err((
                    name.clone(),
                    GeneratorError::failed("variant missing from registry"),
                ));
            };
            let mut ctx = VariantContext::new(
                &mut scratch,
                &original,
                escaped_separator.to_string(),
                name,
            );
            generator(&mut ctx).map_err(|error| (name.clone(), error))?;

            if scratch.rules_in(scratch_root).is_empty()
                && scratch.at_rules_in(scratch_root).is_empty()
            {
                return Err((name.clone(), GeneratorError::EmptyContainer));
            }
            groups.push(scratch);
        }

        if variants.responsive {
            let wrapper = doc.at_rule(RESPONSIVE, "");
            for child in doc.take_children(block) {
                doc.append_child(wrapper, child);
            }
            for scratch in &groups {
                let children: Vec<NodeId> = scratch.children(scratch.root()).to_vec();
                for child in children {
                    let copy = doc.import(scratch, child);
                    doc.append_child(wrapper, copy);
                }
            }
            doc.insert_before(block, wrapper);
        } else {
            for child in doc.take_children(block) {
                doc.insert_before(block, child);
            }
            for scratch in &groups {
                let children: Vec<NodeId> = scratch.children(scratch.root()).to_vec();
                for child in children {
                    let copy = doc.import(scratch, child);
                    doc.insert_before(block, copy);
                }
            }
        }
        doc.detach(block);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filament_parser::parse;

    #[test]
    fn test_expand_hover_block() {
        let mut doc = parse("@variants hover { .banana { color: yellow; } }").unwrap();
        let report = VariantExpander::with_defaults()
            .expand_document(&mut doc)
            .unwrap();
        assert!(report.is_clean());
        assert_eq!(report.expanded, 1);

        let css = doc.to_css();
        assert!(css.contains(".banana"));
        assert!(css.contains(r".hover\:banana:hover"));
        assert!(!css.contains("@variants"));
    }

    #[test]
    fn test_unknown_variant_leaves_document_untouched() {
        let mut doc = parse("@variants hocus { .banana { color: yellow; } }").unwrap();
        let before = doc.to_css();
        let err = VariantExpander::with_defaults()
            .expand_document(&mut doc)
            .unwrap_err();
        assert!(matches!(err, ExpandError::UnknownVariant { ref name, .. } if name == "hocus"));
        assert_eq!(doc.to_css(), before);
    }

    #[test]
    fn test_expander_is_debuggable() {
        let rendered = format!("{:?}", VariantExpander::with_defaults());
        assert!(rendered.contains("VariantExpander"));
        assert!(rendered.contains("Canonical"));
    }

    #[test]
    fn test_plugins_require_flag() {
        let mut registry = VariantRegistry::with_builtins();
        registry.add_selector_variant("first-child", |sel| {
            format!(".first-child{}{}:first-child", sel.separator, sel.class_name)
        });
        let err = VariantExpander::new(VariantOptions::default(), registry).unwrap_err();
        assert_eq!(
            err,
            ExpandError::PluginVariantsDisabled {
                name: "first-child".to_string(),
            }
        );
    }
}
