use crate::ast::{Document, NodeId, NodeKind};

/// Serialize a document back to stylesheet text with default indentation.
pub fn serialize(doc: &Document) -> String {
    Serializer::new().serialize(doc)
}

/// Serializer converts the arena tree back to stylesheet text.
///
/// Output is reformatted (two-space indent by default); the parser does not
/// keep trivia, so original whitespace is not preserved.
pub struct Serializer {
    indent_level: usize,
    indent_string: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            indent_string: "  ".to_string(),
        }
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent_level: 0,
            indent_string: indent.to_string(),
        }
    }

    pub fn serialize(&mut self, doc: &Document) -> String {
        let mut output = String::new();
        for &child in doc.children(doc.root()) {
            self.serialize_node(doc, child, &mut output);
        }
        output
    }

    fn serialize_node(&mut self, doc: &Document, id: NodeId, output: &mut String) {
        match &doc.node(id).kind {
            NodeKind::Root => {
                for &child in doc.children(id) {
                    self.serialize_node(doc, child, output);
                }
            }
            NodeKind::Rule { selector } => {
                self.push_indent(output);
                output.push_str(selector);
                output.push_str(" {\n");
                self.serialize_children(doc, id, output);
                self.push_indent(output);
                output.push_str("}\n");
            }
            NodeKind::AtRule { name, params } => {
                self.push_indent(output);
                output.push('@');
                output.push_str(name);
                if !params.is_empty() {
                    output.push(' ');
                    output.push_str(params);
                }
                if doc.children(id).is_empty() {
                    output.push_str(";\n");
                } else {
                    output.push_str(" {\n");
                    self.serialize_children(doc, id, output);
                    self.push_indent(output);
                    output.push_str("}\n");
                }
            }
            NodeKind::Declaration {
                property,
                value,
                important,
            } => {
                self.push_indent(output);
                output.push_str(property);
                output.push_str(": ");
                output.push_str(value);
                if *important {
                    output.push_str(" !important");
                }
                output.push_str(";\n");
            }
        }
    }

    fn serialize_children(&mut self, doc: &Document, id: NodeId, output: &mut String) {
        self.indent_level += 1;
        for &child in doc.children(id) {
            self.serialize_node(doc, child, output);
        }
        self.indent_level -= 1;
    }

    fn push_indent(&self, output: &mut String) {
        for _ in 0..self.indent_level {
            output.push_str(&self.indent_string);
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}
