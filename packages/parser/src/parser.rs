use crate::ast::{Document, NodeId};
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, Token};
use std::ops::Range;

/// Parse stylesheet text into a [`Document`].
pub fn parse(source: &str) -> ParseResult<Document> {
    Parser::new(source).parse_document()
}

/// Recursive-descent parser over the coarse token stream.
///
/// Preludes (everything before a `{` or `;`) are accumulated as text and then
/// classified: `@`-prefixed preludes become at-rules, preludes closed by `{`
/// become rules, preludes closed by `;` inside a block become declarations.
pub struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    source_len: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            source_len: source.len(),
        }
    }

    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let mut doc = Document::new();
        let root = doc.root();
        self.parse_nodes(&mut doc, root, true)?;
        Ok(doc)
    }

    fn next(&mut self) -> Option<(Token<'src>, Range<usize>)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn parse_nodes(&mut self, doc: &mut Document, parent: NodeId, is_root: bool) -> ParseResult<()> {
        let mut prelude = String::new();
        let mut prelude_start = 0usize;

        loop {
            match self.next() {
                None => {
                    if !is_root {
                        return Err(ParseError::unexpected_eof(self.source_len));
                    }
                    if !prelude.trim().is_empty() {
                        return Err(ParseError::invalid_syntax(
                            prelude_start,
                            "unterminated statement at end of input",
                        ));
                    }
                    return Ok(());
                }
                Some((Token::Text(text), span)) => {
                    if prelude.trim().is_empty() {
                        prelude_start = span.start;
                    }
                    prelude.push_str(text);
                }
                Some((Token::Slash, _)) => {
                    prelude.push('/');
                }
                Some((Token::Semi, span)) => {
                    let statement = collapse_whitespace(prelude.trim());
                    prelude.clear();
                    if statement.is_empty() {
                        continue;
                    }
                    let node = statement_node(doc, &statement, span.start)?;
                    doc.append_child(parent, node);
                }
                Some((Token::LBrace, span)) => {
                    let head = collapse_whitespace(prelude.trim());
                    prelude.clear();
                    if head.is_empty() {
                        return Err(ParseError::invalid_syntax(
                            span.start,
                            "missing selector before '{'",
                        ));
                    }
                    let node = if let Some(rest) = head.strip_prefix('@') {
                        let (name, params) = split_at_rule(rest);
                        doc.at_rule(name, params)
                    } else {
                        doc.rule(head)
                    };
                    doc.append_child(parent, node);
                    self.parse_nodes(doc, node, false)?;
                }
                Some((Token::RBrace, span)) => {
                    if is_root {
                        return Err(ParseError::unexpected_closing_brace(span.start));
                    }
                    // Final declaration may omit its semicolon.
                    let trailing = collapse_whitespace(prelude.trim());
                    if !trailing.is_empty() {
                        let node = statement_node(doc, &trailing, span.start)?;
                        doc.append_child(parent, node);
                    }
                    return Ok(());
                }
            }
        }
    }
}

fn statement_node(doc: &mut Document, statement: &str, pos: usize) -> ParseResult<NodeId> {
    if let Some(rest) = statement.strip_prefix('@') {
        let (name, params) = split_at_rule(rest);
        return Ok(doc.at_rule(name, params));
    }
    let (property, value, important) = parse_declaration(statement, pos)?;
    Ok(doc.declaration(property, value, important))
}

fn parse_declaration(text: &str, pos: usize) -> ParseResult<(String, String, bool)> {
    let Some((property, value)) = text.split_once(':') else {
        return Err(ParseError::invalid_declaration(
            pos,
            format!("expected ':' in `{}`", text),
        ));
    };
    let property = property.trim().to_string();
    let mut value = value.trim();
    let mut important = false;
    if let Some(stripped) = value.strip_suffix("!important") {
        value = stripped.trim_end();
        important = true;
    }
    if property.is_empty() {
        return Err(ParseError::invalid_declaration(pos, "empty property name"));
    }
    Ok((property, value.to_string(), important))
}

fn split_at_rule(rest: &str) -> (String, String) {
    match rest.split_once(char::is_whitespace) {
        Some((name, params)) => (name.to_string(), params.trim().to_string()),
        None => (rest.to_string(), String::new()),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    #[test]
    fn test_parse_simple_rule() {
        let doc = parse(".banana { color: yellow; }").unwrap();
        let root = doc.root();
        let rules = doc.rules_in(root);
        assert_eq!(rules.len(), 1);
        assert_eq!(doc.selector(rules[0]), Some(".banana"));

        let decls = doc.declarations_in(rules[0]);
        assert_eq!(decls.len(), 1);
        assert_eq!(
            doc.node(decls[0]).kind,
            NodeKind::Declaration {
                property: "color".to_string(),
                value: "yellow".to_string(),
                important: false,
            }
        );
    }

    #[test]
    fn test_parse_variants_block() {
        let doc = parse(
            r#"
            @variants hover, focus {
                .banana { color: yellow; }
                .chocolate { color: brown; }
            }
            "#,
        )
        .unwrap();
        let root = doc.root();
        let at_rules = doc.at_rules_in(root);
        assert_eq!(at_rules.len(), 1);
        assert_eq!(doc.at_rule_name(at_rules[0]), Some("variants"));
        assert_eq!(doc.at_rule_params(at_rules[0]), Some("hover, focus"));
        assert_eq!(doc.children(at_rules[0]).len(), 2);
    }

    #[test]
    fn test_parse_important() {
        let doc = parse(".a { color: red !important; }").unwrap();
        let root = doc.root();
        let decls = doc.declarations_in(root);
        assert!(doc.important(decls[0]));
    }

    #[test]
    fn test_parse_last_declaration_without_semicolon() {
        let doc = parse(".a { color: red }").unwrap();
        let root = doc.root();
        assert_eq!(doc.declarations_in(root).len(), 1);
    }

    #[test]
    fn test_parse_bodyless_at_rule() {
        let doc = parse("@import \"theme.css\";").unwrap();
        let root = doc.root();
        let at_rules = doc.at_rules_in(root);
        assert_eq!(doc.at_rule_name(at_rules[0]), Some("import"));
        assert!(doc.children(at_rules[0]).is_empty());
    }

    #[test]
    fn test_parse_escaped_selector() {
        let doc = parse(r".hover\:banana:hover { color: yellow; }").unwrap();
        let root = doc.root();
        let rules = doc.rules_in(root);
        assert_eq!(doc.selector(rules[0]), Some(r".hover\:banana:hover"));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(matches!(
            parse(".a { color: red; "),
            Err(ParseError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            parse(".a { } }"),
            Err(ParseError::UnexpectedClosingBrace { .. })
        ));
    }

    #[test]
    fn test_declaration_without_colon() {
        assert!(matches!(
            parse(".a { nonsense; }"),
            Err(ParseError::InvalidDeclaration { .. })
        ));
    }
}
