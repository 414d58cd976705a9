//! Selector rewriting: escaping and variant-prefix composition.
//!
//! Selectors are rewritten per class-token occurrence, so compound and
//! combinator selectors keep their structure. Escaping is a single
//! deterministic pass; tokens already written with escapes in the source are
//! copied verbatim and never escaped a second time.

/// Escape every character that is not a bare CSS identifier character with a
/// single preceding backslash.
pub fn escape_class_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if !is_ident_char(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// The first class token of a selector part, as written (escape pairs kept).
pub fn class_name_of(selector: &str) -> Option<&str> {
    let dot = selector.find('.')?;
    let rest = &selector[dot + 1..];
    let len = class_token_len(rest);
    if len == 0 {
        None
    } else {
        Some(&rest[..len])
    }
}

/// Byte length of the class token at the start of `s`. Backslash escape pairs
/// count as part of the token.
fn class_token_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some((_, escaped)) => len = i + 1 + escaped.len_utf8(),
                None => {
                    len = i + 1;
                    break;
                }
            }
        } else if is_ident_char(ch) {
            len = i + ch.len_utf8();
        } else {
            break;
        }
    }
    len
}

/// Rewrite each `.token` occurrence in `selector` through `f`. The callback
/// receives the token without its dot and returns the full replacement
/// (including any leading dot). Non-class structure passes through untouched.
pub fn map_class_tokens(selector: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(selector.len() * 2);
    let mut rest = selector;
    while let Some(dot) = rest.find('.') {
        out.push_str(&rest[..dot]);
        let after = &rest[dot + 1..];
        let len = class_token_len(after);
        if len == 0 {
            out.push('.');
            rest = after;
        } else {
            out.push_str(&f(&after[..len]));
            rest = &after[len..];
        }
    }
    out.push_str(rest);
    out
}

/// Prefix every class token with the variant name and append a pseudo-class:
/// `.banana` + `hover` becomes `.hover\:banana:hover`.
///
/// `escaped_separator` is the configured separator already escaped once.
pub fn pseudo_class_selector(
    variant: &str,
    escaped_separator: &str,
    selector: &str,
    pseudo: &str,
) -> String {
    let prefix = format!(".{}{}", escape_class_name(variant), escaped_separator);
    let mut out = map_class_tokens(selector, |token| format!("{}{}", prefix, token));
    out.push(':');
    out.push_str(pseudo);
    out
}

/// Ancestor-state form: the state lives on an ancestor carrying
/// `.{ancestor}`, the prefixed class on the styled element itself.
/// `.banana` + `group-hover` becomes `.group:hover .group-hover\:banana`.
pub fn ancestor_state_selector(
    ancestor: &str,
    pseudo: &str,
    variant: &str,
    escaped_separator: &str,
    selector: &str,
) -> String {
    let prefix = format!(".{}{}", escape_class_name(variant), escaped_separator);
    let rewritten = map_class_tokens(selector, |token| format!("{}{}", prefix, token));
    format!(".{}:{} {}", ancestor, pseudo, rewritten)
}

/// Split a selector list on top-level commas, ignoring commas inside
/// parentheses and brackets.
pub fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in selector.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(selector[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(selector[start..].trim());
    parts
}
