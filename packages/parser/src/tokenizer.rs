use logos::Logos;
use std::ops::Range;

/// Coarse token set for stylesheet structure.
///
/// The parser only needs block structure (`{`, `}`, `;`); everything between
/// structural tokens is kept as raw text and sliced out of the source later.
/// Comments are dropped at this stage.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum Token<'src> {
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semi,

    // A lone slash that did not open a comment (e.g. inside `font: 16px/1.5`).
    #[token("/")]
    Slash,

    #[regex(r"[^{};/]+", |lex| lex.slice())]
    Text(&'src str),
}

/// Tokenize a stylesheet into `(token, byte_range)` pairs.
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .filter_map(|(token, span)| token.ok().map(|t| (t, span)))
        .collect()
}
