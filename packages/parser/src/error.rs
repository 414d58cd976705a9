use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected closing brace at {pos}")]
    UnexpectedClosingBrace { pos: usize },

    #[error("Unexpected end of file at {pos}: unclosed block")]
    UnexpectedEof { pos: usize },

    #[error("Invalid declaration at {pos}: {message}")]
    InvalidDeclaration { pos: usize, message: String },

    #[error("Invalid syntax at {pos}: {message}")]
    InvalidSyntax { pos: usize, message: String },
}

impl ParseError {
    pub fn unexpected_closing_brace(pos: usize) -> Self {
        Self::UnexpectedClosingBrace { pos }
    }

    pub fn unexpected_eof(pos: usize) -> Self {
        Self::UnexpectedEof { pos }
    }

    pub fn invalid_declaration(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            pos,
            message: message.into(),
        }
    }

    pub fn invalid_syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            pos,
            message: message.into(),
        }
    }
}
