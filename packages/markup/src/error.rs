use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected closing tag </{found}> at {pos}{}", expected_suffix(.expected))]
    UnexpectedCloseTag {
        pos: usize,
        found: String,
        expected: Option<String>,
    },

    #[error("Unclosed <{tag}> opened at {pos}")]
    UnclosedTag { pos: usize, tag: String },

    #[error("Unexpected end of input at {pos}")]
    UnexpectedEof { pos: usize },

    #[error("Invalid syntax at {pos}: {message}")]
    InvalidSyntax { pos: usize, message: String },
}

fn expected_suffix(expected: &Option<String>) -> String {
    match expected {
        Some(tag) => format!(", expected </{}>", tag),
        None => String::new(),
    }
}

impl ParseError {
    pub fn unexpected_close_tag(
        pos: usize,
        found: impl Into<String>,
        expected: Option<String>,
    ) -> Self {
        Self::UnexpectedCloseTag {
            pos,
            found: found.into(),
            expected,
        }
    }

    pub fn unclosed_tag(pos: usize, tag: impl Into<String>) -> Self {
        Self::UnclosedTag {
            pos,
            tag: tag.into(),
        }
    }

    pub fn unexpected_eof(pos: usize) -> Self {
        Self::UnexpectedEof { pos }
    }

    pub fn invalid_syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            pos,
            message: message.into(),
        }
    }

    /// Byte offset in the source where the error was detected
    pub fn pos(&self) -> usize {
        match self {
            Self::UnexpectedCloseTag { pos, .. }
            | Self::UnclosedTag { pos, .. }
            | Self::UnexpectedEof { pos }
            | Self::InvalidSyntax { pos, .. } => *pos,
        }
    }
}
