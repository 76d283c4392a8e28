use std::fmt;

use anyhow::{
    Result,
    bail,
};

use crate::json_value::*;

/// Messages reported in [`ParseError::message`]. These texts are stable and safe to match on.
pub mod errors {
    pub const UNTERMINATED_STRING: &str = "Unterminated string";
    pub const UNEXPECTED_CHARACTER: &str = "Unexpected character";
    pub const OPEN_BRACE_EXPECTED: &str = "'{' expected";
    pub const OPEN_BRACKET_EXPECTED: &str = "'[' expected";
    pub const CLOSING_BRACKET_EXPECTED: &str = "']' expected";
    pub const DOUBLE_QUOTE_EXPECTED: &str = "'\"' expected";
    pub const COLON_EXPECTED: &str = "':' expected";
    pub const COMMA_EXPECTED: &str = "',' expected";
    pub const TRAILING_COMMA: &str = "Trailing comma";
    pub const INVALID_NUMBER: &str = "Invalid number";
    pub const INVALID_ESCAPE: &str = "Invalid escape sequence";
    pub const INVALID_UNICODE_ESCAPE: &str = "Invalid unicode escape sequence";
    pub const INVALID_UTF8: &str = "Invalid UTF-8";
    pub const DEPTH_LIMIT_EXCEEDED: &str = "Maximum nesting depth exceeded";
}

/// Why parsing stopped, and on which line. An empty message means nothing went wrong.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl ParseError {
    pub fn is_error(&self) -> bool {
        !self.message.is_empty()
    }
}

impl Default for ParseError {
    fn default() -> Self {
        ParseError {
            message: String::new(),
            line: 1,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.message, self.line)
    }
}

impl std::error::Error for ParseError {}

/// The outcome of a parse: a document on success, otherwise an error and a null document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseResult {
    pub document: JsonValue,
    pub error: ParseError,
}

impl ParseResult {
    pub fn success(document: JsonValue) -> Self {
        ParseResult {
            document,
            error: ParseError::default(),
        }
    }

    pub fn failure(message: &str, line: usize) -> Self {
        ParseResult {
            document: JsonValue::Null,
            error: ParseError {
                message: message.to_string(),
                line,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        !self.error.is_error()
    }

    pub fn into_result(self) -> Result<JsonValue> {
        if self.error.is_error() {
            bail!(self.error);
        }

        Ok(self.document)
    }
}
