//! This library provides:
//! - JsonParser: A recursive-descent JSON parser producing a JsonValue tree, or an error with the line it occurred on
//! - JsonValue: A typed document tree whose lookups never fail, missing data reads as a shared null value
//! - OptionalRef: A borrowed, possibly empty view used by the typed accessors of JsonValue
//!
//! ```
//! let result = edenjson::parse(r#"{"languages": ["en", {"code": "de"}]}"#);
//! assert!(result.is_success());
//! assert_eq!(result.document["languages"][1]["code"].as_string().value(), "de");
//! assert!(result.document["languages"][5].is_null());
//! ```

mod peekable_codepoints;
mod optional_ref;
mod json_value;
mod parse_result;
mod json_parser;

use std::io::Read;

pub use crate::optional_ref::OptionalRef;
pub use crate::json_value::{
    JsonArray,
    JsonObject,
    JsonType,
    JsonValue,
};
pub use crate::parse_result::{
    errors,
    ParseError,
    ParseResult,
};
pub use crate::json_parser::{
    JsonParser,
    ParserOptions,
};

/// Parses a JSON document from `json` with default options.
pub fn parse(json: &str) -> ParseResult {
    JsonParser::new().parse(json)
}

/// Parses a JSON document decoded as UTF-8 from `reader` with default options.
pub fn parse_reader<R>(reader: R) -> ParseResult
    where R: Read
{
    JsonParser::new().parse_reader(reader)
}
