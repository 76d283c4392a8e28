use std::io::{
    self,
    BufReader,
    Read,
};
use anyhow::{
    Result,
    Error,
    bail,
};
use unicode_reader::BadUtf8Error;

use crate::json_value::*;
use crate::parse_result::*;
use crate::peekable_codepoints::*;

/// Knobs for [`JsonParser`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ParserOptions {
    /// How many objects/arrays may be open at once before parsing fails with
    /// [`errors::DEPTH_LIMIT_EXCEEDED`]. `None` means no limit, in which case deeply
    /// nested input can exhaust the stack.
    ///
    /// # Default
    ///
    /// `Some(ParserOptions::DEFAULT_MAX_DEPTH)`
    pub max_depth: Option<usize>,
}

impl ParserOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: Some(ParserOptions::DEFAULT_MAX_DEPTH),
        }
    }
}

/// Recursive-descent JSON parser.
///
/// Parsing stops at the first malformed token; the error and the line it was found on
/// come back in the [`ParseResult`]. Lines are only counted while skipping whitespace
/// between tokens, so a raw newline inside a string reports the line the string opened on.
/// An instance can be reused, but not shared between threads while parsing.
#[derive(Debug)]
pub struct JsonParser {
    options: ParserOptions,
    line_number: usize,
    depth: usize,
}

impl Default for JsonParser {
    fn default() -> Self {
        JsonParser::new()
    }
}

impl JsonParser {
    pub fn new() -> Self {
        JsonParser::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        JsonParser {
            options,
            line_number: 1,
            depth: 0,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse(&mut self, json: &str) -> ParseResult {
        tracing::debug!(len = json.len(), "parsing json text");
        self.parse_reader(json.as_bytes())
    }

    /// Parses the first JSON value read from `reader`. Anything after it is left unread.
    ///
    /// The reader is buffered internally, so a bare `File` is fine to pass in.
    pub fn parse_reader<R>(&mut self, reader: R) -> ParseResult
        where R: Read
    {
        self.line_number = 1;
        self.depth = 0;

        let mut peekable_cp = PeekableCodePoints::new(BufReader::new(reader));
        match self.parse_document(&mut peekable_cp) {
            Ok(document) => {
                tracing::debug!(json_type = %document.json_type(), "parsed json document");
                ParseResult::success(document)
            }
            Err(e) => {
                let message = JsonParser::error_message(&e);
                tracing::debug!(%message, line = self.line_number, "json parse failed");
                ParseResult::failure(&message, self.line_number)
            }
        }
    }

    fn error_message(e: &Error) -> String {
        match e.downcast_ref::<io::Error>() {
            Some(io_error) if JsonParser::is_bad_utf8(io_error) => errors::INVALID_UTF8.to_string(),
            Some(io_error) => io_error.to_string(),
            None => e.to_string(),
        }
    }

    // bad bytes mid-stream come as InvalidData, a cut-off sequence at the end as UnexpectedEof
    fn is_bad_utf8(io_error: &io::Error) -> bool {
        io_error.get_ref().map_or(false, |inner| inner.is::<BadUtf8Error>())
    }

    fn parse_document<R>(&mut self, peekable_cp: &mut PeekableCodePoints<R>) -> Result<JsonValue>
        where R: Read
    {
        self.skip_whitespace(peekable_cp)?;
        self.parse_value(peekable_cp)
    }

    fn skip_whitespace<R>(&mut self, peekable_cp: &mut PeekableCodePoints<R>) -> Result<()>
        where R: Read
    {
        while let Some(c) = peekable_cp.peek_char(0)? {
            match c {
                '\n' => self.line_number += 1,
                ' ' | '\t' | '\r' => (),
                _ => break,
            }

            peekable_cp.skip(1)?;
        }

        Ok(())
    }

    fn try_consume<R>(&mut self, peekable_cp: &mut PeekableCodePoints<R>, expected: char) -> Result<bool>
        where R: Read
    {
        self.skip_whitespace(peekable_cp)?;
        if peekable_cp.peek_char(0)? == Some(expected) {
            peekable_cp.skip(1)?;
            return Ok(true);
        }

        Ok(false)
    }

    fn enter_container(&mut self) -> Result<()> {
        if let Some(max_depth) = self.options.max_depth {
            if self.depth >= max_depth {
                bail!(errors::DEPTH_LIMIT_EXCEEDED);
            }
        }

        self.depth += 1;
        Ok(())
    }

    fn leave_container(&mut self) {
        self.depth -= 1;
    }

    fn parse_value<R>(&mut self, peekable_cp: &mut PeekableCodePoints<R>) -> Result<JsonValue>
        where R: Read
    {
        self.skip_whitespace(peekable_cp)?;
        match peekable_cp.peek_char(0)? {
            Some('{') => self.parse_object(peekable_cp),
            Some('[') => self.parse_array(peekable_cp),
            Some('"') => Ok(JsonValue::String(self.parse_string(peekable_cp)?)),
            Some(c) if c.is_ascii_digit() || c == '-' => Ok(JsonValue::Number(JsonParser::parse_number(peekable_cp)?)),
            Some('t') | Some('f') => Ok(JsonValue::Boolean(JsonParser::parse_boolean(peekable_cp)?)),
            Some('n') => JsonParser::parse_null(peekable_cp),
            _ => bail!(errors::UNEXPECTED_CHARACTER),
        }
    }

    fn parse_object<R>(&mut self, peekable_cp: &mut PeekableCodePoints<R>) -> Result<JsonValue>
        where R: Read
    {
        if !self.try_consume(peekable_cp, '{')? {
            bail!(errors::OPEN_BRACE_EXPECTED);
        }
        self.enter_container()?;

        let mut object = JsonObject::new();
        if !self.try_consume(peekable_cp, '}')? {
            loop {
                let key = self.parse_string(peekable_cp)?;

                if !self.try_consume(peekable_cp, ':')? {
                    bail!(errors::COLON_EXPECTED);
                }

                let value = self.parse_value(peekable_cp)?;
                // later duplicates win
                object.insert(key, value);

                if self.try_consume(peekable_cp, '}')? {
                    break;
                }

                if !self.try_consume(peekable_cp, ',')? {
                    bail!(errors::COMMA_EXPECTED);
                }

                if self.try_consume(peekable_cp, '}')? {
                    bail!(errors::TRAILING_COMMA);
                }
            }
        }

        self.leave_container();
        Ok(JsonValue::Object(object))
    }

    fn parse_array<R>(&mut self, peekable_cp: &mut PeekableCodePoints<R>) -> Result<JsonValue>
        where R: Read
    {
        if !self.try_consume(peekable_cp, '[')? {
            bail!(errors::OPEN_BRACKET_EXPECTED);
        }
        self.enter_container()?;

        let mut array = JsonArray::new();
        if !self.try_consume(peekable_cp, ']')? {
            loop {
                array.push(self.parse_value(peekable_cp)?);

                if self.try_consume(peekable_cp, ']')? {
                    break;
                }

                if !self.try_consume(peekable_cp, ',')? {
                    bail!(errors::COMMA_EXPECTED);
                }
            }
        }

        self.leave_container();
        Ok(JsonValue::Array(array))
    }

    fn parse_string<R>(&mut self, peekable_cp: &mut PeekableCodePoints<R>) -> Result<String>
        where R: Read
    {
        if !self.try_consume(peekable_cp, '"')? {
            bail!(errors::DOUBLE_QUOTE_EXPECTED);
        }

        let mut buffer = String::new();
        loop {
            match peekable_cp.next_char()? {
                None | Some('\n') | Some('\0') => bail!(errors::UNTERMINATED_STRING),
                Some('"') => break,
                Some('\\') => buffer.push(JsonParser::parse_escape(peekable_cp)?),
                Some(c) => buffer.push(c),
            }
        }

        Ok(buffer)
    }

    fn parse_escape<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<char>
        where R: Read
    {
        let c = match peekable_cp.next_char()? {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => JsonParser::parse_unicode_escape(peekable_cp)?,
            _ => bail!(errors::INVALID_ESCAPE),
        };

        Ok(c)
    }

    /// Reads the hex digits after `\u`, pulling in a second `\uXXXX` when the first one is
    /// a high surrogate.
    fn parse_unicode_escape<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<char>
        where R: Read
    {
        let code_unit = JsonParser::read_code_unit(peekable_cp)?;

        let code_point =
            if (0xD800..=0xDBFF).contains(&code_unit) {
                if peekable_cp.next_char()? != Some('\\') || peekable_cp.next_char()? != Some('u') {
                    bail!(errors::INVALID_UNICODE_ESCAPE);
                }

                let low_surrogate = JsonParser::read_code_unit(peekable_cp)?;
                if !(0xDC00..=0xDFFF).contains(&low_surrogate) {
                    bail!(errors::INVALID_UNICODE_ESCAPE);
                }

                0x10000 + ((code_unit - 0xD800) << 10) + (low_surrogate - 0xDC00)
            } else {
                code_unit
            };

        // lone low surrogates have no char
        match char::from_u32(code_point) {
            Some(c) => Ok(c),
            None => bail!(errors::INVALID_UNICODE_ESCAPE),
        }
    }

    fn read_code_unit<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<u32>
        where R: Read
    {
        let mut code_unit = 0;
        for _ in 0..4 {
            let digit = match peekable_cp.next_char()? {
                Some(c) => c.to_digit(16),
                None => None,
            };

            match digit {
                Some(d) => code_unit = code_unit * 16 + d,
                None => bail!(errors::INVALID_UNICODE_ESCAPE),
            }
        }

        Ok(code_unit)
    }

    /// Takes every char that could belong to a number, then lets the float conversion
    /// decide whether the run is valid.
    fn parse_number<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<f64>
        where R: Read
    {
        let mut literal = String::new();
        while let Some(c) = peekable_cp.peek_char(0)? {
            if !(c.is_ascii_digit() || matches!(c, '-' | '.' | 'e' | 'E')) {
                break;
            }

            literal.push(c);
            peekable_cp.skip(1)?;
        }

        JsonParser::convert_number(&literal)
    }

    fn convert_number(literal: &str) -> Result<f64> {
        let number: f64 = match literal.parse() {
            Ok(n) => n,
            Err(_) => bail!(errors::INVALID_NUMBER),
        };

        if number.is_infinite() {
            bail!(errors::INVALID_NUMBER);
        }

        // underflow: subnormal results, or a non-zero mantissa that rounded to zero
        if number != 0.0 && number.abs() < f64::MIN_POSITIVE {
            bail!(errors::INVALID_NUMBER);
        }

        if number == 0.0 {
            let mantissa = literal.split(|c| c == 'e' || c == 'E').next().unwrap_or("");
            if mantissa.chars().any(|c| ('1'..='9').contains(&c)) {
                bail!(errors::INVALID_NUMBER);
            }
        }

        Ok(number)
    }

    fn parse_boolean<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<bool>
        where R: Read
    {
        if peekable_cp.starts_with("true")? {
            peekable_cp.skip(4)?;
            return Ok(true);
        }

        if peekable_cp.starts_with("false")? {
            peekable_cp.skip(5)?;
            return Ok(false);
        }

        bail!(errors::UNEXPECTED_CHARACTER)
    }

    fn parse_null<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<JsonValue>
        where R: Read
    {
        if peekable_cp.starts_with("null")? {
            peekable_cp.skip(4)?;
            return Ok(JsonValue::Null);
        }

        bail!(errors::UNEXPECTED_CHARACTER)
    }
}
