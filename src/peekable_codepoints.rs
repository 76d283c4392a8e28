use std::io::{
    Bytes,
    Read,
};

use anyhow::{
    Result,
    Error,
};
use unicode_reader::CodePoints;

/// Decodes UTF-8 from a reader one char at a time, with a small lookahead buffer.
pub struct PeekableCodePoints<R>
    where R: Read
{
    codepoints: CodePoints<Bytes<R>>,
    buffer: Vec<char>,
}

impl<R: Read> PeekableCodePoints<R> {
    pub fn new(reader: R) -> Self {
        PeekableCodePoints {
            codepoints: CodePoints::from(reader),
            buffer: Vec::new(),
        }
    }

    fn feed_buffer(&mut self, count: usize) -> Result<usize> {
        for i in 0..count {
            let item = self.codepoints.next();
            match item {
                None => return Ok(i),
                Some(Err(e)) => return Err(Error::new(e)),
                Some(Ok(c)) => self.buffer.push(c),
            }
        }

        Ok(count)
    }

    pub fn peek_char(&mut self, index: usize) -> Result<Option<char>> {
        if index >= self.buffer.len() {
            self.feed_buffer(index + 1 - self.buffer.len())?;
        }

        Ok(self.buffer.get(index).copied())
    }

    pub fn next_char(&mut self) -> Result<Option<char>> {
        let c = self.peek_char(0)?;
        if c.is_some() {
            self.buffer.remove(0);
        }

        Ok(c)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.buffer.len() {
            self.feed_buffer(count - self.buffer.len())?;
        }

        let actual_count = count.min(self.buffer.len());
        self.buffer.drain(0..actual_count);

        Ok(())
    }

    /// Checks the upcoming chars against `literal` without consuming anything.
    pub fn starts_with(&mut self, literal: &str) -> Result<bool> {
        for (i, expected) in literal.chars().enumerate() {
            if self.peek_char(i)? != Some(expected) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
