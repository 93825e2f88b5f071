use super::*;
use nom::IResult;

named!(separator<&[u8], &[u8]>,
  take_while!(is_separator));

named!(word<&[u8], &[u8]>,
  take_while1!(|b: u8| !is_separator(b)));

pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace()
}

/// A whitespace-delimited piece of a line, with its byte offset in that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Byte offset just past the end of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Lazy token stream over one line. Cloning it restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    line: &'a str,
    rest: &'a [u8],
    max_len: usize,
}

pub fn tokenize(line: &str, max_len: usize) -> Tokens {
    Tokens {
        line: line,
        rest: line.as_bytes(),
        max_len: max_len,
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = match separator(self.rest) {
            IResult::Done(rest, _) => rest,
            _ => self.rest,
        };
        if input.is_empty() {
            self.rest = input;
            return None;
        }
        let (rest, bytes) = match word(input) {
            IResult::Done(rest, bytes) => (rest, bytes),
            _ => {
                self.rest = &[];
                return None;
            }
        };
        self.rest = rest;

        // Separators are ASCII, so both ends fall on char boundaries.
        let offset = self.line.len() - input.len();
        let text = &self.line[offset..offset + bytes.len()];
        if text.len() > self.max_len {
            return Some(Err(Error::invalid_token(text, TokenIssue::TooLong(self.max_len))));
        }
        Some(Ok(Token {
            text: text,
            offset: offset,
        }))
    }
}
