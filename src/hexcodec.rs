use thiserror::Error;

use crate::disassembler::OpcodeWord;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HexError {
    #[error("Invalid hex digit '{digit}' in '{input}'")]
    InvalidDigit { input: String, digit: char },
    #[error("Odd number of hex digits in '{0}'")]
    OddLength(String),
    #[error("Empty hex value")]
    Empty,
    #[error("Hex value out of range: {0}")]
    OutOfRange(String),
}

/// Convert bytes to uppercase hex digits, two per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Inverse of [`bytes_to_hex`], accepts both upper and lower case digits.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, HexError> {
    if input.len() % 2 != 0 {
        return Err(HexError::OddLength(input.to_owned()));
    }
    chunk(input, 2).map(parse_byte).collect()
}

/// The error for an input rejected by [`is_hex`].
fn not_hex(input: &str) -> HexError {
    match input.chars().find(|c| !c.is_ascii_hexdigit()) {
        Some(digit) => HexError::InvalidDigit {
            input: input.to_owned(),
            digit,
        },
        None => HexError::Empty,
    }
}

/// Parse a single byte token of one or two hex digits.
pub fn parse_byte(pair: &str) -> Result<u8, HexError> {
    if !is_hex(pair) {
        return Err(not_hex(pair));
    }
    u8::from_str_radix(pair, 16).map_err(|_| HexError::OutOfRange(pair.to_owned()))
}

/// Iterator over consecutive substrings of a fixed number of characters.
///
/// The last chunk is shorter if the input length is not a multiple of the chunk size. The
/// iterator is `Clone`, so a sequence can be restarted from any point.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    size: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .char_indices()
            .nth(self.size)
            .map_or(self.rest.len(), |(ix, _)| ix);
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(head)
    }
}

/// Split `input` into pieces of `size` characters.
///
/// # Panics
///
/// Panics if `size` is 0.
pub fn chunk(input: &str, size: usize) -> Chunks<'_> {
    assert!(size != 0, "chunk size must be non-zero");
    Chunks { rest: input, size }
}

/// Check if a string is a valid non-negative hexadecimal number.
pub fn is_hex(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a user supplied hexadecimal address, e.g. `"0200"`.
pub fn parse_hex_u16(input: &str) -> Result<u16, HexError> {
    let input = input.trim();
    if !is_hex(input) {
        return Err(not_hex(input));
    }
    u16::from_str_radix(input, 16).map_err(|_| HexError::OutOfRange(input.to_owned()))
}

/// Plain hexadecimal text dump, optionally separating byte pairs with a space.
///
/// E.g. `00 E0 A2 2A` or `00E0A22A`.
#[tracing::instrument(skip(program))]
pub fn hex_dump(program: &[u8], spaced: bool) -> String {
    let separator = if spaced { " " } else { "" };
    program
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<String>>()
        .join(separator)
}

/// Read a program image two bytes at a time. An odd trailing byte yields a two digit word.
#[tracing::instrument(skip(program))]
pub fn opcode_words(program: &[u8]) -> Vec<OpcodeWord> {
    program
        .chunks(2)
        .map(|pair| OpcodeWord::new(bytes_to_hex(pair)))
        .collect()
}

/// Tokenize a hexadecimal text buffer into byte values.
///
/// Tokens are separated by whitespace and empty tokens are skipped. Tokens longer than two
/// digits are split into byte pairs, and a lone digit is taken as a byte value by itself.
#[tracing::instrument(skip(text))]
pub fn byte_tokens(text: &str) -> Result<Vec<u8>, HexError> {
    let mut bytes = vec![];
    for token in text.split_whitespace() {
        for pair in chunk(token, 2) {
            bytes.push(parse_byte(pair)?);
        }
    }
    Ok(bytes)
}
