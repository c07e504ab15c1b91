//! Base64 with the standard alphabet, used to derive stable keys from record text.
//!
//! Encoding splits the input into 6-bit groups (the last one right-padded with
//! zero bits) and pads the output with `=` to a multiple of four characters.
//! Decoding skips `=` and drops trailing bits that do not fill a whole byte.

use crate::error::{ErrorSeverity, ModError};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: char = '=';

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Base64Error {
    #[error("invalid character `{found}` at offset {offset} in Base64 string")]
    InvalidCharacter { found: char, offset: usize },

    #[error("decoded Base64 is not valid UTF-8")]
    InvalidUtf8,
}

impl ModError for Base64Error {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCharacter { .. } => "BASE64_INVALID_CHARACTER",
            Self::InvalidUtf8 => "BASE64_INVALID_UTF8",
        }
    }
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);

    let mut buffer: u32 = 0;
    let mut bits = 0;
    for &byte in input {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 6 {
            bits -= 6;
            out.push(sextet((buffer >> bits) & 0x3f));
        }
    }
    if bits > 0 {
        out.push(sextet((buffer << (6 - bits)) & 0x3f));
    }
    while out.len() % 4 != 0 {
        out.push(PAD);
    }
    out
}

pub fn decode(input: &str) -> Result<Vec<u8>, Base64Error> {
    let mut out = Vec::with_capacity(input.len() / 4 * 3);

    let mut buffer: u32 = 0;
    let mut bits = 0;
    for (offset, ch) in input.char_indices() {
        if ch == PAD {
            continue;
        }
        let value = index_of(ch).ok_or(Base64Error::InvalidCharacter { found: ch, offset })?;
        buffer = (buffer << 6) | value;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push(((buffer >> bits) & 0xff) as u8);
        }
    }
    Ok(out)
}

/// Decodes into a UTF-8 string.
pub fn decode_to_string(input: &str) -> Result<String, Base64Error> {
    String::from_utf8(decode(input)?).map_err(|_| Base64Error::InvalidUtf8)
}

fn sextet(value: u32) -> char {
    char::from(ALPHABET[value as usize])
}

fn index_of(ch: char) -> Option<u32> {
    let byte = u8::try_from(ch).ok()?;
    ALPHABET
        .iter()
        .position(|&candidate| candidate == byte)
        .map(|index| index as u32)
}
