//! Repeating-key XOR transform and grade field encode/decode.
//!
//! # Invariants
//! - `transform(transform(x, k), k) == x` for any `x` and key `k`.
//! - Output length always equals input length.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Codec-level error for key construction and field decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Key bytes were empty; modulo indexing has no defined meaning.
    EmptyKey,
    /// Decoded field bytes are not valid UTF-8.
    InvalidUtf8,
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "cipher key must not be empty"),
            Self::InvalidUtf8 => write!(f, "decoded field is not valid UTF-8"),
        }
    }
}

impl Error for CodecError {}

/// Non-empty key used for both encrypt and decrypt paths.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey {
    bytes: Vec<u8>,
}

impl CipherKey {
    /// Builds a key from opaque bytes.
    ///
    /// # Errors
    /// - Returns `CodecError::EmptyKey` when `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CodecError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CodecError::EmptyKey);
        }
        Ok(Self { bytes })
    }
}

impl Debug for CipherKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// XORs every byte of `data` with the key byte at the same position modulo
/// key length.
pub fn transform(data: &[u8], key: &CipherKey) -> Vec<u8> {
    data.iter()
        .zip(key.bytes.iter().cycle())
        .map(|(byte, key_byte)| byte ^ key_byte)
        .collect()
}

/// Encodes a plaintext grade into its at-rest blob.
pub fn encode_grade(grade: &str, key: &CipherKey) -> Vec<u8> {
    transform(grade.as_bytes(), key)
}

/// Decodes an at-rest blob back into the plaintext grade.
///
/// # Errors
/// - Returns `CodecError::InvalidUtf8` when the blob was written with a
///   different key or is otherwise not a grade produced by `encode_grade`.
pub fn decode_grade(blob: &[u8], key: &CipherKey) -> Result<String, CodecError> {
    String::from_utf8(transform(blob, key)).map_err(|_| CodecError::InvalidUtf8)
}
