//! Record codec for at-rest field protection.
//!
//! # Responsibility
//! - Apply the reversible byte-wise transform to the `grade` field.
//! - Stay independent of the relational layer.
//!
//! # Invariants
//! - A `CipherKey` is never empty.
//! - The transform is its own inverse for a fixed key.
//!
//! The XOR stream is a demonstration transform, not a cryptographic primitive.

pub mod cipher;

pub use cipher::{decode_grade, encode_grade, transform, CipherKey, CodecError};
