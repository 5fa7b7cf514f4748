//! Stored Value Module
//!
//! The payload variants the cache accepts, their byte encoding, and the
//! decoders used to read them back.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Stored Value ==
/// A payload accepted by [`Cache::store`](crate::cache::Cache::store).
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl StoredValue {
    /// Encodes the value the way it is written to the store.
    ///
    /// Integers are written base-10; floats use the shortest decimal that
    /// round-trips and always carry a fractional part or exponent.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Bytes(bytes) => bytes.clone(),
            StoredValue::Integer(n) => n.to_string().into_bytes(),
            StoredValue::Float(x) => format!("{:?}", x).into_bytes(),
        }
    }

    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoredValue::Text(_) => "text",
            StoredValue::Bytes(_) => "bytes",
            StoredValue::Integer(_) => "integer",
            StoredValue::Float(_) => "float",
        }
    }
}

/// Renders the value as it appears in call history.
impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Text(text) => write!(f, "{:?}", text),
            StoredValue::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            StoredValue::Integer(n) => write!(f, "{}", n),
            StoredValue::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for StoredValue {
    fn from(value: &[u8; N]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(value.into())
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Key ==
/// Identifier generated for every stored payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Draws a fresh random (UUID v4) key.
    pub fn generate() -> Self {
        Key(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key(value)
    }
}

// == Decoders ==
/// Decodes raw bytes as UTF-8 text.
pub fn decode_text(bytes: Vec<u8>) -> Result<String, String> {
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Decodes raw bytes as a base-10 integer.
pub fn decode_integer(bytes: Vec<u8>) -> Result<i64, String> {
    let text = decode_text(bytes)?;
    text.parse()
        .map_err(|e| format!("{:?} is not an integer: {}", text, e))
}

/// Decodes raw bytes as a floating point number.
pub fn decode_float(bytes: Vec<u8>) -> Result<f64, String> {
    let text = decode_text(bytes)?;
    text.parse()
        .map_err(|e| format!("{:?} is not a number: {}", text, e))
}
