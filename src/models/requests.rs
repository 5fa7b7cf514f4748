//! Request DTOs for the cache ledger API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::StoredValue;

/// Request body for the STORE operation (POST /store)
///
/// `value` may be a JSON string, integer, float, or an array of byte values.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    pub value: Value,
}

impl StoreRequest {
    /// Converts the JSON payload into a [`StoredValue`].
    ///
    /// Returns an error message for payloads with no matching variant.
    pub fn into_stored_value(self) -> Result<StoredValue, String> {
        match self.value {
            Value::String(text) => Ok(StoredValue::Text(text)),
            Value::Number(n) => n
                .as_i64()
                .map(StoredValue::Integer)
                .or_else(|| n.as_f64().map(StoredValue::Float))
                .ok_or_else(|| format!("Number {} is out of range", n)),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| "Byte arrays may only contain integers 0-255".to_string())
                })
                .collect::<Result<Vec<u8>, String>>()
                .map(StoredValue::Bytes),
            other => Err(format!("Unsupported value type: {}", other)),
        }
    }
}

/// How GET /get/:key decodes the stored bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    #[default]
    Text,
    Integer,
    Float,
    Raw,
}

/// Query string for GET /get/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    #[serde(default, rename = "as")]
    pub decoding: Decoding,
}

/// Query string for GET /page
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub url: String,
}

impl PageQuery {
    /// Returns an error message if the URL is unusable, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Some("URL must start with http:// or https://".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<StoredValue, String> {
        serde_json::from_str::<StoreRequest>(json)
            .unwrap()
            .into_stored_value()
    }

    #[test]
    fn test_store_request_variants() {
        assert_eq!(parse(r#"{"value": "foo"}"#), Ok(StoredValue::Text("foo".into())));
        assert_eq!(parse(r#"{"value": 42}"#), Ok(StoredValue::Integer(42)));
        assert_eq!(parse(r#"{"value": 2.5}"#), Ok(StoredValue::Float(2.5)));
        assert_eq!(parse(r#"{"value": [104, 105]}"#), Ok(StoredValue::Bytes(b"hi".to_vec())));
    }

    #[test]
    fn test_store_request_rejects_unsupported() {
        assert!(parse(r#"{"value": null}"#).is_err());
        assert!(parse(r#"{"value": {"a": 1}}"#).is_err());
        assert!(parse(r#"{"value": [256]}"#).is_err());
        assert!(parse(r#"{"value": ["x"]}"#).is_err());
    }

    #[test]
    fn test_get_query_decoding() {
        let query: GetQuery = serde_json::from_str(r#"{"as": "integer"}"#).unwrap();
        assert_eq!(query.decoding, Decoding::Integer);

        let query: GetQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.decoding, Decoding::Text);
    }

    #[test]
    fn test_page_query_validate() {
        let ok = PageQuery { url: "http://example.com".into() };
        assert!(ok.validate().is_none());

        let empty = PageQuery { url: " ".into() };
        assert!(empty.validate().is_some());

        let ftp = PageQuery { url: "ftp://example.com".into() };
        assert!(ftp.validate().is_some());
    }
}
