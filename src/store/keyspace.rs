//! Keyspace Module
//!
//! In-process key-value engine combining HashMap storage with TTL expiration,
//! atomic counters and append-only lists.

use std::collections::HashMap;

use crate::error::{LedgerError, Result};
use crate::store::entry::{EntryValue, StoreEntry};

// == Keyspace ==
/// Keyspace holding scalar and list entries with optional TTL.
///
/// Expired entries are treated as absent by every operation and removed
/// when touched; `cleanup_expired` sweeps the rest.
#[derive(Debug, Default)]
pub struct Keyspace {
    entries: HashMap<String, StoreEntry>,
}

impl Keyspace {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn live(&mut self, key: &str) -> Option<&mut StoreEntry> {
        if self.entries.get(key).is_some_and(StoreEntry::is_expired) {
            self.entries.remove(key);
        }
        self.entries.get_mut(key)
    }

    // == Get ==
    /// Retrieves the scalar payload stored at `key`.
    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.live(key) {
            None => Ok(None),
            Some(StoreEntry {
                value: EntryValue::Scalar(bytes),
                ..
            }) => Ok(Some(bytes.clone())),
            Some(_) => Err(LedgerError::WrongType(key.to_string())),
        }
    }

    // == Set ==
    /// Stores a scalar payload, replacing whatever was at `key`.
    ///
    /// A `None` TTL makes the entry persistent, clearing any previous TTL.
    pub fn set(&mut self, key: String, value: Vec<u8>, ttl: Option<u64>) {
        self.entries
            .insert(key, StoreEntry::new(EntryValue::Scalar(value), ttl));
    }

    // == Increment ==
    /// Adds one to the integer stored at `key` and returns the new value.
    ///
    /// A missing key counts from zero. The entry keeps its TTL.
    pub fn increment(&mut self, key: &str) -> Result<i64> {
        let Some(entry) = self.live(key) else {
            self.set(key.to_string(), b"1".to_vec(), None);
            return Ok(1);
        };

        let EntryValue::Scalar(bytes) = &mut entry.value else {
            return Err(LedgerError::WrongType(key.to_string()));
        };

        let current: i64 = std::str::from_utf8(bytes)
            .map_err(|e| LedgerError::decode(key, e))?
            .parse()
            .map_err(|e| LedgerError::decode(key, e))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| LedgerError::decode(key, "increment would overflow"))?;

        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    // == Append ==
    /// Appends `item` to the list at `key` and returns the new length.
    pub fn append(&mut self, key: &str, item: String) -> Result<usize> {
        match self.live(key) {
            None => {
                self.entries.insert(
                    key.to_string(),
                    StoreEntry::new(EntryValue::List(vec![item]), None),
                );
                Ok(1)
            }
            Some(StoreEntry {
                value: EntryValue::List(items),
                ..
            }) => {
                items.push(item);
                Ok(items.len())
            }
            Some(_) => Err(LedgerError::WrongType(key.to_string())),
        }
    }

    // == Range ==
    /// Reads list items between `start` and `end`, both inclusive.
    ///
    /// Negative indices count from the tail (`-1` is the last item). Out of
    /// range bounds are clamped; a missing key reads as an empty list.
    pub fn range(&mut self, key: &str, start: i64, end: i64) -> Result<Vec<String>> {
        let items = match self.live(key) {
            None => return Ok(Vec::new()),
            Some(StoreEntry {
                value: EntryValue::List(items),
                ..
            }) => items,
            Some(_) => return Err(LedgerError::WrongType(key.to_string())),
        };

        let len = items.len() as i64;
        let start = if start < 0 { (start + len).max(0) } else { start };
        let end = if end < 0 { end + len } else { end.min(len - 1) };

        if start > end || start >= len {
            return Ok(Vec::new());
        }

        Ok(items[start as usize..=end as usize].to_vec())
    }

    // == Flush ==
    /// Removes every entry.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, including not yet swept expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn list_of(items: &[&str]) -> Keyspace {
        let mut keyspace = Keyspace::new();
        for item in items {
            keyspace.append("list", item.to_string()).unwrap();
        }
        keyspace
    }

    #[test]
    fn test_keyspace_new() {
        let keyspace = Keyspace::new();
        assert_eq!(keyspace.len(), 0);
        assert!(keyspace.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1".to_string(), b"value1".to_vec(), None);

        assert_eq!(keyspace.get("key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(keyspace.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut keyspace = Keyspace::new();
        assert_eq!(keyspace.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1".to_string(), b"value1".to_vec(), None);
        keyspace.set("key1".to_string(), b"value2".to_vec(), None);

        assert_eq!(keyspace.get("key1").unwrap(), Some(b"value2".to_vec()));
        assert_eq!(keyspace.len(), 1);
    }

    #[test]
    fn test_ttl_expiration() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1".to_string(), b"value1".to_vec(), Some(1));
        assert!(keyspace.get("key1").unwrap().is_some());

        sleep(Duration::from_millis(1100));

        assert_eq!(keyspace.get("key1").unwrap(), None);
        assert!(keyspace.is_empty());
    }

    #[test]
    fn test_set_without_ttl_clears_previous_ttl() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1".to_string(), b"a".to_vec(), Some(1));
        keyspace.set("key1".to_string(), b"b".to_vec(), None);

        sleep(Duration::from_millis(1100));

        assert_eq!(keyspace.get("key1").unwrap(), Some(b"b".to_vec()));
    }

    #[test]
    fn test_increment_missing_starts_at_one() {
        let mut keyspace = Keyspace::new();

        assert_eq!(keyspace.increment("count:x").unwrap(), 1);
        assert_eq!(keyspace.increment("count:x").unwrap(), 2);
        assert_eq!(keyspace.get("count:x").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_increment_non_integer() {
        let mut keyspace = Keyspace::new();
        keyspace.set("key".to_string(), b"foo".to_vec(), None);

        let result = keyspace.increment("key");
        assert!(matches!(result, Err(LedgerError::Decode { .. })));
    }

    #[test]
    fn test_increment_list_is_wrong_type() {
        let mut keyspace = list_of(&["a"]);
        assert!(matches!(
            keyspace.increment("list"),
            Err(LedgerError::WrongType(_))
        ));
    }

    #[test]
    fn test_increment_keeps_ttl() {
        let mut keyspace = Keyspace::new();
        keyspace.set("count".to_string(), b"5".to_vec(), Some(1));

        assert_eq!(keyspace.increment("count").unwrap(), 6);

        sleep(Duration::from_millis(1100));
        assert_eq!(keyspace.get("count").unwrap(), None);
    }

    #[test]
    fn test_append_returns_length() {
        let mut keyspace = Keyspace::new();

        assert_eq!(keyspace.append("l", "a".to_string()).unwrap(), 1);
        assert_eq!(keyspace.append("l", "b".to_string()).unwrap(), 2);
    }

    #[test]
    fn test_get_on_list_is_wrong_type() {
        let mut keyspace = list_of(&["a"]);
        assert!(matches!(keyspace.get("list"), Err(LedgerError::WrongType(_))));
    }

    #[test]
    fn test_range_whole_list() {
        let mut keyspace = list_of(&["a", "b", "c"]);
        assert_eq!(keyspace.range("list", 0, -1).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_range_bounds() {
        let mut keyspace = list_of(&["a", "b", "c", "d"]);

        assert_eq!(keyspace.range("list", 1, 2).unwrap(), vec!["b", "c"]);
        assert_eq!(keyspace.range("list", -2, -1).unwrap(), vec!["c", "d"]);
        assert_eq!(keyspace.range("list", 2, 100).unwrap(), vec!["c", "d"]);
        assert_eq!(keyspace.range("list", -100, 0).unwrap(), vec!["a"]);
        assert!(keyspace.range("list", 3, 1).unwrap().is_empty());
        assert!(keyspace.range("list", 10, 20).unwrap().is_empty());
    }

    #[test]
    fn test_range_missing_key_is_empty() {
        let mut keyspace = Keyspace::new();
        assert!(keyspace.range("missing", 0, -1).unwrap().is_empty());
    }

    #[test]
    fn test_flush() {
        let mut keyspace = list_of(&["a"]);
        keyspace.set("k".to_string(), b"v".to_vec(), None);

        keyspace.flush();

        assert!(keyspace.is_empty());
        assert_eq!(keyspace.get("k").unwrap(), None);
    }

    #[test]
    fn test_cleanup_expired() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1".to_string(), b"value1".to_vec(), Some(1));
        keyspace.set("key2".to_string(), b"value2".to_vec(), Some(10));

        sleep(Duration::from_millis(1100));

        let removed = keyspace.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(keyspace.len(), 1);
        assert!(keyspace.get("key2").unwrap().is_some());
    }
}
