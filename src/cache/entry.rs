use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::CacheError;

/// Snapshot of the full remote collection plus the time it was stored.
///
/// Serialized as `{"records": [...], "storedAt": <epoch millis>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<R> {
    pub records: Vec<R>,
    pub stored_at: u64,
}

impl<R> CacheEntry<R>
where
    R: Serialize + DeserializeOwned,
{
    pub fn new(records: Vec<R>, stored_at: u64) -> Self {
        Self { records, stored_at }
    }

    /// Fresh iff `now - stored_at < ttl`. Entries stamped in the future count
    /// as fresh.
    pub fn is_fresh(&self, now_millis: u64, ttl_millis: u64) -> bool {
        now_millis.saturating_sub(self.stored_at) < ttl_millis
    }

    pub fn encode(&self) -> Result<Vec<u8>, CacheError> {
        serde_json::to_vec(self).map_err(CacheError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CacheError> {
        serde_json::from_slice(bytes).map_err(CacheError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    const TTL: u64 = 300_000;

    fn entry(stored_at: u64) -> CacheEntry<User> {
        CacheEntry::new(
            vec![
                User::sample(1, "John Doe", "john@example.com"),
                User::sample(2, "Jane Smith", "jane@example.com"),
            ],
            stored_at,
        )
    }

    #[test]
    fn test_freshness_boundary() {
        let stored_at = 1_700_000_000_000;
        let e = entry(stored_at);
        assert!(e.is_fresh(stored_at, TTL));
        assert!(e.is_fresh(stored_at + TTL - 1, TTL));
        assert!(!e.is_fresh(stored_at + TTL, TTL));
        assert!(!e.is_fresh(stored_at + TTL + 1, TTL));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let e = entry(2_000);
        assert!(e.is_fresh(1_000, TTL));
    }

    #[test]
    fn test_wire_format() {
        let e = entry(1_700_000_000_123);
        let json: serde_json::Value = serde_json::from_slice(&e.encode().unwrap()).unwrap();
        assert_eq!(json["storedAt"], 1_700_000_000_123u64);
        assert_eq!(json["records"].as_array().unwrap().len(), 2);
        assert_eq!(json["records"][1]["name"], "Jane Smith");
    }

    #[test]
    fn test_decode_preserves_entry() {
        let e = entry(1_700_000_000_123);
        let decoded = CacheEntry::<User>::decode(&e.encode().unwrap()).unwrap();
        assert_eq!(decoded, e);
    }

    #[test]
    fn test_decode_corrupt_bytes() {
        let err = CacheEntry::<User>::decode(b"{\"records\": [").unwrap_err();
        assert!(matches!(err, CacheError::Decode(_)));
    }

    #[test]
    fn test_decode_missing_timestamp() {
        let err = CacheEntry::<User>::decode(br#"{"records": []}"#).unwrap_err();
        assert!(matches!(err, CacheError::Decode(_)));
    }
}
