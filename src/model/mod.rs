//! Record types held by the store.

mod user;

pub use user::{Address, Company, Geo, User};

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// An item of the remote collection.
///
/// Records are immutable once loaded. Identity is [`Record::id`]; the name and
/// email fields are the only ones the search query looks at.
pub trait Record:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Id: Clone + Debug + PartialEq + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
    fn name(&self) -> &str;
    fn email(&self) -> &str;
}

/// Case-insensitive substring match over name OR email.
///
/// An empty query matches everything. No tokenization, no fuzzy matching.
pub fn matches_query<R: Record>(record: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.name().to_lowercase().contains(&needle)
        || record.email().to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches() {
        let user = User::sample(1, "John Doe", "john@example.com");
        assert!(matches_query(&user, ""));
    }

    #[test]
    fn test_name_match_ignores_case() {
        let user = User::sample(1, "Jane Smith", "js@example.com");
        assert!(matches_query(&user, "jane"));
        assert!(matches_query(&user, "SMITH"));
        assert!(matches_query(&user, "e s"));
    }

    #[test]
    fn test_email_match() {
        let user = User::sample(1, "Jane Smith", "Contact@Acme.io");
        assert!(matches_query(&user, "acme.IO"));
    }

    #[test]
    fn test_no_tokenization() {
        // Both words occur, but not as one substring.
        let user = User::sample(1, "Jane Smith", "js@example.com");
        assert!(!matches_query(&user, "smith jane"));
    }

    #[test]
    fn test_other_fields_are_not_searched() {
        let mut user = User::sample(1, "Jane Smith", "js@example.com");
        user.username = "zorro".to_string();
        user.company.name = "Zorro Corp".to_string();
        assert!(!matches_query(&user, "zorro"));
    }
}
