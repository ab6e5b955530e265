use crate::model::{matches_query, Record};

/// The subsequence of `all` matching `query`, in `all`'s order.
///
/// Always recomputed from scratch; never patched incrementally.
pub fn derive_view<R: Record>(all: &[R], query: &str) -> Vec<R> {
    if query.is_empty() {
        return all.to_vec();
    }
    all.iter()
        .filter(|record| matches_query(*record, query))
        .cloned()
        .collect()
}
