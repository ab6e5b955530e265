/// Marker trait for intent objects.
///
/// Intents represent user actions (query typed, error dismissed) and
/// completions of I/O (collection resolved, page appended, fetch failed).
pub trait Intent: Send + 'static {}
