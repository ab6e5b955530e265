/// Marker trait for reducible state.
///
/// States are cloned out to readers as snapshots and compared in tests.
pub trait State: Clone + PartialEq + Default + Send + 'static {}
