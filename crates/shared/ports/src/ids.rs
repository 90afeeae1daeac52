use meridian_core::OrderId;

/// Port for order identifier generation
///
/// Injected into the book so tests can supply deterministic ids:
/// - UUIDs in production
/// - "1", "2", ... for scenario tests
pub trait IdGenerator: Send {
    /// Produce an id never returned before by this generator
    fn next_id(&mut self) -> OrderId;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> OrderId + Send,
{
    fn next_id(&mut self) -> OrderId {
        self()
    }
}
