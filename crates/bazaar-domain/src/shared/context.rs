use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Request-scoped context threaded through every repository call.
///
/// It carries the active storage handle (when a unit of work is open) and the
/// request deadline. The handle slot is opaque here: the persistence layer
/// stores its transaction handle in it and downcasts on resolution, so this
/// crate stays free of storage-engine types. Contexts are immutable values;
/// derivation (`with_handle`, `with_deadline`) returns a new context and
/// leaves the parent untouched, so sibling calls can fork one parent freely.
#[derive(Clone, Default)]
pub struct RequestContext {
    handle: Option<Arc<dyn Any + Send + Sync>>,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a child context carrying `handle` as the active storage handle.
    pub fn with_handle(&self, handle: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            handle: Some(handle),
            deadline: self.deadline,
        }
    }

    /// The active storage handle, if a unit of work attached one.
    pub fn handle(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.handle.as_ref()
    }

    /// Derives a child context that expires at `deadline`.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        Self {
            handle: self.handle.clone(),
            deadline: Some(deadline),
        }
    }

    /// Time left until the deadline. `None` when no deadline is set,
    /// `Some(Duration::ZERO)` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("in_tx", &self.handle.is_some())
            .field("deadline", &self.deadline)
            .finish()
    }
}
