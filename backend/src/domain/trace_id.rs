//! Correlation id carried through a single request.
//!
//! Stored in a Tokio task local. Work moved onto another task does not see
//! it unless wrapped in [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request in logs, errors and the `Trace-Id` header.
///
/// ```
/// use inkpress::TraceId;
///
/// let id = TraceId::generate();
/// let seen = TraceId::scope_sync(id, TraceId::current);
/// assert_eq!(seen, Some(id));
/// assert_eq!(TraceId::current(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request the calling task is serving.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Await `future` with `id` as the current trace id.
    pub async fn scope<F: Future>(id: Self, future: F) -> F::Output {
        CURRENT.scope(id, future).await
    }

    /// Synchronous counterpart of [`TraceId::scope`].
    pub fn scope_sync<R>(id: Self, run: impl FnOnce() -> R) -> R {
        CURRENT.sync_scope(id, run)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim()).map(Self)
    }
}
