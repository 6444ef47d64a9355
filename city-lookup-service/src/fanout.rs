//! Timeout-bounded calls whose failures are absorbed instead of propagated.
//!
//! Each optional source runs inside [`bounded`], which turns every failure
//! (transport, status, decode, timeout) into [`Slot::Unavailable`]. Callers
//! join the bounded futures with `tokio::join!`, so one slow or broken source
//! never delays or fails its siblings beyond the shared timeout.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::UpstreamError;

/// Outcome of one optional call
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Filled(T),
    Unavailable,
}

impl<T> Slot<T> {
    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Slot::Filled(value) => Some(value),
            Slot::Unavailable => None,
        }
    }
}

impl<T: Default> Slot<T> {
    /// Value, or the type's empty default when unavailable
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

impl<T> Slot<Option<T>> {
    /// Collapses "unavailable" and "available but absent" into one `None`
    pub fn flatten(self) -> Option<T> {
        self.into_option().flatten()
    }
}

/// Runs `call` with a deadline. Dropping the future on expiry cancels the
/// request in flight.
pub async fn within<T, F>(limit: Duration, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(UpstreamError::Timeout(limit)))
}

/// Runs an optional call, logging and swallowing any failure
pub async fn bounded<T, F>(source: &'static str, limit: Duration, call: F) -> Slot<T>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match within(limit, call).await {
        Ok(value) => {
            debug!("{} fetched", source);
            Slot::Filled(value)
        }
        Err(e) => {
            warn!("{} unavailable: {}", source, e);
            Slot::Unavailable
        }
    }
}
