//! Screen data loading with a single tri-state and cancellation.
//!
//! Every screen fetch runs under the screen's [`CancellationToken`]. When
//! the user leaves the screen the token is cancelled, the request future is
//! dropped, and its result can never be applied to a screen that is gone.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;

/// Load state of a screen's data.
#[derive(Debug, Clone)]
pub enum FetchState<T> {
    /// Request in flight.
    Loading,
    /// Request failed or was cancelled.
    Failed(AppError),
    /// Data arrived.
    Ready(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> FetchState<T> {
    /// Convert a finished request.
    pub fn from_result(result: AppResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Whether the fetch was abandoned rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Failed(e) if e.is_cancelled())
    }

    /// The data, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&AppError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Transform ready data, keeping the other states.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Loading => FetchState::Loading,
            Self::Failed(e) => FetchState::Failed(e),
            Self::Ready(value) => FetchState::Ready(f(value)),
        }
    }

    /// Back to a plain result. `Loading` counts as cancelled.
    pub fn into_result(self) -> AppResult<T> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Failed(e) => Err(e),
            Self::Loading => Err(AppError::cancelled("Fetch did not complete")),
        }
    }
}

/// Run `request` until it finishes or `cancel` fires, whichever is first.
///
/// A token that is already cancelled never polls the request.
pub async fn fetch<T, F>(cancel: &CancellationToken, request: F) -> FetchState<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Fetch cancelled");
            FetchState::Failed(AppError::cancelled("Request cancelled"))
        }
        result = request => FetchState::from_result(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use kidscare_core::error::ErrorKind;

    #[tokio::test]
    async fn test_completed_fetch_is_ready() {
        let cancel = CancellationToken::new();
        let state = fetch(&cancel, async { Ok::<_, AppError>(vec![1, 2, 3]) }).await;
        assert_eq!(state.ready(), Some(&vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_error() {
        let cancel = CancellationToken::new();
        let state: FetchState<()> =
            fetch(&cancel, async { Err(AppError::not_found("Child not found")) }).await;
        assert_eq!(state.error().unwrap().kind, ErrorKind::NotFound);
        assert!(!state.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_in_flight_request() {
        let cancel = CancellationToken::new();
        let applied = Arc::new(AtomicBool::new(false));

        let flag = applied.clone();
        let request = async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            flag.store(true, Ordering::SeqCst);
            Ok::<_, AppError>("late")
        };

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let state = fetch(&cancel, request).await;
        assert!(state.is_cancelled());
        assert!(state.ready().is_none());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(!applied.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_already_cancelled_token_skips_request() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let state = fetch(&cancel, async { Ok::<_, AppError>(1) }).await;
        assert!(state.is_cancelled());
        assert!(state.into_result().is_err());
    }

    #[test]
    fn test_default_is_loading() {
        let state: FetchState<u8> = FetchState::default();
        assert!(state.is_loading());
        assert!(state.map(|v| v + 1).is_loading());
    }
}
