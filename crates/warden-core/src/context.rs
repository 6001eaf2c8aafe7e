//! Per-request cancellation and deadline
//!
//! Every store, cache and session call made on behalf of a request runs
//! through [`CallContext::run`], so a caller that disconnects or runs out
//! of time stops the work at the next await point.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::AuthError;

#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl CallContext {
    /// Context with no deadline and a fresh cancellation token
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeout too large to represent leaves the context without a deadline
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Keeps the earlier of the existing and the new deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token that fires when this context is cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fail fast if the caller already gave up
    pub fn check(&self) -> Result<(), AuthError> {
        if self.is_cancelled() {
            return Err(AuthError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AuthError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drive `fut` to completion unless the context is cancelled or expires first.
    pub async fn run<T, E, F>(&self, fut: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, E>>,
        AuthError: From<E>,
    {
        self.check()?;

        let expiry = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AuthError::Cancelled),
            _ = expiry => Err(AuthError::DeadlineExceeded),
            result = fut => result.map_err(AuthError::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn slow(ms: u64) -> Result<u32, AuthError> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(7)
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes() {
        let ctx = CallContext::new().with_timeout(Duration::from_secs(1));
        assert_eq!(ctx.run(slow(10)).await.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_deadline_exceeded() {
        let ctx = CallContext::new().with_timeout(Duration::from_millis(50));
        let err = ctx.run(slow(500)).await.unwrap_err();
        assert!(matches!(err, AuthError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_run_already_cancelled() {
        let ctx = CallContext::new();
        ctx.cancel();
        let err = ctx.run(slow(0)).await.unwrap_err();
        assert!(matches!(err, AuthError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_flight() {
        let ctx = CallContext::new();
        let token = ctx.cancellation_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });
        let err = ctx.run(slow(1_000)).await.unwrap_err();
        assert!(matches!(err, AuthError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_keeps_earliest() {
        let now = Instant::now();
        let ctx = CallContext::new()
            .with_deadline(now + Duration::from_secs(5))
            .with_deadline(now + Duration::from_secs(10));
        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(5)));
        assert_eq!(ctx.remaining(), Some(Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_timeout_means_no_deadline() {
        let ctx = CallContext::new().with_timeout(Duration::from_secs(u64::MAX));
        assert!(ctx.deadline().is_none());
        assert_eq!(ctx.run(slow(10)).await.unwrap(), 7);
    }

    #[test]
    fn test_check_without_deadline() {
        let ctx = CallContext::new();
        assert!(ctx.check().is_ok());
        assert!(ctx.remaining().is_none());
    }
}
