//! Per-call context: who is calling, and how long they are willing to wait.

use std::future::Future;
use std::time::Duration;

use tally_shared::types::UserId;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::error::GroupError;

/// The authenticated principal of a group operation plus its cancellation
/// signal and optional deadline.
///
/// An operation that is cancelled or runs past its deadline stops at its
/// next await point. Any open transaction is dropped and rolled back.
#[derive(Debug, Clone)]
pub struct Caller {
    user_id: UserId,
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl Caller {
    /// A caller with no deadline that is never cancelled.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Ties the caller to a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Sets a deadline `timeout` from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// The authenticated user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Drives `fut` to completion unless the caller cancels or the deadline
    /// passes first.
    pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T, GroupError>
    where
        F: Future<Output = Result<T, GroupError>>,
    {
        let bounded = async {
            match self.deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fut)
                    .await
                    .unwrap_or(Err(GroupError::DeadlineExceeded)),
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(GroupError::Cancelled),
            result = bounded => result,
        }
    }
}
