//! One-shot result delivery for asynchronous in-container execution.

use gantry_common::error::{GantryError, Result};
use tokio::sync::oneshot;

/// Caller side of an asynchronous exec: a single-shot result channel.
///
/// Returned by [`Containerizer::exec`](crate::Containerizer::exec); the
/// invoking thread is never blocked, the outcome arrives when the command
/// finishes or the execution is cancelled.
#[derive(Debug)]
pub struct ExecHandle {
    rx: oneshot::Receiver<Result<i32>>,
}

impl ExecHandle {
    /// Waits for the command to finish and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the backend, or a runtime error if
    /// the backend dropped the completion without reporting (cancelled or
    /// crashed mid-exec).
    pub async fn wait(self) -> Result<i32> {
        self.rx.await.unwrap_or_else(|_| {
            Err(GantryError::Runtime {
                message: "exec aborted before delivering a result".into(),
            })
        })
    }
}

/// Backend side of an asynchronous exec.
#[derive(Debug)]
pub struct ExecCompletion {
    tx: oneshot::Sender<Result<i32>>,
}

impl ExecCompletion {
    /// Delivers the command outcome to the waiting [`ExecHandle`].
    ///
    /// Delivery to an already-dropped handle is silently discarded; the
    /// caller walked away and nobody is listening.
    pub fn deliver(self, outcome: Result<i32>) {
        let _ = self.tx.send(outcome);
    }
}

/// Creates a connected completion/handle pair for one exec invocation.
#[must_use]
pub fn exec_channel() -> (ExecCompletion, ExecHandle) {
    let (tx, rx) = oneshot::channel();
    (ExecCompletion { tx }, ExecHandle { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handle_receives_delivered_exit_code() {
        let (completion, handle) = exec_channel();
        completion.deliver(Ok(0));
        assert_eq!(handle.wait().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn handle_receives_backend_error() {
        let (completion, handle) = exec_channel();
        completion.deliver(Err(GantryError::Runtime {
            message: "exec failed".into(),
        }));
        assert!(matches!(
            handle.wait().await,
            Err(GantryError::Runtime { .. })
        ));
    }

    #[tokio::test]
    async fn dropped_completion_surfaces_as_runtime_error() {
        let (completion, handle) = exec_channel();
        drop(completion);
        assert!(matches!(
            handle.wait().await,
            Err(GantryError::Runtime { .. })
        ));
    }

    #[tokio::test]
    async fn delivery_to_dropped_handle_is_discarded() {
        let (completion, handle) = exec_channel();
        drop(handle);
        completion.deliver(Ok(1));
    }
}
