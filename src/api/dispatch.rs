use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::{ApiError, ApiResult};

/// A call running in the background. Await it, or hand it a completion
/// context with [`Pending::on_complete`].
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<ApiResult<T>>,
}

/// Starts `call` on the current runtime and returns immediately.
///
/// If `cancel` fires first the call is dropped and resolves to
/// [`ApiError::Cancelled`].
pub fn dispatch<T, F>(call: F, cancel: CancellationToken) -> Pending<T>
where
    F: Future<Output = ApiResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("api call cancelled");
                Err(ApiError::Cancelled)
            }
            res = call => res,
        };
        // receiver gone means nobody is waiting
        let _ = tx.send(outcome);
    });
    Pending { rx }
}

impl<T: Send + 'static> Pending<T> {
    /// Runs `callback` with the outcome on `context`.
    pub fn on_complete<C>(self, context: &Handle, callback: C) -> JoinHandle<()>
    where
        C: FnOnce(ApiResult<T>) + Send + 'static,
    {
        context.spawn(async move { callback(self.await) })
    }
}

impl<T> Future for Pending<T> {
    type Output = ApiResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // a dropped sender means the task died before finishing
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.unwrap_or(Err(ApiError::Cancelled)))
    }
}
