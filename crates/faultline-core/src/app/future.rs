//! 非同期版 - future の poll 中の panic を捕捉する
//!
//! tokio のワーカーで動くタスク向け。panic した poll と同じスレッド上で捕捉するので、
//! hook の記録（位置・backtrace）もそのまま使えます。

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::{JoinError, JoinHandle};

use super::capture::FaultCapture;
use crate::domain::Fault;

/// Future adapter: resolves to `Err(Fault)` if any `poll` of the inner future panics.
///
/// Do not poll again after it resolved.
pub struct GuardedFuture<F> {
    inner: Pin<Box<F>>,
    capture: FaultCapture,
}

impl<F: Future> GuardedFuture<F> {
    pub fn new(capture: FaultCapture, future: F) -> Self {
        Self {
            inner: Box::pin(future),
            capture,
        }
    }
}

impl<F: Future> Future for GuardedFuture<F> {
    type Output = Result<F::Output, Fault>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let inner = &mut this.inner;
        match this.capture.catch(|| inner.as_mut().poll(cx)) {
            Ok(Poll::Ready(value)) => Poll::Ready(Ok(value)),
            Ok(Poll::Pending) => Poll::Pending,
            Err(fault) => Poll::Ready(Err(fault)),
        }
    }
}

impl FaultCapture {
    pub fn recover_future<F: Future>(&self, future: F) -> GuardedFuture<F> {
        GuardedFuture::new(self.clone(), future)
    }

    /// Async `go`: the future's own `Err` or a fault raised while polling it.
    pub async fn go_async<T, E, F>(&self, future: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<Fault>,
    {
        match self.recover_future(future).await {
            Ok(result) => result,
            Err(fault) => Err(E::from(fault)),
        }
    }

    /// Convert a `JoinError` carrying a panic into a `Fault`.
    ///
    /// Cancelled tasks are handed back unchanged. The stack is the joining
    /// thread's, since the panicking thread has long unwound.
    pub fn capture_join_error(&self, err: JoinError) -> Result<Fault, JoinError> {
        if err.is_panic() {
            Ok(self.capture(err.into_panic()))
        } else {
            Err(err)
        }
    }
}

/// `FaultCapture::global().recover_future(future)`
pub fn recover_future<F: Future>(future: F) -> GuardedFuture<F> {
    FaultCapture::global().recover_future(future)
}

/// `FaultCapture::global().go_async(future)`
pub async fn go_async<T, E, F>(future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<Fault>,
{
    FaultCapture::global().go_async(future).await
}

/// `tokio::spawn` whose task reports a panic as `Err(E::from(fault))`
/// instead of a `JoinError`.
pub fn spawn_guarded<T, E, F>(future: F) -> JoinHandle<Result<T, E>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: From<Fault> + Send + 'static,
{
    let capture = FaultCapture::global().clone();
    tokio::spawn(async move { capture.go_async(future).await })
}
