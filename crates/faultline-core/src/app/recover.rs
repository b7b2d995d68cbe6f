//! Recover - コールバック方式
//!
//! handler があれば panic を捕捉して `Fault` を渡し、区間の結果は `None` になる。
//! handler がなければ何もしない（`catch_unwind` すら通さない）。

use super::capture::FaultCapture;
use crate::domain::Fault;

/// Receives the `Fault` of an intercepted panic.
pub type Handler<'a> = &'a mut dyn FnMut(Fault);

impl FaultCapture {
    /// Run `section`; on panic, hand the captured `Fault` to `handler`.
    ///
    /// - `handler == None`: `section` runs as a plain call and a panic
    ///   propagates untouched.
    /// - panic with a handler: the panic is consumed, `handler` runs on this
    ///   thread, and `None` is returned.
    /// - no panic: `Some(result)`, `handler` is never called.
    ///
    /// `handler` runs outside the boundary; if it panics, that panic propagates.
    pub fn recover<R>(&self, handler: Option<Handler<'_>>, section: impl FnOnce() -> R) -> Option<R> {
        let Some(handler) = handler else {
            return Some(section());
        };

        match self.catch(section) {
            Ok(value) => Some(value),
            Err(fault) => {
                handler(fault);
                None
            }
        }
    }
}

/// `FaultCapture::global().recover(handler, section)`
pub fn recover<R>(handler: Option<Handler<'_>>, section: impl FnOnce() -> R) -> Option<R> {
    FaultCapture::global().recover(handler, section)
}
