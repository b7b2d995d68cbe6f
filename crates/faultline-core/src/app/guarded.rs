//! go - fallible な処理を呼び、panic も戻り値のエラーにまとめる

use super::capture::FaultCapture;
use crate::domain::{ErrorSlot, Fault};

impl FaultCapture {
    /// Call `op` and return its result; a panic inside `op` becomes `Err(E::from(fault))`.
    ///
    /// `op`'s own `Err` is stored first by plain assignment, so it is never
    /// masked by a later fault.
    pub fn go<T, E>(&self, op: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<Fault>,
    {
        let slot = ErrorSlot::new();
        let value = self
            .forward(Some(&slot), || match op() {
                Ok(value) => Some(value),
                Err(err) => {
                    slot.set(err);
                    None
                }
            })
            .flatten();

        // `value` が None になるのは op が Err を返したか panic したときだけで、
        // どちらの場合も slot は埋まっている
        match (value, slot.into_inner()) {
            (_, Some(err)) => Err(err),
            (Some(value), None) => Ok(value),
            (None, None) => unreachable!("an intercepted panic always fills an empty slot"),
        }
    }
}

/// `FaultCapture::global().go(op)`
pub fn go<T, E>(op: impl FnOnce() -> Result<T, E>) -> Result<T, E>
where
    E: From<Fault>,
{
    FaultCapture::global().go(op)
}
