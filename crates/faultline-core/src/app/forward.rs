//! Forward - エラースロット方式
//!
//! 優先順位: 明示的に入れたエラー > 捕捉した panic > 何もなし

use tracing::debug;

use super::capture::FaultCapture;
use crate::domain::{ErrorSlot, Fault};

impl FaultCapture {
    /// Run `section`; on panic, store the captured `Fault` in `slot`.
    ///
    /// - `slot == None`: `section` runs as a plain call and a panic
    ///   propagates untouched.
    /// - panic, slot empty: the slot receives `E::from(fault)`.
    /// - panic, slot already holds an error: that error is kept and the fault
    ///   is dropped.
    /// - no panic: the slot is left exactly as `section` left it.
    ///
    /// Returns `None` iff a panic was intercepted.
    pub fn forward<E, R>(&self, slot: Option<&ErrorSlot<E>>, section: impl FnOnce() -> R) -> Option<R>
    where
        E: From<Fault>,
    {
        let Some(slot) = slot else {
            return Some(section());
        };

        match self.catch(section) {
            Ok(value) => Some(value),
            Err(fault) => {
                let message = fault.short_message();
                if !slot.fill_if_empty(|| E::from(fault)) {
                    debug!(fault = %message, "error slot already set; discarding panic");
                }
                None
            }
        }
    }
}

/// `FaultCapture::global().forward(slot, section)`
pub fn forward<E, R>(slot: Option<&ErrorSlot<E>>, section: impl FnOnce() -> R) -> Option<R>
where
    E: From<Fault>,
{
    FaultCapture::global().forward(slot, section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoxError;
    use std::panic;

    #[test]
    fn empty_slot_receives_the_fault() {
        let slot: ErrorSlot<Fault> = ErrorSlot::new();
        let out = forward(Some(&slot), || -> u8 { panic!("oops") });

        assert_eq!(out, None);
        assert_eq!(slot.into_inner().unwrap().short_message(), "panic: oops");
    }

    #[test]
    fn existing_error_wins() {
        let slot: ErrorSlot<BoxError> = ErrorSlot::new();
        forward(Some(&slot), || {
            slot.set("already failed".into());
            panic!("not at a disco");
        });

        assert_eq!(slot.into_inner().unwrap().to_string(), "already failed");
    }

    #[test]
    fn slot_untouched_without_panic() {
        let slot: ErrorSlot<BoxError> = ErrorSlot::new();
        assert_eq!(forward(Some(&slot), || 3), Some(3));
        assert!(slot.is_empty());

        forward(Some(&slot), || slot.set("set by section".into()));
        assert_eq!(slot.into_inner().unwrap().to_string(), "set by section");
    }

    #[test]
    fn absent_slot_lets_the_panic_escape() {
        let escaped = panic::catch_unwind(|| {
            forward(None::<&ErrorSlot<Fault>>, || -> u8 { panic!("x") });
        });
        assert!(escaped.is_err());
    }
}
