//! ErrorSlot - 保護区間の結果エラーを受け取る場所
//!
//! 1 つの slot を使うのは 1 つの保護区間だけ（single writer）。
//! 保護区間のクロージャと `forward` の両方から触るので、`&self` で書き込めるように
//! `RefCell` で包んでいます。`Sync` ではありません。

use std::cell::RefCell;
use std::fmt;

/// A single mutable error location owned by one protected section.
///
/// # 優先順位
/// - 区間内で `set()` されたエラーが最優先
/// - 空のときだけ、捕捉した panic が入る
/// - どちらもなければ空のまま
pub struct ErrorSlot<E> {
    error: RefCell<Option<E>>,
}

impl<E> ErrorSlot<E> {
    pub fn new() -> Self {
        Self {
            error: RefCell::new(None),
        }
    }

    /// Plain assignment; replaces whatever the slot held.
    pub fn set(&self, error: E) {
        *self.error.borrow_mut() = Some(error);
    }

    /// Store `error` only if the slot is empty. Returns whether it was stored.
    pub(crate) fn fill_if_empty(&self, error: impl FnOnce() -> E) -> bool {
        let mut slot = self.error.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(error());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.error.borrow().is_none()
    }

    pub fn take(&self) -> Option<E> {
        self.error.borrow_mut().take()
    }

    pub fn into_inner(self) -> Option<E> {
        self.error.into_inner()
    }

    /// `Err` with the stored error, or `Ok(value)` when the slot is empty.
    pub fn into_result<T>(self, value: T) -> Result<T, E> {
        match self.into_inner() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}

impl<E> Default for ErrorSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for ErrorSlot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorSlot")
            .field("error", &self.error.borrow())
            .finish()
    }
}
