//! Panic hook - panic した瞬間の情報を thread-local に残す
//!
//! `catch_unwind` が戻ってくる頃にはスタックは巻き戻っているので、
//! 位置と backtrace は hook の中で取る必要があります。
//!
//! - hook はプロセスで一度だけ設置し、既存の hook につなぐ
//! - 既存の hook は常に呼ぶ（区間内で呼び出し側が自分で処理する panic もあるため）
//! - 捕捉区間の中では、それに加えて位置と backtrace を記録する

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, PanicHookInfo};
use std::sync::Once;

use crate::domain::PanicSite;

thread_local! {
    /// `Some(capture_backtrace)` while this thread is inside an intercepting section.
    static SCOPE: Cell<Option<bool>> = const { Cell::new(None) };

    static SITE: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

static INSTALL: Once = Once::new();

fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            record(info);
            previous(info);
        }));
    });
}

fn record(info: &PanicHookInfo<'_>) {
    let Ok(Some(capture_backtrace)) = SCOPE.try_with(Cell::get) else {
        return;
    };

    let site = PanicSite {
        thread: PanicSite::current_thread_name(),
        location: info.location().map(ToString::to_string),
        backtrace: capture_backtrace.then(|| Backtrace::force_capture().to_string()),
    };
    let _ = SITE.try_with(|slot| *slot.borrow_mut() = Some(site));
}

/// Take (and clear) what the hook recorded on this thread.
pub(crate) fn take_site() -> Option<PanicSite> {
    SITE.try_with(|slot| slot.borrow_mut().take()).ok().flatten()
}

/// Drop whatever the hook recorded on this thread.
pub(crate) fn discard_site() {
    let _ = take_site();
}

/// Marks the current thread as inside an intercepting section until dropped.
///
/// Nested scopes restore the outer state on drop.
pub(crate) struct InterceptScope {
    previous: Option<bool>,
}

impl InterceptScope {
    pub(crate) fn enter(capture_backtrace: bool) -> Self {
        install();
        // 前の区間の残り物を拾わないように
        let _ = take_site();
        let previous = SCOPE.with(|scope| scope.replace(Some(capture_backtrace)));
        Self { previous }
    }
}

impl Drop for InterceptScope {
    fn drop(&mut self) {
        let _ = SCOPE.try_with(|scope| scope.set(self.previous));
    }
}
