//! ThreadBacktrace - std の backtrace を使った StackSource
//!
//! Rust には他スレッドのスタックを覗く手段がないため、panic したスレッドだけを記録します。

use std::backtrace::Backtrace;
use std::fmt::Write;

use crate::domain::PanicSite;
use crate::ports::StackSource;

/// Stack dump of the faulting thread.
///
/// Output shape:
/// ```text
/// thread 'worker-1' panicked at src/job.rs:10:5:
/// stack backtrace:
///    0: ...
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThreadBacktrace {
    capture_backtrace: bool,
}

impl ThreadBacktrace {
    pub fn new(capture_backtrace: bool) -> Self {
        Self { capture_backtrace }
    }
}

impl Default for ThreadBacktrace {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StackSource for ThreadBacktrace {
    fn dump(&self, site: Option<PanicSite>) -> String {
        let (thread, location, recorded) = match site {
            Some(site) => (site.thread, site.location, site.backtrace),
            None => (PanicSite::current_thread_name(), None, None),
        };

        let mut out = match location {
            Some(location) => format!("thread '{thread}' panicked at {location}:\n"),
            None => format!("thread '{thread}' panicked:\n"),
        };

        if self.capture_backtrace {
            // hook が記録できなかったときは、ここ（捕捉地点）で取る
            let backtrace = recorded.unwrap_or_else(|| Backtrace::force_capture().to_string());
            let _ = write!(out, "stack backtrace:\n{backtrace}");
        }
        out
    }
}
