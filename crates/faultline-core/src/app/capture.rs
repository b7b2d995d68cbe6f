//! FaultCapture - panic payload から Fault を組み立てる
//!
//! # フロー
//! 1. 時刻を取る（Clock）
//! 2. hook が残した PanicSite を回収
//! 3. StackSource でスタックを文字列化し、上限で切る
//! 4. Fault を返す
//!
//! 捕捉は同期的で、途中で await したりロックを待ったりしません。

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once, OnceLock};

use tracing::debug;

use super::config::CaptureConfig;
use super::hook::{self, InterceptScope};
use crate::domain::{Fault, FaultValue};
use crate::impls::ThreadBacktrace;
use crate::ports::{Clock, StackSource, SystemClock};

static GLOBAL: OnceLock<FaultCapture> = OnceLock::new();
static SCOPE_NOTICE: Once = Once::new();

/// Builds `Fault` records and owns the interception boundary.
///
/// Cheap to clone; the ports are shared behind `Arc`.
#[derive(Clone)]
pub struct FaultCapture {
    clock: Arc<dyn Clock>,
    stacks: Arc<dyn StackSource>,
    config: CaptureConfig,
}

impl FaultCapture {
    pub fn new(clock: Arc<dyn Clock>, stacks: Arc<dyn StackSource>, config: CaptureConfig) -> Self {
        Self {
            clock,
            stacks,
            config,
        }
    }

    /// Wall clock + backtrace of the faulting thread.
    pub fn from_config(config: CaptureConfig) -> Self {
        let stacks = ThreadBacktrace::new(config.capture_backtrace);
        Self::new(Arc::new(SystemClock), Arc::new(stacks), config)
    }

    /// Process-wide capture used by the free functions (`recover`, `forward`, `go`, ...).
    ///
    /// Defaults to `CaptureConfig::default()` unless `install_global` ran first.
    pub fn global() -> &'static FaultCapture {
        GLOBAL.get_or_init(|| Self::from_config(CaptureConfig::default()))
    }

    /// Make this the process-wide capture. Fails (returning `self`) if one is
    /// already in place.
    pub fn install_global(self) -> Result<(), Self> {
        GLOBAL.set(self)
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Build a `Fault` from a panic payload.
    pub fn capture(&self, payload: Box<dyn Any + Send>) -> Fault {
        self.capture_value(FaultValue::from_payload(payload))
    }

    pub fn capture_value(&self, value: FaultValue) -> Fault {
        let time = self.clock.now();

        SCOPE_NOTICE.call_once(|| {
            debug!("stack capture is limited to the faulting thread; other threads are not introspectable");
        });

        let dump = self.stacks.dump(hook::take_site());
        let (trace, truncated) = truncate_trace(dump, self.config.trace_limit);

        debug!(value = %value, truncated, "captured panic");
        Fault::new(time, value, trace, truncated)
    }

    /// Run `section`, turning a panic inside it into `Err(Fault)`.
    ///
    /// This is the unconditional boundary the forwarding disciplines build on.
    pub fn catch<R>(&self, section: impl FnOnce() -> R) -> Result<R, Fault> {
        let scope = self.enter();
        let result = panic::catch_unwind(AssertUnwindSafe(section));
        drop(scope);

        match result {
            Ok(value) => {
                // 区間内で処理済みの panic の記録は、後の捕捉に持ち越さない
                hook::discard_site();
                Ok(value)
            }
            Err(payload) => Err(self.capture(payload)),
        }
    }

    pub(crate) fn enter(&self) -> InterceptScope {
        InterceptScope::enter(self.config.capture_backtrace)
    }
}

impl Default for FaultCapture {
    fn default() -> Self {
        Self::from_config(CaptureConfig::default())
    }
}

impl fmt::Debug for FaultCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultCapture")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Cut `trace` to at most `limit` bytes without splitting a character.
fn truncate_trace(mut trace: String, limit: usize) -> (String, bool) {
    if trace.len() <= limit {
        return (trace, false);
    }
    let mut cut = limit;
    while !trace.is_char_boundary(cut) {
        cut -= 1;
    }
    trace.truncate(cut);
    (trace, true)
}

/// `FaultCapture::global().catch(section)`
pub fn catch<R>(section: impl FnOnce() -> R) -> Result<R, Fault> {
    FaultCapture::global().catch(section)
}
