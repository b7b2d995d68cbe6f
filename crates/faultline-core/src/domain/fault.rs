//! Fault - 捕捉した panic の記録（そのままエラー値として使える）
//!
//! 捕捉した瞬間に一度だけ作られ、その後は変更されません。
//! `Clone` / `Send` / `Sync` なので複数の読み手で共有できます。

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::value::FaultValue;

/// A panic that was intercepted and turned into a value.
///
/// - `{}` renders the short form: `panic: <value>`
/// - `{:#}` renders the full form: short form, a blank line, then the trace
///
/// Serializes as `{"time", "value", "trace", "truncated"}`.
#[derive(Debug, Clone, Serialize)]
pub struct Fault {
    time: DateTime<Utc>,
    value: FaultValue,
    trace: String,
    truncated: bool,
}

impl Fault {
    pub(crate) fn new(time: DateTime<Utc>, value: FaultValue, trace: String, truncated: bool) -> Self {
        Self {
            time,
            value,
            trace,
            truncated,
        }
    }

    /// When the panic was intercepted.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn value(&self) -> &FaultValue {
        &self.value
    }

    /// Stack dump taken at interception time.
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// Whether `trace` was cut at the capture limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// One-line summary suitable for logs.
    pub fn short_message(&self) -> String {
        self.to_string()
    }

    /// Summary followed by the complete stack dump.
    pub fn full_detail(&self) -> String {
        format!("{self:#}")
    }

    /// Raise this fault again as a panic whose payload is the fault itself.
    ///
    /// An outer interception sees it as `FaultValue::Error`.
    pub fn resume(self) -> ! {
        std::panic::panic_any(self)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panic: {}", self.value)?;
        if f.alternate() {
            write!(f, "\n\n{}", self.trace)?;
        }
        Ok(())
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.value {
            FaultValue::Error(err) => {
                let err: &(dyn Error + 'static) = &**err;
                Some(err)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(value: FaultValue) -> Fault {
        let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        Fault::new(time, value, "thread 'main' panicked at src/lib.rs:1:1:".to_string(), false)
    }

    #[test]
    fn short_message_prefixes_the_value() {
        let fault = sample("not at a disco".into());
        assert_eq!(fault.short_message(), "panic: not at a disco");
        assert_eq!(fault.to_string(), fault.short_message());
    }

    #[test]
    fn full_detail_is_short_message_blank_line_then_trace() {
        let fault = sample("boom".into());
        let detail = fault.full_detail();

        let rest = detail.strip_prefix(&fault.short_message()).unwrap();
        let trace = rest.strip_prefix("\n\n").unwrap();
        assert_eq!(trace, fault.trace());
        assert!(!trace.is_empty());
    }

    #[test]
    fn source_is_the_wrapped_error() {
        let inner = std::io::Error::other("pipe closed");
        let fault = sample(FaultValue::Error(std::sync::Arc::new(inner)));
        assert_eq!(fault.source().unwrap().to_string(), "pipe closed");

        let fault = sample("plain".into());
        assert!(fault.source().is_none());
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let fault = sample("boom".into());
        let v = serde_json::to_value(&fault).unwrap();

        assert_eq!(v["time"], "2024-01-02T03:04:05Z");
        assert_eq!(v["value"], "boom");
        assert_eq!(v["trace"], "thread 'main' panicked at src/lib.rs:1:1:");
        assert_eq!(v["truncated"], false);
    }
}
