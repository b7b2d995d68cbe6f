//! PanicSite - panic hook が panic した瞬間に見たもの

/// What the panic hook recorded at the panic point, before unwinding began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicSite {
    /// Name of the panicking thread (`<unnamed>` if it has none).
    pub thread: String,

    /// `file:line:col` of the panic, when the runtime reports one.
    pub location: Option<String>,

    /// Rendered backtrace, when backtrace capture was enabled.
    pub backtrace: Option<String>,
}

impl PanicSite {
    /// Name of the calling thread, formatted the way the std panic message does.
    pub fn current_thread_name() -> String {
        std::thread::current()
            .name()
            .unwrap_or("<unnamed>")
            .to_string()
    }
}
