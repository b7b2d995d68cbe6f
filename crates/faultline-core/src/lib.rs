//! faultline-core
//!
//! Turns a panic inside a unit of work into an ordinary error value.
//!
//! # モジュール構成
//! - **domain**: Fault, FaultValue, ErrorSlot, PanicSite
//! - **ports**: Clock, StackSource
//! - **impls**: ThreadBacktrace, StaticStack
//! - **app**: FaultCapture と転送方式（recover / forward / go と非同期版）
//!
//! # 使用例
//! ```
//! let err = faultline_core::go(|| -> Result<(), faultline_core::Fault> {
//!     panic!("not at a disco")
//! })
//! .unwrap_err();
//! assert_eq!(err.to_string(), "panic: not at a disco");
//! ```
//!
//! handler や slot を渡さなければ何も捕捉しません。panic は通常どおり伝播します。

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{
    CaptureConfig, ConfigError, FaultCapture, GuardedFuture, Handler, catch, forward, go,
    go_async, recover, recover_future, spawn_guarded,
};
pub use domain::{BoxError, ErrorSlot, Fault, FaultValue, PanicSite};
