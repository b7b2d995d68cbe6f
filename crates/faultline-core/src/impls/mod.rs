//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **ThreadBacktrace**: std::backtrace ベース（本番用）
//! - **StaticStack**: 固定文字列（テスト用）

pub mod static_stack;
pub mod thread_backtrace;

pub use self::static_stack::StaticStack;
pub use self::thread_backtrace::ThreadBacktrace;
