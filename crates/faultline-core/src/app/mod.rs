//! App - 捕捉と転送
//!
//! # 主要コンポーネント
//! - **FaultCapture**: panic payload → Fault（時刻・値・スタック）
//! - **recover**: コールバック方式
//! - **forward**: エラースロット方式（既存のエラーは上書きしない）
//! - **go**: fallible な処理の戻り値と panic を 1 つの `Result` にまとめる
//! - **future**: 上記の非同期版と tokio 連携
//! - **hook**: panic 地点の情報を残す panic hook
//! - **config**: CaptureConfig

pub mod capture;
pub mod config;
pub mod forward;
pub mod future;
pub mod guarded;
mod hook;
pub mod recover;

pub use self::capture::{FaultCapture, catch};
pub use self::config::{CaptureConfig, ConfigError, DEFAULT_TRACE_LIMIT};
pub use self::forward::forward;
pub use self::future::{GuardedFuture, go_async, recover_future, spawn_guarded};
pub use self::guarded::go;
pub use self::recover::{Handler, recover};
