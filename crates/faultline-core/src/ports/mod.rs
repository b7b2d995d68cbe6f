//! Ports - 抽象化レイヤー
//!
//! 捕捉処理が外部に求める能力（時刻・スタック情報）を trait として定義します。
//! 実装は `impls` にあります。

pub mod clock;
pub mod stack;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::stack::StackSource;
