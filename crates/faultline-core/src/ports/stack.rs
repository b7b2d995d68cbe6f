//! StackSource port - スタック情報の取得
//!
//! 実行中の全スレッドのスタックを取れるランタイムは少ないので、
//! 実装は「panic したスレッドのみ」に縮退してよい。

use crate::domain::PanicSite;

/// Produces the textual stack dump stored in a `Fault`.
///
/// `site` is what the panic hook saw at the panic point, if it was able to
/// record anything. It is `None` when the hook was replaced or the payload
/// did not come from a panic on this thread.
pub trait StackSource: Send + Sync {
    fn dump(&self, site: Option<PanicSite>) -> String;
}
