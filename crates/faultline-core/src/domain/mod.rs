//! Domain model (fault record, carried value, error slot).
//!
//! このレイヤーは panic の捕捉方法を知りません。
//! 捕捉結果の「形」だけを定義します。

pub mod fault;
pub mod site;
pub mod slot;
pub mod value;

pub use self::fault::Fault;
pub use self::site::PanicSite;
pub use self::slot::ErrorSlot;
pub use self::value::{BoxError, FaultValue};
