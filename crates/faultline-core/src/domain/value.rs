//! FaultValue - panic が運んできた値
//!
//! `panic!` の payload は `Box<dyn Any + Send>` で、型は何でもありです。
//! ここでは閉じた enum に落として、エラー分類をテスト可能に保ちます。

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::fault::Fault;

/// Boxed error that a section may raise with `std::panic::panic_any`.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// The value carried by an intercepted panic.
///
/// # 分類
/// - `Message`: `panic!("...")` の文字列（`&'static str` / `String`）
/// - `Error`: エラー値そのもの（`BoxError`, `Arc<dyn Error>`, 再送出された `Fault`）
/// - `Other`: それ以外（数値などは `Display` 形式、不明な型は `Box<dyn Any>`）
#[derive(Debug, Clone)]
pub enum FaultValue {
    Message(String),
    Error(Arc<dyn Error + Send + Sync>),
    Other(String),
}

/// Same text the std panic hook prints for payloads it can't render.
const OPAQUE_PAYLOAD: &str = "Box<dyn Any>";

macro_rules! render_display_payload {
    ($payload:expr; $($ty:ty),+ $(,)?) => {
        $(
            if let Some(v) = $payload.downcast_ref::<$ty>() {
                return FaultValue::Other(v.to_string());
            }
        )+
    };
}

impl FaultValue {
    /// Classify a raw panic payload.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<&'static str>() {
            Ok(s) => return Self::Message((*s).to_string()),
            Err(p) => p,
        };
        let payload = match payload.downcast::<String>() {
            Ok(s) => return Self::Message(*s),
            Err(p) => p,
        };
        let payload = match payload.downcast::<Fault>() {
            Ok(fault) => return Self::Error(Arc::new(*fault)),
            Err(p) => p,
        };
        let payload = match payload.downcast::<BoxError>() {
            Ok(err) => return Self::Error(Arc::from(*err)),
            Err(p) => p,
        };
        let payload = match payload.downcast::<Arc<dyn Error + Send + Sync>>() {
            Ok(err) => return Self::Error(*err),
            Err(p) => p,
        };

        render_display_payload!(payload;
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
            f32, f64, bool, char,
        );

        Self::Other(OPAQUE_PAYLOAD.to_string())
    }

    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Error(err) => Some(&**err),
            _ => None,
        }
    }
}

impl fmt::Display for FaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(s) | Self::Other(s) => f.write_str(s),
            Self::Error(err) => write!(f, "{err}"),
        }
    }
}

// 構造化ログ向け: 値は常に文字列として出す
impl Serialize for FaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for FaultValue {
    fn from(s: &str) -> Self {
        Self::Message(s.to_string())
    }
}

impl From<String> for FaultValue {
    fn from(s: String) -> Self {
        Self::Message(s)
    }
}
