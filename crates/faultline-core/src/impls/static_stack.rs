//! StaticStack - 決まった文字列を返す StackSource（テスト・デモ用）

use crate::domain::PanicSite;
use crate::ports::StackSource;

#[derive(Debug, Clone, Default)]
pub struct StaticStack(pub String);

impl StaticStack {
    pub fn new(dump: impl Into<String>) -> Self {
        Self(dump.into())
    }
}

impl StackSource for StaticStack {
    fn dump(&self, _site: Option<PanicSite>) -> String {
        self.0.clone()
    }
}
