//! Demo jobs: each one succeeds, fails, panics, or fails and then panics.

use faultline_core::{ErrorSlot, Fault, forward};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("job {id} rejected: {reason}")]
    Rejected { id: u64, reason: String },

    #[error(transparent)]
    Panicked(#[from] Fault),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Succeed,
    Fail,
    Panic,
    FailThenPanic,
}

impl JobKind {
    /// Round-robin so every run exercises every path.
    pub fn for_id(id: u64) -> Self {
        match id % 4 {
            0 => Self::Succeed,
            1 => Self::Fail,
            2 => Self::Panic,
            _ => Self::FailThenPanic,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Job {
    pub id: u64,
    pub kind: JobKind,
}

impl Job {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            kind: JobKind::for_id(id),
        }
    }

    /// 本体。panic する可能性がある（呼び出し側で go_async に包む）
    pub async fn run(self) -> Result<u64, JobError> {
        tokio::task::yield_now().await;

        match self.kind {
            JobKind::Succeed => Ok(self.id.wrapping_mul(self.id)),
            JobKind::Fail => Err(self.rejected("quota exceeded")),
            JobKind::Panic => panic!("job {} hit an invariant violation", self.id),
            JobKind::FailThenPanic => {
                // エラーを入れた後の panic は捨てられる
                let slot = ErrorSlot::new();
                forward(Some(&slot), || {
                    slot.set(self.rejected("bad payload"));
                    panic!("job {} panicked while cleaning up", self.id);
                });
                slot.into_result(0)
            }
        }
    }

    fn rejected(&self, reason: &str) -> JobError {
        JobError::Rejected {
            id: self.id,
            reason: reason.to_string(),
        }
    }
}
