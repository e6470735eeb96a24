use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handle the engine knows a registered buffer by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleId(u64);

impl SampleId {
    /// Unique for the life of the process, from any thread.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        SampleId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
