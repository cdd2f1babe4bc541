//! Correlation identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Unique identifier correlating every log line of one request or invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self(format!("{:x}-{:x}", nanos, next_sequence()))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Linear congruential step; enough to tell invocations in the same nanosecond apart.
fn next_sequence() -> u32 {
    static SEED: AtomicU32 = AtomicU32::new(12345);
    let prev = SEED.fetch_add(1, Ordering::Relaxed);
    prev.wrapping_mul(1103515245).wrapping_add(12345)
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::generate()
    }
}
