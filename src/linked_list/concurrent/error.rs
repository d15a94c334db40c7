use core::time::Duration;

use thiserror::Error;

/// Errors reported by timed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FindError {
    /// The value was still absent when the deadline passed.
    #[error("value not inserted within {waited:?}")]
    TimedOut { waited: Duration },
}
