//! Batch submission results.

use reelsmith_core::Task;
use reelsmith_error::ReelsmithError;

/// Result of a sequential batch submission.
///
/// Submission stops at the first failure; tasks submitted before it are kept.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Tasks created, in submission order
    pub submitted: Vec<Task>,
    /// The submission that stopped the batch
    pub failure: Option<BatchFailure>,
}

impl BatchOutcome {
    /// Whether every job was submitted.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// A failed batch entry.
#[derive(Debug)]
pub struct BatchFailure {
    /// Zero-based position of the job in the batch
    pub index: usize,
    /// Why it failed
    pub error: ReelsmithError,
}
