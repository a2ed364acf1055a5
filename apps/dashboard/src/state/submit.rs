//! # Submit Guard
//!
//! In-flight flag for form submissions. While one create or update is
//! waiting on the store, a second submission fails at once with `BUSY`
//! instead of being applied twice.
//!
//! ```text
//! submit ──► begin() ──► Submission ──► store call ──► drop(Submission)
//!              │                                          │
//!              └── flag already set? → ApiError::busy()    └── flag cleared
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

/// Held for the duration of one submission. Dropping it clears the flag.
#[derive(Debug)]
pub struct Submission {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a submission as started.
    ///
    /// ## Errors
    /// `BUSY` if another submission has not finished yet.
    pub fn begin(&self) -> ApiResult<Submission> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Rejecting submission while another is in flight");
            return Err(ApiError::busy());
        }
        Ok(Submission {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_second_submission_is_busy() {
        let guard = SubmitGuard::new();
        let first = guard.begin().unwrap();
        assert!(guard.is_busy());

        let err = guard.begin().unwrap_err();
        assert_eq!(err.code, ErrorCode::Busy);

        drop(first);
        assert!(!guard.is_busy());
        assert!(guard.begin().is_ok());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let guard = SubmitGuard::new();
        let other = guard.clone();
        let _submission = guard.begin().unwrap();
        assert!(other.begin().is_err());
    }
}
