//! Single-flight gate for uploads.
//!
//! Models the "is uploading" flag of the original screens as explicit state:
//! the caller acquires a guard before starting the pipeline and the flag is
//! released when the guard drops, whichever exit path the upload takes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Gate that admits at most one upload at a time.
///
/// There is no queueing: while a guard is held, `try_begin` returns `None`
/// and the caller is expected to ignore the repeat submission.
#[derive(Clone, Default)]
pub struct UploadGate {
    in_flight: Arc<AtomicBool>,
}

impl UploadGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start an upload. Returns a guard on success; the flag clears
    /// when the guard is dropped.
    pub fn try_begin(&self) -> Option<UploadGuard> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(UploadGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
        } else {
            None
        }
    }

    /// True while an upload is in flight.
    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Clears the gate on drop, including on panic unwind.
pub struct UploadGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flight() {
        let gate = UploadGate::new();
        assert!(!gate.is_uploading());

        let guard = gate.try_begin().unwrap();
        assert!(gate.is_uploading());
        assert!(gate.try_begin().is_none());

        drop(guard);
        assert!(!gate.is_uploading());
        assert!(gate.try_begin().is_some());
    }

    #[test]
    fn test_cleared_on_panic() {
        let gate = UploadGate::new();
        let inner = gate.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = inner.try_begin().unwrap();
            panic!("upload blew up");
        });
        assert!(result.is_err());
        assert!(!gate.is_uploading());
    }
}
