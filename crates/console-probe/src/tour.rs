//! Run-once guard for the first-login guided tour.
//!
//! The console shows a "Skip tour" popup the first time a user lands on the
//! overview dashboard. Looking for it costs a visibility wait, so the check
//! runs once per suite: whichever session reaches the dashboard first
//! performs it and every later session skips it.

use crate::result::ProbeResult;
use std::future::Future;
use tokio::sync::Mutex;

/// Monotonic `unchecked → checked` flag shared by every session of a suite
#[derive(Debug, Default)]
pub struct TourGate {
    checked: Mutex<bool>,
}

impl TourGate {
    /// Create an unchecked gate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tour check already ran
    pub async fn is_checked(&self) -> bool {
        *self.checked.lock().await
    }

    /// Run `check` if the gate is still unchecked.
    ///
    /// The lock is held across `check`, so concurrent sessions wait for the
    /// first one instead of checking twice. The gate is marked checked
    /// whatever `check` returns; its error is still propagated. Returns
    /// `Ok(None)` when the check was skipped.
    pub async fn run_once<F, Fut, T>(&self, check: F) -> ProbeResult<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProbeResult<T>>,
    {
        let mut checked = self.checked.lock().await;
        if *checked {
            return Ok(None);
        }
        *checked = true;
        check().await.map(Some)
    }

    /// Return to unchecked
    pub async fn reset(&self) {
        *self.checked.lock().await = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::result::ProbeError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    mod gate_tests {
        use super::*;

        #[tokio::test]
        async fn test_runs_once() {
            let gate = TourGate::new();
            let calls = AtomicU32::new(0);

            for _ in 0..3 {
                gate.run_once(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .await
                .unwrap();
            }
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert!(gate.is_checked().await);
        }

        #[tokio::test]
        async fn test_failure_still_marks_checked() {
            let gate = TourGate::new();
            let result: ProbeResult<Option<()>> = gate
                .run_once(|| async { Err(ProbeError::driver("tab crashed")) })
                .await;
            assert!(result.is_err());
            assert!(gate.is_checked().await);

            let skipped = gate.run_once(|| async { Ok(1) }).await.unwrap();
            assert_eq!(skipped, None);
        }

        #[tokio::test]
        async fn test_reset() {
            let gate = TourGate::new();
            gate.run_once(|| async { Ok(()) }).await.unwrap();
            gate.reset().await;
            assert!(!gate.is_checked().await);
            assert_eq!(gate.run_once(|| async { Ok(7) }).await.unwrap(), Some(7));
        }

        #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
        async fn test_concurrent_sessions_check_once() {
            let gate = Arc::new(TourGate::new());
            let calls = Arc::new(AtomicU32::new(0));

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let gate = Arc::clone(&gate);
                    let calls = Arc::clone(&calls);
                    tokio::spawn(async move {
                        gate.run_once(|| async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::task::yield_now().await;
                            Ok(())
                        })
                        .await
                    })
                })
                .collect();

            for handle in handles {
                handle.await.unwrap().unwrap();
            }
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }
}
