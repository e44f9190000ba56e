// SPDX-License-Identifier: Apache-2.0
//! Per-playback cancellation.
//!
//! Every playback the scheduler starts gets its own [`CancellationSource`].
//! The scheduler keeps one clone and hands another to the caller inside a
//! [`PlayHandle`](crate::PlayHandle). Cancelling either side turns the
//! playback's pending tick into a no-op, so no "is a sort running" flag
//! exists anywhere.
//!
//! The blocking driver sleeps between steps with
//! [`CancellationToken::wait_timeout`], which wakes as soon as the playback is
//! cancelled from another thread.
//!
//! # Example
//!
//! ```
//! use sortsynth_runtime::cancellation::CancellationSource;
//! use std::time::Duration;
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//!
//! let waiter = std::thread::spawn(move || token.wait_timeout(Duration::from_secs(10)));
//! source.cancel();
//! assert!(waiter.join().unwrap());
//! ```

#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use web_time::Duration;

/// Read side of a playback's cancellation flag.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<CancellationInner>,
}

/// Control side of a playback's cancellation flag.
///
/// Clones share the same flag. Dropping a source does **not** cancel; a
/// playback whose handle was dropped keeps running until it finishes or is
/// superseded.
#[derive(Clone)]
pub struct CancellationSource {
    inner: Arc<CancellationInner>,
}

struct CancellationInner {
    cancelled: AtomicBool,
    notify: (Mutex<()>, Condvar),
}

impl CancellationSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancellationInner {
                cancelled: AtomicBool::new(false),
                notify: (Mutex::new(()), Condvar::new()),
            }),
        }
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Cancel and wake every pending `wait_timeout`.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let (lock, cvar) = &self.inner.notify;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationSource")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationToken {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Block until cancelled or `duration` elapses.
    ///
    /// Returns `true` if cancelled, `false` if timed out.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let (lock, cvar) = &self.inner.notify;
        let guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = cvar
            .wait_timeout_while(guard, duration, |_| !self.is_cancelled())
            .unwrap_or_else(|e| e.into_inner());
        self.is_cancelled()
    }
}
