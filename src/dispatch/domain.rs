//! The global application serialization domain.

use tokio::sync::Mutex;

/// Mutual-exclusion boundary ensuring only one piece of application code
/// executes at a time across all engine workers.
///
/// Every call into the application (request callback, connection handler
/// notification) goes through [`AppDomain::enter`]. The domain guards
/// application code only; it is never held across engine I/O.
pub struct AppDomain {
    lock: Mutex<()>,
}

impl AppDomain {
    pub fn new() -> Self {
        Self { lock: Mutex::new(()) }
    }

    /// Run `f` while holding the domain. Acquisition may block if another
    /// worker currently holds it; release is automatic when `f` returns.
    pub async fn enter<T>(&self, f: impl FnOnce() -> T) -> T {
        let _guard = self.lock.lock().await;
        f()
    }
}

impl Default for AppDomain {
    fn default() -> Self {
        Self::new()
    }
}
