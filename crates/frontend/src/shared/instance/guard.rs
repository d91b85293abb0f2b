use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Tracks which fetch is the latest and whether its owner is still mounted.
#[derive(Debug, Clone, Default)]
pub struct FetchGuard {
    generation: Arc<AtomicU64>,
    cancelled: Arc<AtomicBool>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new fetch, superseding every earlier one
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while `generation` is the latest fetch and the owner is alive
    pub fn is_current(&self, generation: u64) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
            && self.generation.load(Ordering::SeqCst) == generation
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_fetch_supersedes_earlier() {
        let guard = FetchGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_cancel_discards_everything() {
        let guard = FetchGuard::new();
        let shared = guard.clone();
        let generation = guard.begin();
        shared.cancel();
        assert!(!guard.is_current(generation));
    }
}
