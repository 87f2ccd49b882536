use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cleared when the owning screen unmounts; async work checks it before
/// touching screen state.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn kill(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Guard tied to the current reactive owner
    pub fn for_current_owner() -> Self {
        let liveness = Self::new();
        let guard = liveness.clone();
        leptos::prelude::on_cleanup(move || guard.kill());
        liveness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_is_seen_by_clones() {
        let liveness = Liveness::new();
        let task_copy = liveness.clone();
        assert!(task_copy.is_alive());
        liveness.kill();
        assert!(!task_copy.is_alive());
    }
}
