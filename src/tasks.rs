//! Screen-scoped async tasks.
//!
//! Futures spawned through a [`TaskScope`] are aborted when the component
//! that created the scope is unmounted, so a late response never writes
//! into disposed signals.

use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, Abortable};
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

/// Abort handles of the tasks still running in one scope.
#[derive(Default)]
struct Registry {
    next_id: u64,
    live: Vec<(u64, AbortHandle)>,
}

impl Registry {
    fn register(&mut self, handle: AbortHandle) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push((id, handle));
        id
    }

    fn release(&mut self, id: u64) {
        self.live.retain(|(live_id, _)| *live_id != id);
    }

    /// Abort every registered task, returning how many were still live.
    fn abort_all(&mut self) -> usize {
        let live = self.live.len();
        for (_, handle) in self.live.drain(..) {
            handle.abort();
        }
        live
    }
}

type Shared = Arc<Mutex<Registry>>;

#[derive(Clone, Copy)]
pub struct TaskScope {
    registry: StoredValue<Shared>,
}

impl TaskScope {
    /// Create a scope tied to the current reactive owner.
    pub fn new() -> Self {
        let registry: Shared = Arc::default();
        let on_unmount = Arc::clone(&registry);
        on_cleanup(move || {
            let pending = on_unmount.lock().map(|mut r| r.abort_all()).unwrap_or(0);
            if pending > 0 {
                debug!("Aborted {} in-flight request(s) on unmount", pending);
            }
        });
        Self {
            registry: StoredValue::new(registry),
        }
    }

    /// Spawn `fut` on the UI thread. Does nothing once the scope is gone.
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let Some(registry) = self.registry.try_get_value() else {
            return;
        };
        let (handle, registration) = AbortHandle::new_pair();
        let Ok(id) = registry.lock().map(|mut r| r.register(handle)) else {
            return;
        };
        spawn_local(async move {
            let _ = Abortable::new(fut, registration).await;
            if let Ok(mut r) = registry.lock() {
                r.release(id);
            }
        });
    }
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::Aborted;

    #[test]
    fn test_abort_all_cancels_registered_futures() {
        let mut registry = Registry::default();
        let (handle, registration) = AbortHandle::new_pair();
        registry.register(handle);

        assert_eq!(registry.abort_all(), 1);
        assert!(registry.live.is_empty());

        let result = block_on(Abortable::new(async { 7 }, registration));
        assert_eq!(result, Err(Aborted));
    }

    #[test]
    fn test_finished_tasks_are_released() {
        let mut registry = Registry::default();
        let (first, _r1) = AbortHandle::new_pair();
        let (second, _r2) = AbortHandle::new_pair();
        let first_id = registry.register(first);
        let second_id = registry.register(second);
        assert_ne!(first_id, second_id);

        registry.release(first_id);
        assert_eq!(registry.live.len(), 1);
        registry.release(first_id);
        assert_eq!(registry.live.len(), 1);

        assert_eq!(registry.abort_all(), 1);
    }

    #[test]
    fn test_registry_stays_bounded_across_requests() {
        let mut registry = Registry::default();
        for _ in 0..100 {
            let (handle, _registration) = AbortHandle::new_pair();
            let id = registry.register(handle);
            registry.release(id);
        }
        assert!(registry.live.is_empty());
        assert_eq!(registry.abort_all(), 0);
    }
}
