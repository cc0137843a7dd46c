/*!
 * Process Registry
 * Shared table of live handles keyed by engine-assigned IDs
 */

use super::core::{ProcessResult, SpawnConfig};
use super::handle::ProcessHandle;
use super::spawn::spawn;
use crate::core::types::HandleId;
use dashmap::DashMap;
use log::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Registry of spawned children for callers that track processes by ID
/// rather than by owning the handles directly
pub struct ProcessRegistry {
    processes: Arc<DashMap<HandleId, Arc<ProcessHandle>>>,
    next_id: Arc<AtomicU64>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        info!("Process registry initialized");
        Self {
            processes: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Spawn a child and track its handle under a fresh ID
    pub fn spawn(&self, config: SpawnConfig) -> ProcessResult<HandleId> {
        let handle = spawn(config)?;
        Ok(self.insert(Arc::new(handle)))
    }

    /// Track an externally spawned handle
    pub fn insert(&self, handle: Arc<ProcessHandle>) -> HandleId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.processes.insert(id, handle);
        id
    }

    /// Get a shared reference to a tracked handle
    #[must_use]
    pub fn get(&self, id: HandleId) -> Option<Arc<ProcessHandle>> {
        self.processes.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Stop tracking a handle, returning it to the caller
    ///
    /// Dropping the last reference closes any pipe descriptors the handle
    /// still holds; the child itself is not killed.
    pub fn remove(&self, id: HandleId) -> Option<Arc<ProcessHandle>> {
        self.processes.remove(&id).map(|(_, handle)| handle)
    }

    /// Check whether an ID is tracked
    #[must_use]
    pub fn contains(&self, id: HandleId) -> bool {
        self.processes.contains_key(&id)
    }

    /// Get count of tracked processes
    #[must_use]
    pub fn count(&self) -> usize {
        self.processes.len()
    }

    /// Reap exited children and drop their table entries
    ///
    /// Returns how many entries were removed. Liveness polling reaps each
    /// discovered-dead child, so no zombies remain for removed entries.
    pub fn cleanup(&self) -> usize {
        let mut to_remove = Vec::new();
        for entry in self.processes.iter() {
            if !entry.value().is_alive() {
                to_remove.push(*entry.key());
            }
        }
        let removed = to_remove.len();
        for id in to_remove {
            self.processes.remove(&id);
        }
        if removed > 0 {
            info!(
                "Cleanup: {} exited processes removed, {} remain",
                removed,
                self.processes.len()
            );
        }
        removed
    }
}

impl Clone for ProcessRegistry {
    fn clone(&self) -> Self {
        Self {
            processes: Arc::clone(&self.processes),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_spawn_and_lookup() {
        let registry = ProcessRegistry::new();
        let id = registry
            .spawn(SpawnConfig::new("sleep").with_args(vec!["5".to_string()]))
            .unwrap();

        assert!(registry.contains(id));
        assert_eq!(registry.count(), 1);

        let handle = registry.get(id).unwrap();
        assert!(handle.is_alive());

        handle.kill().unwrap();
        handle.wait().unwrap();
        registry.remove(id);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_cleanup_sweeps_exited() {
        let registry = ProcessRegistry::new();
        let short = registry.spawn(SpawnConfig::new("true")).unwrap();
        let long = registry
            .spawn(SpawnConfig::new("sleep").with_args(vec!["5".to_string()]))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while registry.get(short).unwrap().is_alive() {
            assert!(Instant::now() < deadline, "short-lived child never exited");
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(registry.cleanup(), 1);
        assert!(!registry.contains(short));
        assert!(registry.contains(long));

        let handle = registry.get(long).unwrap();
        handle.kill().unwrap();
        handle.wait().unwrap();
        assert_eq!(registry.cleanup(), 1);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let registry = ProcessRegistry::new();
        let first = registry.spawn(SpawnConfig::new("true")).unwrap();
        registry.get(first).unwrap().wait().unwrap();
        registry.remove(first);
        let second = registry.spawn(SpawnConfig::new("true")).unwrap();
        assert_ne!(first, second);
        registry.get(second).unwrap().wait().unwrap();
    }
}
