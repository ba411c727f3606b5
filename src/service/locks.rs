//! Per-collection reorder locks
//!
//! Writes that assign ordering keys within one sibling collection (an
//! owner's board list, or one board column) run one at a time. Other
//! collections are unaffected.
//!
//! The map only holds `Weak` handles; a collection's mutex lives as long
//! as someone is waiting on or holding it. Dead entries are purged every
//! [`CLEANUP_INTERVAL`] acquisitions once the map passes
//! [`CLEANUP_THRESHOLD`] entries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::core::models::{BoardId, OwnerId, TaskStatus};

/// A sibling collection whose keys are assigned together
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// All boards of one owner
    Boards(OwnerId),
    /// One status column of one board
    Column(BoardId, TaskStatus),
}

/// Acquisitions between purges of dead entries
const CLEANUP_INTERVAL: usize = 64;

/// Map size below which dead entries are left alone
const CLEANUP_THRESHOLD: usize = 128;

/// Lazily created mutex per collection
#[derive(Debug, Default)]
pub struct CollectionLocks {
    locks: Mutex<HashMap<CollectionKey, Weak<Mutex<()>>>>,
    acquisitions: AtomicUsize,
}

impl CollectionLocks {
    /// Run `f` while holding the lock for `key`
    pub fn with_lock<R>(&self, key: CollectionKey, f: impl FnOnce() -> R) -> R {
        let lock = {
            // the map holds no invariants a panicking holder could break
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            let lock = locks.get(&key).and_then(Weak::upgrade).unwrap_or_else(|| {
                let fresh = Arc::new(Mutex::new(()));
                locks.insert(key, Arc::downgrade(&fresh));
                fresh
            });

            let tick = self.acquisitions.fetch_add(1, Ordering::Relaxed);
            if locks.len() > CLEANUP_THRESHOLD && tick.is_multiple_of(CLEANUP_INTERVAL) {
                locks.retain(|_, weak| weak.strong_count() > 0);
            }
            lock
        };
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Entries currently tracked, live or dead
    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
