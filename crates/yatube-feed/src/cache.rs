//! Single-slot cache for the rendered first page of the global feed.
//!
//! The slot is filled on demand and emptied only by expiry or an explicit
//! [`PageCache::clear`]. Creating, editing or deleting posts leaves it alone,
//! so a warm slot keeps serving what it stored until one of those happens.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

struct Slot<T> {
    value: T,
    stored_at: Instant,
}

pub struct PageCache<T> {
    ttl: Duration,
    slot: RwLock<Option<Slot<T>>>,
}

impl<T: Clone> PageCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the stored value while it is fresh; otherwise run `compute`,
    /// store its output and return it. A failed `compute` stores nothing.
    ///
    /// Two callers missing at once may both compute; the later store wins.
    pub fn get_or_compute<E, F>(&self, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(slot) = self.read().as_ref() {
            if slot.stored_at.elapsed() < self.ttl {
                debug!("Page cache hit");
                return Ok(slot.value.clone());
            }
        }

        debug!("Page cache miss");
        let value = compute()?;
        *self.write() = Some(Slot {
            value: value.clone(),
            stored_at: Instant::now(),
        });
        Ok(value)
    }

    /// Empty the slot so the next request recomputes.
    pub fn clear(&self) {
        *self.write() = None;
        debug!("Page cache cleared");
    }

    pub fn is_warm(&self) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|slot| slot.stored_at.elapsed() < self.ttl)
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Slot<T>>> {
        self.slot.read().unwrap_or_else(|poisoned| {
            warn!("Recovered from poisoned page cache lock");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Slot<T>>> {
        self.slot.write().unwrap_or_else(|poisoned| {
            warn!("Recovered from poisoned page cache lock");
            poisoned.into_inner()
        })
    }
}
