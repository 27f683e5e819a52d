//! Per-user guard against overlapping report saves.
//!
//! A member double-tapping "save" on a slow connection would otherwise
//! persist the same month twice. Each save claims a slot keyed by the
//! uploader's id; a second claim while the first is held fails, and the
//! slot is released when the [`UploadSlot`] is dropped.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use sangha_core::types::DbId;

/// Set of users with a save in progress.
#[derive(Debug, Default)]
pub struct UploadRegistry {
    active: Mutex<HashSet<DbId>>,
}

impl UploadRegistry {
    /// Claim the slot for `user_id`, or `None` if it is already held.
    pub fn try_acquire(self: &Arc<Self>, user_id: DbId) -> Option<UploadSlot> {
        if !self.lock().insert(user_id) {
            return None;
        }
        Some(UploadSlot {
            registry: Arc::clone(self),
            user_id,
        })
    }

    /// Whether `user_id` currently holds a slot.
    pub fn is_active(&self, user_id: DbId) -> bool {
        self.lock().contains(&user_id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<DbId>> {
        // The set stays consistent even if a holder panicked mid-request.
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A held save slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct UploadSlot {
    registry: Arc<UploadRegistry>,
    user_id: DbId,
}

impl Drop for UploadSlot {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.user_id);
    }
}
