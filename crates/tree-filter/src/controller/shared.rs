//! Shared controller state for multi-threaded hosts.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::{FilterSetController, PassOutcome, RevealOutcome};
use crate::engine::PassReport;
use crate::error::Result;

/// A cloneable handle to a controller behind a single lock.
///
/// The lock is held for the whole of each action, pass included, so a pass
/// never observes half-applied toggle changes.
#[derive(Debug, Clone)]
pub struct SharedController {
    inner: Arc<Mutex<FilterSetController>>,
}

impl SharedController {
    pub fn new(controller: FilterSetController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Locks the controller for a sequence of reads or actions.
    pub fn lock(&self) -> MutexGuard<'_, FilterSetController> {
        self.inner.lock()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FilterSetController) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn set_toggle(&self, id: &str, pressed: bool) -> Result<PassOutcome> {
        self.inner.lock().set_toggle(id, pressed)
    }

    pub fn set_search_text(&self, text: &str) -> Result<PassOutcome> {
        self.inner.lock().set_search_text(text)
    }

    pub fn clear_filters(&self) -> Result<PassOutcome> {
        self.inner.lock().clear_filters()
    }

    pub fn reveal(&self, path: &str) -> Result<RevealOutcome> {
        self.inner.lock().reveal(path)
    }

    pub fn request_rescan(&self) {
        self.inner.lock().request_rescan();
    }

    pub fn poll(&self) -> Result<Option<PassReport>> {
        self.inner.lock().poll()
    }
}
