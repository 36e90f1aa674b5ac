//! Rescan tracking.

use std::sync::atomic::{AtomicU8, Ordering};

/// Where the controller stands relative to an external rescan.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum ScanState {
    /// No pass is owed.
    Idle = 0,
    /// A rescan was started; a pass is owed once it finishes.
    Requested = 1,
    /// The rescan has been observed running.
    Scanning = 2,
    /// A pass was requested while scanning and is owed.
    Deferred = 3,
}

impl ScanState {
    /// Loads the state from an atomic.
    pub fn load(atomic: &AtomicU8) -> Self {
        match atomic.load(Ordering::Relaxed) {
            1 => Self::Requested,
            2 => Self::Scanning,
            3 => Self::Deferred,
            _ => Self::Idle,
        }
    }

    pub fn store(self, atomic: &AtomicU8) {
        atomic.store(self as u8, Ordering::Relaxed);
    }

    /// Returns the state as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requested => "requested",
            Self::Scanning => "scanning",
            Self::Deferred => "deferred",
        }
    }

    /// Returns true if a pass is owed once scanning stops.
    #[inline]
    pub fn owes_pass(self) -> bool {
        self != Self::Idle
    }
}

/// Tracks a pending post-scan pass.
#[derive(Debug, Default)]
pub struct ScanTracker {
    state: AtomicU8,
}

impl ScanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        ScanState::load(&self.state)
    }

    pub fn request_rescan(&self) {
        ScanState::Requested.store(&self.state);
    }

    /// Records a pass that could not run because a scan is in progress.
    pub fn defer(&self) {
        ScanState::Deferred.store(&self.state);
    }

    /// Records that the scan was observed running.
    pub fn observe_scanning(&self) {
        if self.state() == ScanState::Requested {
            ScanState::Scanning.store(&self.state);
        }
    }

    /// Records a pass that ran after scanning stopped. A rescan that was
    /// requested but not yet seen running still owes its pass.
    pub fn settle(&self) {
        if matches!(self.state(), ScanState::Scanning | ScanState::Deferred) {
            ScanState::Idle.store(&self.state);
        }
    }

    /// Clears the state, returning true if a pass was owed.
    pub fn take_pending(&self) -> bool {
        let previous = self.state.swap(ScanState::Idle as u8, Ordering::Relaxed);
        previous != ScanState::Idle as u8
    }
}
