//! Status line state machine and the single-flight upload guard.
//!
//! The status text follows the upload lifecycle: Idle → Uploading →
//! AwaitingProcessing → Done, then back to Idle after a delay. Each
//! transition bumps an epoch counter; the delayed reset captures the epoch
//! at scheduling time and is ignored if another transition happened in the
//! meantime, so a stale timer can never clobber a newer upload's status.

use std::cell::Cell;

use crate::constants::BYTES_PER_MB;

/// Where the current (or most recent) upload attempt stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// No upload in progress
    Idle,
    /// Request body transmission in progress
    Uploading { loaded: u64, total: u64 },
    /// Body fully transmitted; server-side processing time is not
    /// observable, so progress stops here
    AwaitingProcessing,
    /// Attempt finished; `Err` carries the user-visible message
    Done(Result<(), String>),
}

/// The status line: current state plus the epoch guarding delayed resets.
#[derive(Debug)]
pub struct StatusLine {
    status: UploadStatus,
    epoch: u64,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            status: UploadStatus::Idle,
            epoch: 0,
        }
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    /// Epoch of the most recent transition. A scheduled reset holds on to
    /// this value and passes it back via [`reset_if_current`].
    ///
    /// [`reset_if_current`]: StatusLine::reset_if_current
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Transition to a new state, invalidating any pending reset.
    pub fn set(&mut self, status: UploadStatus) -> u64 {
        self.status = status;
        self.epoch += 1;
        self.epoch
    }

    /// Fall back to idle, but only if no transition happened since `epoch`
    /// was observed. Returns whether the reset was applied.
    pub fn reset_if_current(&mut self, epoch: u64) -> bool {
        if self.epoch != epoch {
            return false;
        }
        self.set(UploadStatus::Idle);
        true
    }

    /// The user-visible status text.
    pub fn label(&self) -> String {
        match &self.status {
            UploadStatus::Idle => "Waiting for image to upload...".to_string(),
            UploadStatus::Uploading { loaded, total } => format!(
                "Uploading... {:.1}/{:.1} MB",
                *loaded as f64 / BYTES_PER_MB,
                *total as f64 / BYTES_PER_MB
            ),
            UploadStatus::AwaitingProcessing => {
                "Uploaded, waiting for server to process the image".to_string()
            }
            UploadStatus::Done(Ok(())) => "Image uploaded successfully!".to_string(),
            UploadStatus::Done(Err(message)) => format!("Error: {}", message),
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-slot upload guard: at most one upload runs at a time, so
/// completion order always matches submission order. A selection made
/// while the slot is held is rejected, not queued.
#[derive(Debug, Default)]
pub struct UploadSlot {
    in_flight: Cell<bool>,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. Returns `false` when an upload is already in flight.
    pub fn try_acquire(&self) -> bool {
        if self.in_flight.get() {
            return false;
        }
        self.in_flight.set(true);
        true
    }

    /// Free the slot on completion, success or failure.
    pub fn release(&self) {
        self.in_flight.set(false);
    }
}
