//! Auto-save bookkeeping for document persistence.
//!
//! Mutators report a completed change with [`AutoSave::mark_pending`]; the
//! owner then asks [`AutoSave::should_save`] and writes through its storage
//! backend. Nothing here touches the document, so a save can never re-enter
//! a mutator.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default auto-save interval in seconds for [`SaveMode::Interval`].
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// When completed mutations are written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// Save after every completed mutation.
    #[default]
    Immediate,
    /// Save only on an explicit flush.
    Manual,
    /// Save on the first tick after the interval has elapsed.
    Interval { secs: u64 },
}

/// Tracks whether the document has changes that still need persisting.
#[derive(Debug, Clone)]
pub struct AutoSave {
    /// Save policy.
    mode: SaveMode,
    /// A mutation completed since the last save.
    pending: bool,
    /// Last save timestamp.
    last_save: Option<Instant>,
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new(SaveMode::default())
    }
}

impl AutoSave {
    /// Create a tracker with the given policy.
    pub fn new(mode: SaveMode) -> Self {
        Self {
            mode,
            pending: false,
            last_save: None,
        }
    }

    /// Get the save policy.
    pub fn mode(&self) -> SaveMode {
        self.mode
    }

    /// Change the save policy.
    pub fn set_mode(&mut self, mode: SaveMode) {
        self.mode = mode;
    }

    /// Record that a mutation completed.
    pub fn mark_pending(&mut self) {
        self.pending = true;
    }

    /// Check if there are unsaved mutations.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Check if the policy wants a save now.
    pub fn should_save(&self) -> bool {
        if !self.pending {
            return false;
        }

        match self.mode {
            SaveMode::Immediate => true,
            SaveMode::Manual => false,
            SaveMode::Interval { secs } => match self.last_save {
                Some(last) => last.elapsed() >= Duration::from_secs(secs),
                None => true,
            },
        }
    }

    /// Record a completed save.
    pub fn saved(&mut self) {
        self.pending = false;
        self.last_save = Some(Instant::now());
    }

    /// Drop pending changes without saving (e.g. after clearing storage).
    pub fn discard(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autosave_creation() {
        let autosave = AutoSave::default();

        assert_eq!(autosave.mode(), SaveMode::Immediate);
        assert!(!autosave.is_pending());
        assert!(!autosave.should_save());
    }

    #[test]
    fn test_immediate_saves_when_pending() {
        let mut autosave = AutoSave::new(SaveMode::Immediate);

        autosave.mark_pending();
        assert!(autosave.should_save());

        autosave.saved();
        assert!(!autosave.is_pending());
        assert!(!autosave.should_save());
    }

    #[test]
    fn test_manual_never_saves_on_its_own() {
        let mut autosave = AutoSave::new(SaveMode::Manual);

        autosave.mark_pending();
        assert!(autosave.is_pending());
        assert!(!autosave.should_save());
    }

    #[test]
    fn test_interval_waits_after_first_save() {
        let mut autosave = AutoSave::new(SaveMode::Interval { secs: 3600 });

        // Never saved, should save
        autosave.mark_pending();
        assert!(autosave.should_save());

        autosave.saved();
        autosave.mark_pending();
        assert!(!autosave.should_save());
    }

    #[test]
    fn test_zero_interval_behaves_like_immediate() {
        let mut autosave = AutoSave::new(SaveMode::Interval { secs: 0 });

        autosave.mark_pending();
        autosave.saved();
        autosave.mark_pending();
        assert!(autosave.should_save());
    }

    #[test]
    fn test_discard_clears_pending() {
        let mut autosave = AutoSave::default();

        autosave.mark_pending();
        autosave.discard();
        assert!(!autosave.should_save());
    }

    #[test]
    fn test_save_mode_serde() {
        let json = serde_json::to_string(&SaveMode::Interval { secs: 5 }).unwrap();
        assert_eq!(json, r#"{"interval":{"secs":5}}"#);

        let mode: SaveMode = serde_json::from_str(r#""manual""#).unwrap();
        assert_eq!(mode, SaveMode::Manual);
    }
}
