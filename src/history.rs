//! Recent decisions log
//!
//! Persisted to LocalStorage, keeps the latest wheel results newest first.

use serde::{Deserialize, Serialize};

use crate::wheel::{Candidate, SpinOutcome};

/// Maximum number of decisions to keep
pub const MAX_DECISIONS: usize = 20;

/// One completed spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub candidate_id: String,
    pub label: String,
    /// Ticks the spin took
    pub ticks: u64,
    /// Unix timestamp (ms) when decided
    pub timestamp: f64,
}

/// Decision log, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionHistory {
    pub entries: Vec<Decision>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    MAX_DECISIONS
}

impl Default for DecisionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionHistory {
    /// LocalStorage key (used only in wasm32)
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "rendezvous_wheel_history";

    pub fn new() -> Self {
        Self::with_capacity(MAX_DECISIONS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a finished spin, dropping the oldest entry past capacity
    pub fn record(&mut self, winner: &Candidate, outcome: &SpinOutcome, timestamp: f64) {
        self.entries.insert(
            0,
            Decision {
                candidate_id: winner.id.clone(),
                label: winner.label.clone(),
                ticks: outcome.ticks,
                timestamp,
            },
        );
        self.entries.truncate(self.capacity);
    }

    /// Most recent decision
    pub fn last(&self) -> Option<&Decision> {
        self.entries.first()
    }

    /// How many kept decisions went to `candidate_id`
    pub fn tally(&self, candidate_id: &str) -> usize {
        self.entries
            .iter()
            .filter(|d| d.candidate_id == candidate_id)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(capacity: usize) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut history) = serde_json::from_str::<DecisionHistory>(&json) {
                    history.capacity = capacity.max(1);
                    history.entries.truncate(history.capacity);
                    log::info!("Loaded {} past decisions", history.entries.len());
                    return history;
                }
            }
        }

        log::info!("No decision history found, starting fresh");
        Self::with_capacity(capacity)
    }

    /// Save history to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Decision history saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
