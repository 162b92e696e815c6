//! Observable suggestion set shared between an aggregator and its viewers

use super::models::{SourceRole, SuggestionRecord, SuggestionSet};
use tokio::sync::watch;

/// Current query generation and the records merged for it so far
#[derive(Debug, Clone, Default)]
pub struct LiveState {
    generation: u64,
    suggestions: SuggestionSet,
}

impl LiveState {
    /// Query generation the suggestions belong to
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }
}

/// Live-bound suggestion set.
///
/// Each source merge is published to subscribers as it happens, so a
/// two-source fetch may notify twice before the fetch itself resolves.
#[derive(Debug, Clone)]
pub struct LiveSuggestions {
    tx: std::sync::Arc<watch::Sender<LiveState>>,
}

impl LiveSuggestions {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LiveState::default());
        Self {
            tx: std::sync::Arc::new(tx),
        }
    }

    /// Watch the set for changes
    pub fn subscribe(&self) -> watch::Receiver<LiveState> {
        self.tx.subscribe()
    }

    /// Copy of the current set
    pub fn snapshot(&self) -> SuggestionSet {
        self.tx.borrow().suggestions.clone()
    }

    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().suggestions.is_empty()
    }

    /// Discard the current set and start a new query generation
    pub fn begin(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.suggestions.clear();
            generation = state.generation;
        });
        generation
    }

    /// Replace one source's slot, unless a newer query has started.
    ///
    /// Returns whether the set changed.
    pub fn merge(&self, generation: u64, role: SourceRole, records: Vec<SuggestionRecord>) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.suggestions.replace(role, records);
            true
        })
    }

    /// Clear the set without issuing a query
    pub fn reset(&self) {
        self.begin();
    }
}

impl Default for LiveSuggestions {
    fn default() -> Self {
        Self::new()
    }
}
