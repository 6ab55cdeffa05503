use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared per-speaker word tally.
///
/// The map is never exposed for mutation: workers go through
/// [`SpeakerAccumulator::add_or_create`], which performs the whole
/// read-modify-write under one lock acquisition.
#[derive(Debug, Default)]
pub struct SpeakerAccumulator {
    tallies: Mutex<HashMap<String, u64>>,
}

impl SpeakerAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `speaker`'s tally, creating it at `amount` if absent.
    pub fn add_or_create(&self, speaker: &str, amount: u64) {
        let mut tallies = self.lock();
        // WHY: only allocate the key the first time a speaker is seen
        match tallies.get_mut(speaker) {
            Some(total) => *total += amount,
            None => {
                tallies.insert(speaker.to_owned(), amount);
            }
        }
    }

    /// Copy of the current tallies.
    ///
    /// Only meaningful once every writer has finished; the orchestrator calls
    /// this after its join barrier.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.lock().clone()
    }

    /// Consume the accumulator and return the tallies without copying.
    pub fn into_tallies(self) -> HashMap<String, u64> {
        self.tallies
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Current tally for one speaker, for inspection in tests and benches
    pub fn get(&self, speaker: &str) -> Option<u64> {
        self.lock().get(speaker).copied()
    }

    /// Number of distinct speakers seen so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A writer that panicked mid-call cannot leave a half-written entry: the
    // map is only touched by single insert/add statements.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.tallies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
