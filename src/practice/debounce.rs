use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::practice::drafts::DraftKey;

struct Pending {
    text: String,
    due: Instant,
}

/// Collapses bursts of edits into one save per field. Each key has its own
/// deadline; recording again replaces the pending text and re-arms it, so
/// the save that eventually fires carries the last value written.
pub struct Debouncer {
    delay: Duration,
    pending: BTreeMap<DraftKey, Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, key: DraftKey, text: String, now: Instant) {
        self.pending.insert(
            key,
            Pending {
                text,
                due: now + self.delay,
            },
        );
    }

    /// Remove and return every entry whose delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Vec<(DraftKey, String)> {
        let due: Vec<DraftKey> = self
            .pending
            .iter()
            .filter(|(_, p)| now >= p.due)
            .map(|(k, _)| k.clone())
            .collect();
        due.into_iter()
            .map(|k| {
                let p = self.pending.remove(&k).unwrap();
                (k, p.text)
            })
            .collect()
    }

    /// Drain everything regardless of deadline. Used on shutdown so an exit
    /// inside the delay window still persists the last edits.
    pub fn flush(&mut self) -> Vec<(DraftKey, String)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(k, p)| (k, p.text))
            .collect()
    }

    pub fn discard(&mut self, question: &str) {
        self.pending.retain(|k, _| k.question != question);
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
