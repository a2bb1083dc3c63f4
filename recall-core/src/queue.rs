//! Fragment queue management.
//!
//! Tracks which memory fragments have been recalled, which are still
//! waiting, and which one the current question targets. The queue also
//! owns the consecutive-miss counter that drives hint and reveal
//! decisions.

use std::collections::VecDeque;
use thiserror::Error;

/// Errors from queue operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("fragment set is empty")]
    EmptyFragmentSet,

    #[error("no fragments remain in the queue")]
    Exhausted,
}

/// Split raw comma-delimited fragment text into fragment entries.
///
/// Pieces are trimmed and empty pieces dropped. Duplicates are kept as
/// distinct queue entries.
pub fn split_fragments(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// The ordered fragment queue for one recall session.
#[derive(Debug, Clone, Default)]
pub struct FragmentQueue {
    all: Vec<String>,
    recalled: Vec<String>,
    remaining: VecDeque<String>,
    current: Option<String>,
    misses: u8,
}

impl FragmentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set up the queue from the full fragment list.
    ///
    /// Copies the list into the waiting queue, clears the recalled set,
    /// pops the first entry as the active target, and resets the miss
    /// counter.
    pub fn initialize(&mut self, fragments: Vec<String>) -> Result<(), QueueError> {
        if fragments.is_empty() {
            return Err(QueueError::EmptyFragmentSet);
        }
        self.all = fragments.clone();
        self.remaining = fragments.into();
        self.recalled.clear();
        self.current = self.remaining.pop_front();
        self.misses = 0;
        Ok(())
    }

    /// Pop the next waiting fragment into the active target slot.
    pub fn advance(&mut self) -> Result<(), QueueError> {
        match self.remaining.pop_front() {
            Some(next) => {
                self.current = Some(next);
                self.misses = 0;
                Ok(())
            }
            None => Err(QueueError::Exhausted),
        }
    }

    /// Mark a fragment as recalled.
    ///
    /// Appends to the recalled sequence if not already present and
    /// removes the first matching entry from the waiting queue.
    /// Idempotent beyond the first call for a given fragment.
    pub fn record_recalled(&mut self, fragment: &str) {
        if !self.recalled.iter().any(|f| f == fragment) {
            self.recalled.push(fragment.to_string());
        }
        if let Some(pos) = self.remaining.iter().position(|f| f == fragment) {
            self.remaining.remove(pos);
        }
    }

    /// True when nothing is waiting and the active target (if any) has
    /// already been recalled.
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
            && self
                .current
                .as_ref()
                .is_none_or(|c| self.recalled.iter().any(|f| f == c))
    }

    /// Fold the analyzer's matches into the queue.
    ///
    /// Returns the fragments newly recalled this turn: the active
    /// target first when matched, then any other match still waiting in
    /// the queue. Matches that are neither are ignored. Progress resets
    /// the consecutive-miss counter; a turn with no progress increments
    /// it.
    pub fn register_matches(&mut self, matches: &[String]) -> Vec<String> {
        let mut newly = Vec::new();

        if let Some(current) = self.current.clone() {
            if matches.iter().any(|m| *m == current) {
                newly.push(current);
            }
        }

        for m in matches {
            if self.remaining.iter().any(|f| f == m) && !newly.contains(m) {
                newly.push(m.clone());
            }
        }

        if newly.is_empty() {
            self.misses += 1;
        } else {
            for fragment in &newly {
                self.record_recalled(fragment);
            }
            self.misses = 0;
        }

        newly
    }

    /// The forbidden word list for question generation: the active
    /// target plus every fragment still waiting in the queue.
    pub fn forbidden_words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.remaining.len() + 1);
        if let Some(ref current) = self.current {
            words.push(current.clone());
        }
        words.extend(self.remaining.iter().cloned());
        words
    }

    /// Fragments not yet recalled, active target first, in queue order.
    pub fn outstanding(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.remaining.len() + 1);
        if let Some(ref current) = self.current {
            if !self.recalled.iter().any(|f| f == current) {
                out.push(current.clone());
            }
        }
        out.extend(self.remaining.iter().cloned());
        out
    }

    pub fn all_fragments(&self) -> &[String] {
        &self.all
    }

    pub fn recalled(&self) -> &[String] {
        &self.recalled
    }

    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_is_recalled(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|c| self.recalled.iter().any(|f| f == c))
    }

    /// Consecutive turns without progress on the active target.
    pub fn misses(&self) -> u8 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_split_fragments() {
        assert_eq!(
            split_fragments("graduation, rain , hall"),
            fragments(&["graduation", "rain", "hall"])
        );
        assert_eq!(split_fragments("  ,  , "), Vec::<String>::new());
        assert_eq!(split_fragments(""), Vec::<String>::new());
        // Duplicates survive as distinct entries.
        assert_eq!(split_fragments("rain, rain"), fragments(&["rain", "rain"]));
    }

    #[test]
    fn test_initialize_partitions_fragments() {
        let mut queue = FragmentQueue::new();
        queue
            .initialize(fragments(&["graduation", "rain", "hall"]))
            .unwrap();

        assert_eq!(queue.current(), Some("graduation"));
        assert_eq!(queue.recalled().len(), 0);
        assert_eq!(queue.remaining_len(), 2);
        assert_eq!(queue.misses(), 0);
        // |all| = |recalled| + |remaining| + 1 for the unrecalled target.
        assert_eq!(
            queue.all_fragments().len(),
            queue.recalled().len() + queue.remaining_len() + 1
        );
    }

    #[test]
    fn test_initialize_empty_fails() {
        let mut queue = FragmentQueue::new();
        assert_eq!(
            queue.initialize(Vec::new()),
            Err(QueueError::EmptyFragmentSet)
        );
    }

    #[test]
    fn test_advance_pops_in_order() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["a", "b", "c"])).unwrap();

        queue.advance().unwrap();
        assert_eq!(queue.current(), Some("b"));
        queue.advance().unwrap();
        assert_eq!(queue.current(), Some("c"));
        assert_eq!(queue.advance(), Err(QueueError::Exhausted));
    }

    #[test]
    fn test_advance_resets_misses() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["a", "b"])).unwrap();
        queue.register_matches(&[]);
        assert_eq!(queue.misses(), 1);

        queue.advance().unwrap();
        assert_eq!(queue.misses(), 0);
    }

    #[test]
    fn test_record_recalled_is_idempotent() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["a", "b"])).unwrap();

        queue.record_recalled("b");
        queue.record_recalled("b");

        assert_eq!(queue.recalled(), fragments(&["b"]).as_slice());
        assert_eq!(queue.remaining_len(), 0);
    }

    #[test]
    fn test_register_matches_target_first() {
        let mut queue = FragmentQueue::new();
        queue
            .initialize(fragments(&["graduation", "rain", "hall"]))
            .unwrap();

        // Both the target and a waiting fragment mentioned in one turn:
        // the target leads the result.
        let newly = queue.register_matches(&fragments(&["rain", "graduation"]));
        assert_eq!(newly, fragments(&["graduation", "rain"]));
        assert_eq!(queue.recalled(), fragments(&["graduation", "rain"]).as_slice());
        assert_eq!(queue.misses(), 0);
    }

    #[test]
    fn test_register_matches_incidental_only() {
        let mut queue = FragmentQueue::new();
        queue
            .initialize(fragments(&["graduation", "rain", "hall"]))
            .unwrap();

        // The target was missed but a waiting fragment was mentioned:
        // still progress, target unchanged.
        let newly = queue.register_matches(&fragments(&["rain"]));
        assert_eq!(newly, fragments(&["rain"]));
        assert_eq!(queue.current(), Some("graduation"));
        assert_eq!(queue.misses(), 0);
    }

    #[test]
    fn test_register_matches_ignores_unknown_and_recalled() {
        let mut queue = FragmentQueue::new();
        queue
            .initialize(fragments(&["graduation", "rain"]))
            .unwrap();
        queue.record_recalled("rain");

        // An already-recalled fragment and a name outside the
        // vocabulary both count as no progress.
        let newly = queue.register_matches(&fragments(&["rain", "sunshine"]));
        assert!(newly.is_empty());
        assert_eq!(queue.misses(), 1);
        assert_eq!(queue.recalled(), fragments(&["rain"]).as_slice());
    }

    #[test]
    fn test_miss_counter_accumulates_and_resets() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["a", "b"])).unwrap();

        queue.register_matches(&[]);
        queue.register_matches(&[]);
        assert_eq!(queue.misses(), 2);

        queue.register_matches(&fragments(&["a"]));
        assert_eq!(queue.misses(), 0);
    }

    #[test]
    fn test_is_complete() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["a", "b"])).unwrap();
        assert!(!queue.is_complete());

        queue.record_recalled("b");
        assert!(!queue.is_complete());

        queue.record_recalled("a");
        assert!(queue.is_complete());
    }

    #[test]
    fn test_forbidden_words_cover_target_and_waiting() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["a", "b", "c"])).unwrap();

        assert_eq!(queue.forbidden_words(), fragments(&["a", "b", "c"]));

        queue.record_recalled("b");
        assert_eq!(queue.forbidden_words(), fragments(&["a", "c"]));
    }

    #[test]
    fn test_outstanding_hides_recalled_target() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["a", "b"])).unwrap();
        assert_eq!(queue.outstanding(), fragments(&["a", "b"]));

        queue.record_recalled("a");
        assert_eq!(queue.outstanding(), fragments(&["b"]));
    }

    #[test]
    fn test_duplicate_fragments_stay_distinct() {
        let mut queue = FragmentQueue::new();
        queue.initialize(fragments(&["rain", "rain"])).unwrap();

        let newly = queue.register_matches(&fragments(&["rain"]));
        assert_eq!(newly, fragments(&["rain"]));
        // The second entry still waits; the recalled sequence stays
        // duplicate-free.
        assert_eq!(queue.remaining_len(), 1);
        assert_eq!(queue.recalled(), fragments(&["rain"]).as_slice());

        queue.advance().unwrap();
        let newly = queue.register_matches(&fragments(&["rain"]));
        assert_eq!(newly, fragments(&["rain"]));
        assert_eq!(queue.recalled(), fragments(&["rain"]).as_slice());
        assert!(queue.is_complete());
    }
}
