//! Search-box typeahead: suggestions, synonym-aware results filtering,
//! keyboard cursor state, and keystroke debouncing.
//!
//! Two deliberately different matching paths exist. `suggest` is a plain
//! case-insensitive substring match used for the dropdown while typing.
//! `filter_results` is the search-within-results path: it normalizes
//! punctuation away and expands a fixed restroom synonym vocabulary.

use std::time::{Duration, Instant};

use crate::model::RestroomRecord;

/// Default maximum number of dropdown suggestions.
pub const SUGGESTION_LIMIT: usize = 5;

/// Quiet period a typed query must survive before it is released to run.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(350);

/// Vocabulary expanded by the results filter: a query naming any of these
/// matches records naming any of them.
const SYNONYMS: &[&str] = &[
    "bathroom",
    "restroom",
    "toilet",
    "wc",
    "loo",
    "washroom",
    "lavatory",
    "family restroom",
];

/// Dropdown suggestions for the text typed so far.
///
/// Case-insensitive substring match on name or address, at most `limit`
/// results, candidate order preserved (no distance re-sort). An empty query
/// suppresses suggestions entirely rather than showing everything.
pub fn suggest<'a>(
    candidates: &'a [RestroomRecord],
    query: &str,
    limit: usize,
) -> Vec<&'a RestroomRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query) || c.address.to_lowercase().contains(&query)
        })
        .take(limit)
        .collect()
}

/// Lowercases and strips every character outside `[a-z0-9 ]`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == ' ')
        .collect()
}

/// Free-text filter over an already-fetched result list.
///
/// The query is normalized first. If it mentions any synonym term, the
/// filter matches records mentioning any term of the vocabulary (OR
/// semantics) as well as the literal query; otherwise it falls back to a
/// literal substring match on the normalized text. An empty query leaves
/// the list unfiltered.
pub fn filter_results<'a>(candidates: &'a [RestroomRecord], query: &str) -> Vec<&'a RestroomRecord> {
    let normalized = normalize(query);
    let needle = normalized.trim();
    if needle.is_empty() {
        return candidates.iter().collect();
    }

    let expand = SYNONYMS.iter().any(|term| needle.contains(term));
    candidates
        .iter()
        .filter(|c| {
            let haystack = format!("{} {}", normalize(&c.name), normalize(&c.address));
            if expand {
                haystack.contains(needle) || SYNONYMS.iter().any(|term| haystack.contains(term))
            } else {
                haystack.contains(needle)
            }
        })
        .collect()
}

/// Byte range of the first case-insensitive occurrence of `query` in
/// `text`, for highlighting the matched span in a suggestion row.
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }
    let start = text.to_lowercase().find(&query.to_lowercase())?;
    Some((start, start + query.len()))
}

/// Keys the suggestion dropdown responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// What a key press did to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Dropdown closed or empty; nothing happened.
    Ignored,
    /// Active row moved to this index.
    Moved(usize),
    /// The suggestion at this index was committed; dropdown closed.
    Committed(usize),
    /// Dropdown closed without committing.
    Closed,
}

/// Keyboard navigation state for the suggestion dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionCursor {
    active_index: usize,
    is_open: bool,
}

impl SuggestionCursor {
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Called on every input change: opens while there is text and resets
    /// the active row to the top.
    pub fn reopen(&mut self, has_text: bool) {
        self.is_open = has_text;
        self.active_index = 0;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Routes a key press. `count` is the current suggestion count; arrows
    /// wrap around in both directions.
    pub fn handle_key(&mut self, key: Key, count: usize) -> KeyOutcome {
        if !self.is_open || count == 0 {
            return KeyOutcome::Ignored;
        }
        // The list may have shrunk since the last move.
        self.active_index = self.active_index.min(count - 1);
        match key {
            Key::ArrowDown => {
                self.active_index = (self.active_index + 1) % count;
                KeyOutcome::Moved(self.active_index)
            }
            Key::ArrowUp => {
                self.active_index = (self.active_index + count - 1) % count;
                KeyOutcome::Moved(self.active_index)
            }
            Key::Enter => {
                let committed = self.active_index;
                self.is_open = false;
                KeyOutcome::Committed(committed)
            }
            Key::Escape => {
                self.is_open = false;
                KeyOutcome::Closed
            }
        }
    }
}

/// Coalesces keystroke bursts: only the newest input, once `quiet` has
/// elapsed without further typing, is released by `poll`.
///
/// Every input bumps a generation, cancelling whatever was pending. An
/// async match started for an older generation must be discarded by its
/// caller via [`DebouncedQuery::is_current`], so a superseded query's
/// results never apply after a newer one has started.
#[derive(Debug, Clone)]
pub struct DebouncedQuery {
    quiet: Duration,
    generation: u64,
    pending: Option<(String, Instant)>,
}

impl DebouncedQuery {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: 0,
            pending: None,
        }
    }

    /// Records a keystroke's resulting text. Returns the new generation.
    pub fn input(&mut self, text: &str, now: Instant) -> u64 {
        self.generation += 1;
        self.pending = Some((text.to_string(), now));
        self.generation
    }

    /// Releases the pending query once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<(String, u64)> {
        match &self.pending {
            Some((_, since)) if now.duration_since(*since) >= self.quiet => {
                let (text, _) = self.pending.take()?;
                Some((text, self.generation))
            }
            _ => None,
        }
    }

    /// True while `generation` is still the newest one.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

impl Default for DebouncedQuery {
    fn default() -> Self {
        Self::new(DEBOUNCE_QUIET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Times Square McDonald's!"), "times square mcdonalds");
        assert_eq!(normalize("42nd St & 5th Ave"), "42nd st  5th ave");
    }

    #[test]
    fn normalize_keeps_digits_and_spaces() {
        assert_eq!(normalize("WC #2"), "wc 2");
    }
}
