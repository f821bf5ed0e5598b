//! Two-segment play queue
//!
//! Implements the Spotify-style split between user picks and context
//! lookahead:
//! - Manual queue: tracks the user explicitly queued, always consumed first
//! - Contextual queue: a bounded lookahead window over the active
//!   snapshot (or the shuffle permutation)
//!
//! ```text
//! Currently Playing: Track A
//! ─────────────────────────────
//! Manual queue (play next):
//!   - Track B (user added)
//!   - Track C (user added)
//! ─────────────────────────────
//! Contextual queue (from album/playlist):
//!   - Track D
//!   - Track E
//!   - Track F
//! ```
//!
//! User-facing indices (jump, move, remove) address the merged view,
//! manual entries first. Edits rebuild the merged view and re-split it,
//! so a drag in the UI can change which segment an entry belongs to.

use crate::types::Track;
use std::collections::{HashSet, VecDeque};

/// Two-segment queue addressed through its merged view
///
/// Invariants upheld here:
/// - the contextual segment never exceeds the lookahead limit
/// - the contextual segment never holds two entries with the same id
/// - callers keep the current track's id out of the contextual segment
///   (enforced on every rebuild that could cross the split)
#[derive(Debug, Clone)]
pub struct PlayQueue {
    /// Tracks explicitly queued by the user (play next)
    manual: VecDeque<Track>,

    /// Lookahead window over the active context
    contextual: VecDeque<Track>,

    /// Hard cap on the contextual segment
    lookahead_limit: usize,
}

impl PlayQueue {
    /// Create a new empty queue with the given lookahead cap
    pub fn new(lookahead_limit: usize) -> Self {
        Self {
            manual: VecDeque::new(),
            contextual: VecDeque::new(),
            lookahead_limit,
        }
    }

    // ===== Manual segment =====

    /// Queue a track to play immediately next
    pub fn add_next(&mut self, track: Track) {
        self.manual.push_front(track);
    }

    /// Queue a track after all existing manual picks
    pub fn add_last(&mut self, track: Track) {
        self.manual.push_back(track);
    }

    /// Take the next manual pick, if any
    pub fn pop_manual(&mut self) -> Option<Track> {
        self.manual.pop_front()
    }

    // ===== Contextual segment =====

    /// Take the next contextual track, if any
    pub fn pop_contextual(&mut self) -> Option<Track> {
        self.contextual.pop_front()
    }

    /// Replace the contextual window
    ///
    /// Deduplicates by id (first occurrence wins) and stops at the
    /// lookahead cap. Callers filter out the current track before
    /// handing tracks in.
    pub fn set_contextual(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.contextual.clear();
        let mut seen: HashSet<String> = HashSet::new();
        for track in tracks {
            if self.contextual.len() >= self.lookahead_limit {
                break;
            }
            if seen.insert(track.id.clone()) {
                self.contextual.push_back(track);
            }
        }
    }

    /// Return a track to the front of the window (previous under shuffle)
    ///
    /// Any deeper entry with the same id is dropped first; the window is
    /// trimmed back to the cap afterwards.
    pub fn push_contextual_front(&mut self, track: Track) {
        self.contextual.retain(|t| t.id != track.id);
        self.contextual.push_front(track);
        self.contextual.truncate(self.lookahead_limit);
    }

    /// Slide the sequential window forward by one snapshot successor
    ///
    /// Appends the snapshot track that follows the window's last entry.
    /// Nothing happens when the window is empty (end of context), full,
    /// the last entry is no longer in the snapshot, the successor does
    /// not exist, or it is already queued or currently playing.
    pub fn refill_one(&mut self, snapshot: &[Track], current_id: Option<&str>) -> bool {
        if self.contextual.is_empty() || self.contextual.len() >= self.lookahead_limit {
            return false;
        }
        let last_id = match self.contextual.back() {
            Some(track) => track.id.clone(),
            None => return false,
        };
        let anchor = match snapshot.iter().position(|t| t.id == last_id) {
            Some(pos) => pos,
            None => return false,
        };
        let candidate = match snapshot.get(anchor + 1) {
            Some(track) => track,
            None => return false,
        };
        if current_id == Some(candidate.id.as_str()) {
            return false;
        }
        if self.contextual.iter().any(|t| t.id == candidate.id) {
            return false;
        }
        self.contextual.push_back(candidate.clone());
        true
    }

    /// Drop every contextual entry with the given id
    ///
    /// Called when a track becomes current so the window never shows
    /// what is already playing.
    pub fn drop_contextual_id(&mut self, id: &str) {
        self.contextual.retain(|t| t.id != id);
    }

    // ===== Merged view =====

    /// All queued tracks in play order: manual picks, then the window
    pub fn merged(&self) -> Vec<&Track> {
        self.manual.iter().chain(self.contextual.iter()).collect()
    }

    /// Resolve a merged-view index for direct playback
    ///
    /// A manual hit drops the skipped manual picks and clears the
    /// window; a contextual hit drops the skipped window entries and
    /// clears the manual picks. Returns the target, or `None` when the
    /// index is out of range (queue untouched).
    pub fn jump_to(&mut self, index: usize) -> Option<Track> {
        let manual_len = self.manual.len();
        if index < manual_len {
            self.manual.drain(..index);
            let target = self.manual.pop_front();
            self.contextual.clear();
            target
        } else {
            let offset = index - manual_len;
            if offset >= self.contextual.len() {
                return None;
            }
            self.contextual.drain(..offset);
            let target = self.contextual.pop_front();
            self.manual.clear();
            target
        }
    }

    /// Move a block of merged-view entries to a new position
    ///
    /// `from_indices` may be unsorted and may contain duplicates or
    /// out-of-range entries; the moved block keeps its relative order.
    /// The rebuilt view is deduplicated by id (first occurrence wins)
    /// and re-split: destination 0 makes the moved block manual,
    /// any other destination keeps the split at the previous manual
    /// length. Returns false when nothing valid was selected.
    pub fn move_items(
        &mut self,
        from_indices: &[usize],
        to_index: usize,
        current_id: Option<&str>,
    ) -> bool {
        let merged_len = self.len();
        let manual_len = self.manual.len();

        let mut sources: Vec<usize> = from_indices
            .iter()
            .copied()
            .filter(|&i| i < merged_len)
            .collect();
        sources.sort_unstable();
        sources.dedup();
        if sources.is_empty() {
            return false;
        }

        let mut merged: Vec<Track> = self
            .manual
            .drain(..)
            .chain(self.contextual.drain(..))
            .collect();

        // Extract the block back-to-front so earlier indices stay valid
        let mut block = Vec::with_capacity(sources.len());
        for &i in sources.iter().rev() {
            block.push(merged.remove(i));
        }
        block.reverse();

        let block_ids: HashSet<&str> = block.iter().map(|t| t.id.as_str()).collect();
        let block_width = block_ids.len();

        let dest = to_index.min(merged.len());
        let tail = merged.split_off(dest);
        merged.extend(block);
        merged.extend(tail);

        let mut seen: HashSet<String> = HashSet::new();
        merged.retain(|t| seen.insert(t.id.clone()));

        // Destination 0 means "play these next": the block becomes the
        // manual segment. Anywhere else the old split position holds.
        let split = if to_index == 0 {
            block_width.min(merged.len())
        } else {
            manual_len.min(merged.len())
        };

        let contextual_part = merged.split_off(split);
        self.manual = VecDeque::from(merged);
        self.contextual = VecDeque::from(contextual_part);
        if let Some(id) = current_id {
            self.contextual.retain(|t| t.id != id);
        }
        self.contextual.truncate(self.lookahead_limit);
        true
    }

    /// Remove merged-view entries by index
    ///
    /// Out-of-range indices are ignored. Returns false when nothing was
    /// removed.
    pub fn remove_items(&mut self, indices: &[usize]) -> bool {
        let merged_len = self.len();
        let manual_len = self.manual.len();

        let mut targets: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < merged_len)
            .collect();
        targets.sort_unstable();
        targets.dedup();
        if targets.is_empty() {
            return false;
        }

        for &i in targets.iter().rev() {
            if i < manual_len {
                self.manual.remove(i);
            } else {
                self.contextual.remove(i - manual_len);
            }
        }
        true
    }

    // ===== Inspection =====

    /// Manual picks in play order
    pub fn manual_tracks(&self) -> Vec<&Track> {
        self.manual.iter().collect()
    }

    /// Window contents in play order
    pub fn contextual_tracks(&self) -> Vec<&Track> {
        self.contextual.iter().collect()
    }

    /// Number of manual picks
    #[allow(dead_code)]
    pub fn manual_len(&self) -> usize {
        self.manual.len()
    }

    /// Number of window entries
    #[allow(dead_code)]
    pub fn contextual_len(&self) -> usize {
        self.contextual.len()
    }

    /// Total number of queued tracks across both segments
    pub fn len(&self) -> usize {
        self.manual.len() + self.contextual.len()
    }

    /// Check whether both segments are empty
    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.contextual.is_empty()
    }

    /// Empty both segments
    pub fn clear(&mut self) {
        self.manual.clear();
        self.contextual.clear();
    }

    /// Empty only the contextual window
    pub fn clear_contextual(&mut self) {
        self.contextual.clear();
    }
}
