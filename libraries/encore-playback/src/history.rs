//! Playback history tracking
//!
//! Maintains a bounded stack of played tracks for "previous" navigation.
//! Most recent entry sits at the front, matching how history is shown
//! and how shuffle retreats consume it.

use crate::types::Track;
use std::collections::VecDeque;

/// Playback history with bounded size
///
/// Grows on every forward transition and shrinks on previous. When
/// full, the oldest entry (back) is discarded.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// Maximum history size
    limit: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(limit: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Record a played track as the most recent entry
    ///
    /// If history is full, the oldest entry is discarded
    pub fn push(&mut self, track: Track) {
        if self.limit == 0 {
            return;
        }
        if self.tracks.len() >= self.limit {
            self.tracks.pop_back(); // Remove oldest
        }
        self.tracks.push_front(track);
    }

    /// Get most recent track (without removing)
    #[allow(dead_code)]
    pub fn peek(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// Pop most recent track from history
    ///
    /// Returns the track for "previous" navigation
    pub fn pop(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Get all history tracks (most recent first)
    pub fn get_all(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    /// Replace the whole history, most recent first, respecting the cap
    ///
    /// Used when a fresh context is played from partway in: everything
    /// before the tapped track becomes synthetic history.
    pub fn replace(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.clear();
        for track in tracks {
            self.push(track);
        }
    }

    /// Get number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Get maximum history size
    #[allow(dead_code)]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50) // Default: 50 tracks
    }
}
