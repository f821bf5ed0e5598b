//! Commands accepted by the player worker

use encore_playback::{PlaybackError, Track};
use std::time::Duration;

/// Commands sent to the player worker thread
///
/// One variant per engine operation, plus `Shutdown`. Everything a host
/// can do to the player travels through this enum, which is what keeps
/// the engine single-writer no matter how many threads hold a handle.
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    /// Start playback of a track within a context snapshot
    Play {
        /// Track to play
        track: Track,
        /// The ordered context the track was chosen from
        snapshot: Vec<Track>,
        /// Keep queues, history, and snapshot instead of rebuilding them
        preserve_queue: bool,
    },

    /// Advance to the next track
    Next,

    /// Retreat to the previous track
    Previous,

    /// Toggle play/pause
    TogglePause,

    /// Seek within the current track
    Seek(Duration),

    /// Queue a track manually
    AddToQueue {
        /// Track to queue
        track: Track,
        /// Front of the manual picks instead of the back
        play_next: bool,
    },

    /// Play a queued track by its merged-view index
    PlayFromQueue(usize),

    /// Move merged-view entries to a new position
    MoveQueueItems {
        /// Indices of the entries to move
        from_indices: Vec<usize>,
        /// Destination index in the view
        to_index: usize,
    },

    /// Remove merged-view entries by index
    RemoveQueueItems(Vec<usize>),

    /// Drop everything queued
    ClearQueue,

    /// Toggle shuffle
    ToggleShuffle,

    /// Enable shuffle and deal a fresh window
    Reshuffle,

    /// A backend load finished
    CompleteLoad {
        /// Track the completion belongs to
        track_id: String,
        /// Load outcome reported by the backend
        result: std::result::Result<(), PlaybackError>,
    },

    /// Stop the worker thread
    Shutdown,
}
