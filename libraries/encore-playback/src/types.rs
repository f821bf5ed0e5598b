//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Track information for queue management
///
/// Display metadata plus the stable identifier every queue structure
/// keys on. Loading and decoding are the backend's concern; nothing in
/// here touches the filesystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique, stable track identifier from the catalog
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Track duration as reported by the catalog
    pub duration: Duration,
}

/// The ordered collection a playback snapshot was captured from
///
/// Carried alongside Play requests so hosts can refetch or label the
/// active context. The engine itself only ever sees the materialized
/// track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayContext {
    /// The whole library in its current sort order
    Library,

    /// A single album
    Album { id: String, name: String },

    /// A playlist
    Playlist { id: String, name: String },

    /// A filesystem folder view
    Folder { path: String },
}

/// Configuration for the playback engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Maximum history size (default: 50)
    pub history_limit: usize,

    /// Maximum contextual lookahead window (default: 100)
    pub lookahead_limit: usize,

    /// Window within which repeated next/previous presses collapse
    /// into one (default: 300ms)
    pub transport_debounce: Duration,

    /// How far into a track a previous press restarts it instead of
    /// stepping back (default: 3s)
    pub previous_restart_threshold: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            lookahead_limit: 100,
            transport_debounce: Duration::from_millis(300),
            previous_restart_threshold: Duration::from_secs(3),
        }
    }
}
