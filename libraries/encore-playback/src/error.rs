//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Transport operations themselves never surface these to callers
/// (unmet preconditions degrade to logged no-ops); they exist for the
/// backend seam and the async load lifecycle.
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The backend refused or failed a transport request
    #[error("Backend error: {0}")]
    Backend(String),

    /// An asynchronous track load did not complete
    #[error("Load failed for track {track_id}: {message}")]
    LoadFailed {
        /// Identifier of the track whose load failed
        track_id: String,
        /// Backend-provided failure description
        message: String,
    },

    /// Invalid seek position
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(std::time::Duration),

    /// Index out of bounds for the merged queue view
    #[error("Queue index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
