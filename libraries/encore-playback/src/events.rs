//! Playback Events
//!
//! Event-based communication for UI synchronization. The engine buffers
//! events as operations run; hosts drain them after each call (or let a
//! controller forward them over a channel). Events are emitted at key
//! points:
//! - Track changes (advance, retreat, jump, direct play)
//! - Play/pause state changes
//! - Queue edits (add/move/remove/clear and window refills)
//! - Shuffle toggles
//! - Asynchronous load failures

use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The current track changed
    TrackChanged {
        /// ID of the new current track, if any
        track_id: Option<String>,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Play/pause state changed
    StateChanged {
        /// Whether audio is now playing
        playing: bool,
    },

    /// Queue changed (tracks added/removed/reordered/refilled)
    QueueChanged {
        /// New merged queue length
        length: usize,
    },

    /// Shuffle was toggled
    ShuffleChanged {
        /// Whether shuffle is now enabled
        enabled: bool,
    },

    /// An asynchronous track load failed
    ///
    /// The track stays current so the UI can show what was attempted;
    /// playback is simply not running.
    LoadFailed {
        /// ID of the track whose load failed
        track_id: String,
        /// Backend-provided failure description
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_round_trip_through_serde() {
        let event = PlayerEvent::TrackChanged {
            track_id: Some("t2".to_string()),
            previous_track_id: Some("t1".to_string()),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PlayerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn load_failed_carries_message() {
        let event = PlayerEvent::LoadFailed {
            track_id: "t9".to_string(),
            message: "unsupported codec".to_string(),
        };
        match event {
            PlayerEvent::LoadFailed { track_id, message } => {
                assert_eq!(track_id, "t9");
                assert_eq!(message, "unsupported codec");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
