//! Encore - Playback Engine
//!
//! Platform-agnostic playback state machine for Encore.
//!
//! This crate provides:
//! - Two-tier queue (manual picks ahead of a contextual lookahead window)
//! - Context snapshots with sequential wrap-around at the end
//! - Playback history (most recent first, capped)
//! - Shuffle cycles that avoid repeats until the whole context has played
//! - Debounced transport controls and track-end detection
//! - Asynchronous track loading with stale-completion protection
//!
//! # Architecture
//!
//! `encore-playback` owns no audio and spawns no threads:
//! - No decoding, no device output, no clock of its own
//! - The audio pipeline is plugged in through the [`PlaybackBackend`] trait
//! - Hosts drive [`PlayerEngine::tick`] periodically and drain events after
//!   each operation
//!
//! Thread-safe command handling lives one layer up, in `encore-control`.
//!
//! # Example: Driving the engine
//!
//! ```rust
//! use encore_playback::{PlaybackBackend, PlayerConfig, PlayerEngine, Result, Track};
//! use std::time::Duration;
//!
//! // Implement PlaybackBackend for your audio pipeline
//! struct SilentBackend {
//!     position: Duration,
//!     duration: Option<Duration>,
//!     rate: f32,
//! }
//!
//! impl PlaybackBackend for SilentBackend {
//!     fn load(&mut self, track: &Track) -> Result<()> {
//!         self.duration = Some(track.duration);
//!         self.position = Duration::ZERO;
//!         self.rate = 0.0;
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<()> {
//!         self.rate = 1.0;
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) -> Result<()> {
//!         self.rate = 0.0;
//!         Ok(())
//!     }
//!
//!     fn seek(&mut self, position: Duration) -> Result<()> {
//!         self.position = position;
//!         Ok(())
//!     }
//!
//!     fn position(&self) -> Duration {
//!         self.position
//!     }
//!
//!     fn duration(&self) -> Option<Duration> {
//!         self.duration
//!     }
//!
//!     fn playback_rate(&self) -> f32 {
//!         self.rate
//!     }
//! }
//!
//! let backend = SilentBackend {
//!     position: Duration::ZERO,
//!     duration: None,
//!     rate: 0.0,
//! };
//! let mut engine = PlayerEngine::new(PlayerConfig::default(), Box::new(backend));
//!
//! let track = Track {
//!     id: "track-1".to_string(),
//!     title: "Opening".to_string(),
//!     artist: "Some Band".to_string(),
//!     album: Some("First Light".to_string()),
//!     duration: Duration::from_secs(180),
//! };
//!
//! // Play the track within its one-track album
//! let snapshot = vec![track.clone()];
//! engine.play(track, snapshot);
//!
//! // The host reports when the pipeline finished loading
//! engine.complete_load("track-1", Ok(()));
//! assert!(engine.is_playing());
//!
//! // Events describe everything that happened
//! for event in engine.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```
//!
//! # Example: Custom limits
//!
//! ```rust
//! use encore_playback::PlayerConfig;
//! use std::time::Duration;
//!
//! let config = PlayerConfig {
//!     history_limit: 25,
//!     lookahead_limit: 40,
//!     ..PlayerConfig::default()
//! };
//!
//! assert_eq!(config.transport_debounce, Duration::from_millis(300));
//! ```

mod backend;
mod cursor;
mod engine;
mod error;
mod events;
mod history;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use backend::PlaybackBackend;
pub use engine::PlayerEngine;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use types::{PlayContext, PlayerConfig, Track};
