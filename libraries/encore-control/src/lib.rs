//! Encore - Player Control
//!
//! Thread-safe command and event layer over the `encore-playback`
//! engine.
//!
//! This crate provides:
//! - A worker thread that owns all engine mutation (single-writer)
//! - A command channel any number of threads can feed
//! - Periodic ticking so finished tracks advance the queue on their own
//! - An event channel fanning engine events out to subscribers
//! - The catalog seam that turns play contexts into snapshots
//!
//! # Architecture
//!
//! The engine itself is a plain single-threaded state machine. The
//! controller gives it the serialization it asks for: every mutating
//! call becomes a [`PlayerCommand`] delivered to one worker thread, so
//! a UI tap racing a track-end poll can never produce a torn state.
//! Reads bypass the channel and lock the shared engine directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_control::{ControllerConfig, PlayerController};
//! use encore_playback::{PlaybackBackend, PlayerConfig, PlayerEngine, Result, Track};
//! use std::time::Duration;
//!
//! struct MyBackend;
//!
//! impl PlaybackBackend for MyBackend {
//!     fn load(&mut self, _track: &Track) -> Result<()> {
//!         // Hand the track to the audio pipeline
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn seek(&mut self, _position: Duration) -> Result<()> {
//!         Ok(())
//!     }
//!     fn position(&self) -> Duration {
//!         Duration::ZERO
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         None
//!     }
//!     fn playback_rate(&self) -> f32 {
//!         0.0
//!     }
//! }
//!
//! let engine = PlayerEngine::new(PlayerConfig::default(), Box::new(MyBackend));
//! let controller = PlayerController::spawn(engine, ControllerConfig::default());
//!
//! let track = Track {
//!     id: "track-1".to_string(),
//!     title: "Opening".to_string(),
//!     artist: "Some Band".to_string(),
//!     album: None,
//!     duration: Duration::from_secs(180),
//! };
//!
//! // Any thread can drive playback
//! controller.play(track.clone(), vec![track]).unwrap();
//!
//! // The pipeline reports load completions back in
//! controller.notify_load_finished("track-1".to_string(), Ok(())).unwrap();
//!
//! // Subscribers watch the event stream
//! let events = controller.events();
//! while let Ok(event) = events.recv() {
//!     println!("{:?}", event);
//! }
//! ```

mod catalog;
mod command;
mod controller;
mod error;

// Public exports
pub use catalog::CatalogStore;
pub use command::PlayerCommand;
pub use controller::{ControllerConfig, PlayerController};
pub use error::{ControlError, Result};
