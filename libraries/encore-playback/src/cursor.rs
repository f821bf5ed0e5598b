//! Playback cursor
//!
//! Owns the backend handle, the in-flight load slot, and the cached
//! play/pause flag. Loads are asynchronous and at most one is current
//! at a time: every completion names the track it belongs to, and
//! completions for superseded loads are dropped here so a slow load can
//! never clobber a newer one.

use crate::backend::PlaybackBackend;
use crate::error::{PlaybackError, Result};
use crate::types::Track;
use std::time::Duration;
use tracing::debug;

/// What a reported load completion amounted to
#[derive(Debug)]
pub enum LoadCompletion {
    /// The load matched the in-flight slot and playback started
    Started,
    /// The load matched but failed (or the backend refused to start)
    Failed(PlaybackError),
    /// The completion was for a superseded load and was ignored
    Stale,
}

/// Transport state around the current track
pub struct PlaybackCursor {
    /// The platform audio pipeline
    backend: Box<dyn PlaybackBackend>,

    /// Track id whose load is in flight, if any
    pending_load: Option<String>,

    /// Cached play state for display; the backend rate is ground truth
    /// wherever a decision depends on it
    playing: bool,
}

impl PlaybackCursor {
    /// Create a cursor driving the given backend
    pub fn new(backend: Box<dyn PlaybackBackend>) -> Self {
        Self {
            backend,
            pending_load: None,
            playing: false,
        }
    }

    /// Begin loading a track, superseding any in-flight load
    ///
    /// Playback is considered stopped until the completion arrives.
    pub fn begin_load(&mut self, track: &Track) -> Result<()> {
        self.playing = false;
        self.pending_load = Some(track.id.clone());
        if let Err(err) = self.backend.load(track) {
            self.pending_load = None;
            return Err(err);
        }
        Ok(())
    }

    /// Report a load completion
    ///
    /// Ignored unless the id matches the in-flight slot. A matching
    /// success starts backend playback; a matching failure leaves the
    /// transport stopped.
    pub fn finish_load(&mut self, track_id: &str, result: Result<()>) -> LoadCompletion {
        match self.pending_load.as_deref() {
            Some(pending) if pending == track_id => {}
            _ => {
                debug!("Ignoring stale load completion for track {}", track_id);
                return LoadCompletion::Stale;
            }
        }
        self.pending_load = None;

        match result {
            Ok(()) => match self.backend.play() {
                Ok(()) => {
                    self.playing = true;
                    LoadCompletion::Started
                }
                Err(err) => {
                    self.playing = false;
                    LoadCompletion::Failed(err)
                }
            },
            Err(err) => {
                self.playing = false;
                LoadCompletion::Failed(err)
            }
        }
    }

    /// Toggle play/pause against what the backend is actually doing
    ///
    /// The reported playback rate decides the direction, so a pipeline
    /// that paused itself (device loss, interruption) resumes instead of
    /// pausing a second time. Returns the resulting playing state.
    pub fn toggle_pause(&mut self) -> Result<bool> {
        if self.backend.playback_rate() > 0.0 {
            self.backend.pause()?;
            self.playing = false;
            Ok(false)
        } else {
            self.backend.play()?;
            self.playing = true;
            Ok(true)
        }
    }

    /// Seek within the loaded track
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        self.backend.seek(position)
    }

    /// Seek back to the start of the loaded track
    pub fn restart(&mut self) -> Result<()> {
        self.backend.seek(Duration::ZERO)
    }

    /// Stop the transport and drop any in-flight load
    pub fn halt(&mut self) {
        self.pending_load = None;
        if self.backend.playback_rate() > 0.0 {
            if let Err(err) = self.backend.pause() {
                debug!("Backend pause failed while stopping: {}", err);
            }
        }
        self.playing = false;
    }

    /// Current position within the loaded track
    pub fn position(&self) -> Duration {
        self.backend.position()
    }

    /// Duration of the loaded track, once the backend knows it
    pub fn duration(&self) -> Option<Duration> {
        self.backend.duration()
    }

    /// Cached play state (display only)
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether a load is still in flight
    pub fn load_in_flight(&self) -> bool {
        self.pending_load.is_some()
    }
}
