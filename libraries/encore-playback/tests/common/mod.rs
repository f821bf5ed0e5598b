//! Shared integration test helpers
//!
//! A scripted stand-in for the audio pipeline plus track builders.
//! Tests clone the backend handle before boxing it so they can keep
//! steering position and inspecting calls after the engine takes
//! ownership.
#![allow(dead_code)]

use encore_playback::{PlaybackBackend, PlaybackError, PlayerConfig, PlayerEngine, Result, Track};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct BackendState {
    loaded: Option<String>,
    loads: Vec<String>,
    rate: f32,
    position: Duration,
    duration: Option<Duration>,
    fail_next_load: bool,
}

/// Scripted playback backend
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    state: Arc<Mutex<BackendState>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the playhead, simulating time passing
    pub fn set_position(&self, position: Duration) {
        self.state.lock().unwrap().position = position;
    }

    /// Id of the most recently loaded track
    pub fn loaded_track(&self) -> Option<String> {
        self.state.lock().unwrap().loaded.clone()
    }

    /// Every load the engine requested, in order
    pub fn loads(&self) -> Vec<String> {
        self.state.lock().unwrap().loads.clone()
    }

    /// Make the next load call fail
    pub fn fail_next_load(&self) {
        self.state.lock().unwrap().fail_next_load = true;
    }

    pub fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }
}

impl PlaybackBackend for ScriptedBackend {
    fn load(&mut self, track: &Track) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_next_load {
            state.fail_next_load = false;
            return Err(PlaybackError::LoadFailed {
                track_id: track.id.clone(),
                message: "scripted failure".to_string(),
            });
        }
        state.loads.push(track.id.clone());
        state.loaded = Some(track.id.clone());
        state.position = Duration::ZERO;
        state.duration = Some(track.duration);
        state.rate = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.state.lock().unwrap().rate = 1.0;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.state.lock().unwrap().rate = 0.0;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.state.lock().unwrap().position = position;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn playback_rate(&self) -> f32 {
        self.state.lock().unwrap().rate
    }
}

// ===== Builders =====

pub fn create_track(id: &str, title: &str) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: "Test Artist".to_string(),
        album: Some("Test Album".to_string()),
        duration: Duration::from_secs(180),
    }
}

pub fn snapshot_of(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| create_track(id, "Track")).collect()
}

/// Engine with zero debounce so scripted presses land immediately
pub fn test_engine() -> (PlayerEngine, ScriptedBackend) {
    test_engine_with(PlayerConfig {
        transport_debounce: Duration::ZERO,
        ..PlayerConfig::default()
    })
}

pub fn test_engine_with(config: PlayerConfig) -> (PlayerEngine, ScriptedBackend) {
    let backend = ScriptedBackend::new();
    let engine = PlayerEngine::with_seed(config, Box::new(backend.clone()), 42);
    (engine, backend)
}

/// Report a successful load for the given track
pub fn finish_load(engine: &mut PlayerEngine, id: &str) {
    engine.complete_load(id, Ok(()));
}

pub fn current_id(engine: &PlayerEngine) -> Option<String> {
    engine.current_track().map(|t| t.id.clone())
}

pub fn queue_ids(engine: &PlayerEngine) -> Vec<String> {
    engine.queue_view().iter().map(|t| t.id.clone()).collect()
}

pub fn history_ids(engine: &PlayerEngine) -> Vec<String> {
    engine.history().iter().map(|t| t.id.clone()).collect()
}
