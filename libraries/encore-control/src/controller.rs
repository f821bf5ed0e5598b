//! Thread-safe player controller
//!
//! Wraps the engine in the single-writer discipline it requires: one
//! worker thread owns all mutation, fed by a command channel. Callers
//! on any thread send commands; rapid presses serialize through the
//! channel and collapse inside the engine's debounce. Between commands
//! the worker ticks the engine, so track ends advance the queue without
//! any help from the host.

use crate::catalog::CatalogStore;
use crate::command::PlayerCommand;
use crate::error::{ControlError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use encore_playback::{PlayContext, PlaybackError, PlayerEngine, PlayerEvent, Track};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Controller tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// How often the worker ticks the engine between commands
    pub tick_interval: Duration,

    /// Event channel capacity; events beyond it are dropped with a warning
    pub event_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            event_capacity: 64,
        }
    }
}

/// Thread-safe handle to a playback engine
///
/// Commands from any number of threads funnel through one worker; read
/// accessors lock the shared engine directly. Dropping the controller
/// shuts the worker down and joins it.
pub struct PlayerController {
    /// Engine shared with the worker
    engine: Arc<Mutex<PlayerEngine>>,

    /// Command sender
    command_tx: Sender<PlayerCommand>,

    /// Event receiver handed out to subscribers
    event_rx: Receiver<PlayerEvent>,

    /// Worker thread, joined on drop
    worker: Option<JoinHandle<()>>,
}

impl PlayerController {
    /// Spawn the worker thread around an engine
    pub fn spawn(engine: PlayerEngine, config: ControllerConfig) -> Self {
        let engine = Arc::new(Mutex::new(engine));
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = bounded(config.event_capacity);

        let worker_engine = Arc::clone(&engine);
        let tick_interval = config.tick_interval;
        let worker = std::thread::spawn(move || {
            info!("Player worker started");
            worker_loop(&worker_engine, &command_rx, &event_tx, tick_interval);
            info!("Player worker stopped");
        });

        Self {
            engine,
            command_tx,
            event_rx,
            worker: Some(worker),
        }
    }

    /// Send a raw command to the worker
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| ControlError::WorkerGone)
    }

    // ===== Command conveniences =====

    /// Start playback of a track within a context snapshot
    pub fn play(&self, track: Track, snapshot: Vec<Track>) -> Result<()> {
        self.send(PlayerCommand::Play {
            track,
            snapshot,
            preserve_queue: false,
        })
    }

    /// Play a track immediately without touching queues or history
    pub fn play_keeping_queue(&self, track: Track) -> Result<()> {
        self.send(PlayerCommand::Play {
            track,
            snapshot: Vec::new(),
            preserve_queue: true,
        })
    }

    /// Fetch a context's tracks from the catalog, then play
    pub fn play_from_context(
        &self,
        catalog: &dyn CatalogStore,
        track: Track,
        context: &PlayContext,
    ) -> Result<()> {
        let snapshot = catalog.fetch_ordered_tracks(context)?;
        self.play(track, snapshot)
    }

    /// Advance to the next track
    pub fn next(&self) -> Result<()> {
        self.send(PlayerCommand::Next)
    }

    /// Retreat to the previous track
    pub fn previous(&self) -> Result<()> {
        self.send(PlayerCommand::Previous)
    }

    /// Toggle play/pause
    pub fn toggle_pause(&self) -> Result<()> {
        self.send(PlayerCommand::TogglePause)
    }

    /// Seek within the current track
    pub fn seek(&self, position: Duration) -> Result<()> {
        self.send(PlayerCommand::Seek(position))
    }

    /// Queue a track manually
    pub fn add_to_queue(&self, track: Track, play_next: bool) -> Result<()> {
        self.send(PlayerCommand::AddToQueue { track, play_next })
    }

    /// Route a backend load completion into the command stream
    pub fn notify_load_finished(
        &self,
        track_id: String,
        result: std::result::Result<(), PlaybackError>,
    ) -> Result<()> {
        self.send(PlayerCommand::CompleteLoad { track_id, result })
    }

    // ===== Observable state =====

    /// Currently playing (or loading/paused) track
    pub fn current_track(&self) -> Option<Track> {
        self.engine.lock().unwrap().current_track().cloned()
    }

    /// Whether audio is logically playing
    pub fn is_playing(&self) -> bool {
        self.engine.lock().unwrap().is_playing()
    }

    /// Whether shuffle is enabled
    pub fn shuffle_enabled(&self) -> bool {
        self.engine.lock().unwrap().shuffle_enabled()
    }

    /// The queue as the user sees it
    pub fn queue(&self) -> Vec<Track> {
        self.engine.lock().unwrap().queue_view()
    }

    /// Total queued tracks
    pub fn queue_len(&self) -> usize {
        self.engine.lock().unwrap().queue_len()
    }

    /// Previously played tracks, most recent first
    pub fn history(&self) -> Vec<Track> {
        self.engine.lock().unwrap().history()
    }

    /// Receiver for everything the engine emits
    ///
    /// Clone it freely; crossbeam receivers are multi-consumer. A
    /// subscriber that stops draining only costs dropped events, never
    /// a stuck worker.
    pub fn events(&self) -> Receiver<PlayerEvent> {
        self.event_rx.clone()
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.command_tx.send(PlayerCommand::Shutdown).ok();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Player worker panicked during shutdown");
            }
        }
    }
}

// ===== Worker =====

fn worker_loop(
    engine: &Mutex<PlayerEngine>,
    commands: &Receiver<PlayerCommand>,
    events: &Sender<PlayerEvent>,
    tick_interval: Duration,
) {
    loop {
        match commands.recv_timeout(tick_interval) {
            Ok(PlayerCommand::Shutdown) => break,
            Ok(command) => {
                let mut engine = engine.lock().unwrap();
                apply(&mut engine, command);
                forward_events(&mut engine, events);
            }
            Err(RecvTimeoutError::Timeout) => {
                let mut engine = engine.lock().unwrap();
                engine.tick();
                forward_events(&mut engine, events);
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn apply(engine: &mut PlayerEngine, command: PlayerCommand) {
    debug!("Applying {:?}", command);
    match command {
        PlayerCommand::Play {
            track,
            snapshot,
            preserve_queue,
        } => {
            if preserve_queue {
                engine.play_keeping_queue(track);
            } else {
                engine.play(track, snapshot);
            }
        }
        PlayerCommand::Next => engine.next(),
        PlayerCommand::Previous => engine.previous(),
        PlayerCommand::TogglePause => engine.toggle_pause(),
        PlayerCommand::Seek(position) => engine.seek(position),
        PlayerCommand::AddToQueue { track, play_next } => engine.add_to_queue(track, play_next),
        PlayerCommand::PlayFromQueue(index) => engine.play_from_queue(index),
        PlayerCommand::MoveQueueItems {
            from_indices,
            to_index,
        } => engine.move_queue_items(&from_indices, to_index),
        PlayerCommand::RemoveQueueItems(indices) => engine.remove_queue_items(&indices),
        PlayerCommand::ClearQueue => engine.clear_queue(),
        PlayerCommand::ToggleShuffle => engine.toggle_shuffle(),
        PlayerCommand::Reshuffle => engine.reshuffle(),
        PlayerCommand::CompleteLoad { track_id, result } => engine.complete_load(&track_id, result),
        PlayerCommand::Shutdown => {} // Handled by the loop
    }
}

fn forward_events(engine: &mut PlayerEngine, events: &Sender<PlayerEvent>) {
    for event in engine.drain_events() {
        match events.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Event channel full; dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ControllerConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(200));
        assert_eq!(config.event_capacity, 64);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = ControllerConfig {
            tick_interval: Duration::from_millis(50),
            event_capacity: 8,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ControllerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tick_interval, config.tick_interval);
        assert_eq!(back.event_capacity, config.event_capacity);
    }
}
