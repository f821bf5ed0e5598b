//! Playback engine
//!
//! The single-threaded state machine behind the player: current track,
//! manual and contextual queues, history, shuffle cycle, and the
//! transport operations that tie them together. Hosts that need thread
//! safety wrap the engine in a controller that serializes every call.
//!
//! Failure philosophy: user-facing operations never return errors. An
//! operation whose preconditions do not hold (empty queue, bad index,
//! missing track) logs and leaves state untouched, and backend refusals
//! degrade to "not playing" rather than unwinding into the caller.

use crate::backend::PlaybackBackend;
use crate::cursor::{LoadCompletion, PlaybackCursor};
use crate::events::PlayerEvent;
use crate::history::History;
use crate::queue::PlayQueue;
use crate::shuffle::ShuffleCycle;
use crate::types::{PlayerConfig, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// The playback state machine
///
/// One instance per player. All mutation happens through `&mut self`;
/// events accumulate internally and are handed out via
/// [`drain_events`](Self::drain_events).
pub struct PlayerEngine {
    /// Transport state around the current track
    cursor: PlaybackCursor,

    /// The ordered context being played (album, playlist, library view)
    snapshot: Vec<Track>,

    /// Queued tracks: manual picks then the contextual window
    queue: PlayQueue,

    /// Previously played tracks, most recent first
    history: History,

    /// Shuffle cycle memory
    cycle: ShuffleCycle,

    /// Whether shuffle is enabled
    shuffle_on: bool,

    /// Currently playing (or loading/paused) track
    current: Option<Track>,

    /// Last accepted next press, for debouncing
    last_next: Option<Instant>,

    /// Last accepted previous press, for debouncing
    last_previous: Option<Instant>,

    /// Shuffle randomness
    rng: StdRng,

    /// Events waiting to be drained by the host
    pending_events: Vec<PlayerEvent>,

    /// Limits and debounce windows
    config: PlayerConfig,
}

impl PlayerEngine {
    /// Create an engine with entropy-seeded shuffle
    pub fn new(config: PlayerConfig, backend: Box<dyn PlaybackBackend>) -> Self {
        Self::build(config, backend, StdRng::from_entropy())
    }

    /// Create an engine whose shuffle order is deterministic
    ///
    /// Reselection depends only on the seed and the operation sequence,
    /// which is what reproducible shuffle tests need.
    pub fn with_seed(config: PlayerConfig, backend: Box<dyn PlaybackBackend>, seed: u64) -> Self {
        Self::build(config, backend, StdRng::seed_from_u64(seed))
    }

    fn build(config: PlayerConfig, backend: Box<dyn PlaybackBackend>, rng: StdRng) -> Self {
        Self {
            cursor: PlaybackCursor::new(backend),
            snapshot: Vec::new(),
            queue: PlayQueue::new(config.lookahead_limit),
            history: History::new(config.history_limit),
            cycle: ShuffleCycle::new(),
            shuffle_on: false,
            current: None,
            last_next: None,
            last_previous: None,
            rng,
            pending_events: Vec::new(),
            config,
        }
    }

    // ===== Direct playback =====

    /// Start playing a track from a freshly captured context snapshot
    ///
    /// Replaces the snapshot wholesale, rebuilds history as everything
    /// before the track (most recent first, capped) and the lookahead
    /// window as everything after it. Manual picks survive. A track
    /// missing from its own snapshot gets empty history and window
    /// instead of a crash.
    pub fn play(&mut self, track: Track, snapshot: Vec<Track>) {
        self.snapshot = snapshot;

        match self.snapshot.iter().position(|t| t.id == track.id) {
            Some(index) => {
                self.history.replace(self.snapshot[..index].iter().cloned());
                let window: Vec<Track> = self.snapshot[index + 1..].to_vec();
                self.queue.set_contextual(window);
            }
            None => {
                warn!(
                    "Track {} missing from its own snapshot; starting with empty history and window",
                    track.id
                );
                self.history.clear();
                self.queue.clear_contextual();
            }
        }

        self.start_track(track);
        self.emit_queue_changed();
    }

    /// Play a track immediately while keeping snapshot, queues, history
    ///
    /// The jump counts as a forward transition: the displaced current
    /// track lands in history (and in the cycle memory under shuffle).
    pub fn play_keeping_queue(&mut self, track: Track) {
        self.record_forward_transition();
        self.start_track(track);
    }

    // ===== Transport =====

    /// Advance to the next track
    ///
    /// Debounced: presses within the configured window of the last
    /// accepted press are dropped. Manual picks play before the window;
    /// an exhausted queue wraps to the top of the snapshot (sequential)
    /// or deals a fresh cycle window (shuffle).
    pub fn next(&mut self) {
        if Self::debounced(&mut self.last_next, self.config.transport_debounce) {
            debug!("Next press debounced");
            return;
        }
        self.advance();
    }

    /// Retreat to the previous track
    ///
    /// Debounced like next. Beyond the restart threshold the press
    /// restarts the current track instead of retreating. Under shuffle
    /// the retreat walks real play history; sequentially it steps back
    /// through the snapshot, rebuilding the window from the old spot.
    pub fn previous(&mut self) {
        if self.current.is_none() {
            debug!("Previous pressed with nothing current");
            return;
        }
        if Self::debounced(&mut self.last_previous, self.config.transport_debounce) {
            debug!("Previous press debounced");
            return;
        }

        if self.cursor.position() > self.config.previous_restart_threshold {
            self.restart_current();
            return;
        }

        if self.shuffle_on {
            self.previous_in_shuffle();
        } else {
            self.previous_in_snapshot();
        }
    }

    /// Toggle play/pause
    ///
    /// No-op without a current track or while a load is in flight. The
    /// backend's reported rate decides the direction.
    pub fn toggle_pause(&mut self) {
        if self.current.is_none() {
            debug!("Toggle pause with nothing current");
            return;
        }
        if self.cursor.load_in_flight() {
            debug!("Toggle pause while loading; ignored");
            return;
        }
        match self.cursor.toggle_pause() {
            Ok(playing) => self.emit_state_changed(playing),
            Err(err) => debug!("Toggle pause failed: {}", err),
        }
    }

    /// Seek within the current track
    pub fn seek(&mut self, position: Duration) {
        if self.current.is_none() {
            debug!("Seek with nothing current");
            return;
        }
        if let Err(err) = self.cursor.seek(position) {
            debug!("Seek to {:?} failed: {}", position, err);
        }
    }

    // ===== Queue management =====

    /// Queue a track manually
    ///
    /// `play_next` puts it ahead of the existing manual picks, otherwise
    /// behind them. With nothing currently playing the track is promoted
    /// straight to current instead of waiting in the queue.
    pub fn add_to_queue(&mut self, track: Track, play_next: bool) {
        if self.current.is_none() {
            self.start_track(track);
            return;
        }
        if play_next {
            self.queue.add_next(track);
        } else {
            self.queue.add_last(track);
        }
        self.emit_queue_changed();
    }

    /// Play a queued track by its merged-view index
    ///
    /// Skipped-over entries in the same segment are dropped and the
    /// other segment is cleared; everything else (snapshot, history,
    /// shuffle cycle) carries on. Out-of-range indices do nothing.
    pub fn play_from_queue(&mut self, index: usize) {
        match self.queue.jump_to(index) {
            Some(target) => {
                self.record_forward_transition();
                self.start_track(target);
                self.emit_queue_changed();
            }
            None => debug!("Play from queue index {} out of range", index),
        }
    }

    /// Move a block of merged-view entries to a new position
    ///
    /// Destination 0 turns the moved block into manual picks; any other
    /// destination keeps the split where it was.
    pub fn move_queue_items(&mut self, from_indices: &[usize], to_index: usize) {
        let current_id = self.current.as_ref().map(|t| t.id.clone());
        if self
            .queue
            .move_items(from_indices, to_index, current_id.as_deref())
        {
            self.emit_queue_changed();
        } else {
            debug!("Queue move with no valid sources");
        }
    }

    /// Remove merged-view entries by index
    pub fn remove_queue_items(&mut self, indices: &[usize]) {
        if self.queue.remove_items(indices) {
            self.emit_queue_changed();
        } else {
            debug!("Queue remove with no valid indices");
        }
    }

    /// Drop everything queued, manual picks included
    pub fn clear_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.queue.clear();
        self.emit_queue_changed();
    }

    // ===== Shuffle =====

    /// Toggle shuffle
    ///
    /// Turning it on deals a randomized window from the not-yet-played
    /// pool; turning it off forgets the cycle and restores the
    /// sequential window right after the current track's snapshot spot.
    pub fn toggle_shuffle(&mut self) {
        if self.shuffle_on {
            self.shuffle_on = false;
            self.cycle.clear();
            self.restore_sequential_window();
        } else {
            self.shuffle_on = true;
            self.reselect_window();
        }
        self.emit_shuffle_changed();
        self.emit_queue_changed();
    }

    /// Enable shuffle (if off) and deal a fresh window either way
    ///
    /// A mid-cycle reshuffle keeps the cycle memory: tracks that already
    /// played stay out of the window until the cycle exhausts.
    pub fn reshuffle(&mut self) {
        let was_on = self.shuffle_on;
        self.shuffle_on = true;
        self.reselect_window();
        if !was_on {
            self.emit_shuffle_changed();
        }
        self.emit_queue_changed();
    }

    // ===== Load lifecycle =====

    /// Report the outcome of an asynchronous track load
    ///
    /// Completions name the track they belong to; anything that does
    /// not match the in-flight load was superseded and is dropped.
    /// Success starts playback; failure keeps the track current but
    /// leaves the transport stopped.
    pub fn complete_load(&mut self, track_id: &str, result: crate::error::Result<()>) {
        match self.cursor.finish_load(track_id, result) {
            LoadCompletion::Started => self.emit_state_changed(true),
            LoadCompletion::Failed(err) => {
                warn!("Load failed for track {}: {}", track_id, err);
                self.emit_load_failed(track_id.to_string(), err.to_string());
                self.emit_state_changed(false);
            }
            LoadCompletion::Stale => {}
        }
    }

    /// Detect a finished track and advance
    ///
    /// Hosts call this periodically. A track counts as finished when
    /// playback is logically running, no load is in flight, and the
    /// backend position has reached its reported duration. The advance
    /// funnels through the same debounce as a user press, so a poll
    /// racing a button cannot double-skip.
    pub fn tick(&mut self) {
        if self.current.is_none() || self.cursor.load_in_flight() || !self.cursor.is_playing() {
            return;
        }
        let duration = match self.cursor.duration() {
            Some(d) if d > Duration::ZERO => d,
            _ => return,
        };
        if self.cursor.position() >= duration {
            debug!("Track ended; advancing");
            self.next();
        }
    }

    // ===== Observable state =====

    /// Currently playing (or loading/paused) track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Whether audio is logically playing
    pub fn is_playing(&self) -> bool {
        self.cursor.is_playing()
    }

    /// Whether shuffle is enabled
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_on
    }

    /// The queue as the user sees it: manual picks then the window
    pub fn queue_view(&self) -> Vec<Track> {
        self.queue.merged().into_iter().cloned().collect()
    }

    /// Manual picks only
    pub fn manual_queue(&self) -> Vec<Track> {
        self.queue.manual_tracks().into_iter().cloned().collect()
    }

    /// Contextual window only
    pub fn contextual_queue(&self) -> Vec<Track> {
        self.queue.contextual_tracks().into_iter().cloned().collect()
    }

    /// Total queued tracks across both segments
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Previously played tracks, most recent first
    pub fn history(&self) -> Vec<Track> {
        self.history.get_all().into_iter().cloned().collect()
    }

    /// The active context snapshot
    pub fn snapshot(&self) -> &[Track] {
        &self.snapshot
    }

    /// Whether a next press has somewhere to go
    ///
    /// Sequential mode wraps over any non-empty snapshot; shuffle
    /// reselects from the snapshot minus the current track, so it
    /// needs at least one other id in there.
    pub fn has_next(&self) -> bool {
        if !self.queue.is_empty() {
            return true;
        }
        if self.shuffle_on {
            let current_id = self.current.as_ref().map(|t| t.id.as_str());
            self.snapshot
                .iter()
                .any(|t| Some(t.id.as_str()) != current_id)
        } else {
            !self.snapshot.is_empty()
        }
    }

    /// Whether a previous press can retreat rather than restart
    pub fn has_previous(&self) -> bool {
        if self.shuffle_on {
            !self.history.is_empty()
        } else {
            match self.current.as_ref() {
                Some(current) => self
                    .snapshot
                    .iter()
                    .position(|t| t.id == current.id)
                    .map_or(false, |i| i > 0),
                None => false,
            }
        }
    }

    /// Drain all pending events
    ///
    /// Returns everything emitted since the last drain. Hosts call this
    /// after each operation (or on a poll) to synchronize UI state.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Promote a track to current and begin loading it
    ///
    /// Also scrubs the new current id out of the window so the queue
    /// never shows what is already playing.
    fn start_track(&mut self, track: Track) {
        let previous_id = self.current.as_ref().map(|t| t.id.clone());
        self.queue.drop_contextual_id(&track.id);

        let load_result = self.cursor.begin_load(&track);
        let track_id = track.id.clone();
        self.current = Some(track);

        self.emit_track_changed(previous_id);
        self.emit_state_changed(false);
        if let Err(err) = load_result {
            warn!("Backend refused to load track {}: {}", track_id, err);
            self.emit_load_failed(track_id, err.to_string());
        }
    }

    /// The departing current track becomes history and cycle memory
    fn record_forward_transition(&mut self) {
        if let Some(current) = self.current.clone() {
            if self.shuffle_on {
                self.cycle.mark_played(&current.id);
            }
            self.history.push(current);
        }
    }

    /// One accepted advance: manual first, then window, then wrap
    fn advance(&mut self) {
        self.record_forward_transition();

        if let Some(track) = self.queue.pop_manual() {
            self.start_track(track);
            self.emit_queue_changed();
            return;
        }

        if let Some(track) = self.queue.pop_contextual() {
            if !self.shuffle_on {
                self.queue.refill_one(&self.snapshot, Some(track.id.as_str()));
            }
            self.start_track(track);
            self.emit_queue_changed();
            return;
        }

        self.end_of_queue();
    }

    /// Both queues ran dry: wrap (sequential) or recycle (shuffle)
    fn end_of_queue(&mut self) {
        if self.shuffle_on {
            self.reselect_window();
            if let Some(track) = self.queue.pop_contextual() {
                self.start_track(track);
            } else {
                debug!("Nothing left to shuffle; stopping");
                self.stop_playback();
            }
            self.emit_queue_changed();
            return;
        }

        match self.snapshot.first().cloned() {
            Some(first) => {
                // Wrap to the top of the context, forgetting the pass
                self.history.clear();
                let window: Vec<Track> = self.snapshot[1..].to_vec();
                self.queue.set_contextual(window);
                self.start_track(first);
            }
            None => {
                debug!("End of queue with empty snapshot; stopping");
                self.stop_playback();
            }
        }
        self.emit_queue_changed();
    }

    /// Walk real history back one step (shuffle retreat)
    fn previous_in_shuffle(&mut self) {
        match self.history.pop() {
            Some(previous) => {
                // Cloned, not taken: the departing current must still be
                // in place for start_track's change event
                if let Some(displaced) = self.current.clone() {
                    self.queue.push_contextual_front(displaced);
                }
                // Eligible to be shuffled to again later
                self.cycle.unmark(&previous.id);
                self.start_track(previous);
                self.emit_queue_changed();
            }
            None => self.restart_current(),
        }
    }

    /// Step back one snapshot position (sequential retreat)
    fn previous_in_snapshot(&mut self) {
        let current_id = match self.current.as_ref() {
            Some(track) => track.id.clone(),
            None => return,
        };

        match self.snapshot.iter().position(|t| t.id == current_id) {
            Some(i) if i > 0 => {
                let target = self.snapshot[i - 1].clone();
                // The old current leads the rebuilt window
                let window: Vec<Track> = self.snapshot[i..].to_vec();
                self.history.pop();
                self.queue.set_contextual(window);
                self.start_track(target);
                self.emit_queue_changed();
            }
            Some(_) => self.restart_current(), // Top of the context
            None => {
                debug!("Current track left the snapshot; restarting instead");
                self.restart_current();
            }
        }
    }

    fn restart_current(&mut self) {
        if let Err(err) = self.cursor.restart() {
            debug!("Restart seek failed: {}", err);
        }
    }

    /// Clear the transport entirely (terminal but recoverable)
    fn stop_playback(&mut self) {
        let previous_id = self.current.as_ref().map(|t| t.id.clone());
        self.cursor.halt();
        if previous_id.is_some() {
            self.current = None;
            self.emit_track_changed(previous_id);
        }
        self.emit_state_changed(false);
    }

    /// Deal a fresh shuffle window from the unplayed pool
    fn reselect_window(&mut self) {
        let current_id = self.current.as_ref().map(|t| t.id.clone());
        let window = self
            .cycle
            .reselect(&self.snapshot, current_id.as_deref(), &mut self.rng);
        self.queue.set_contextual(window);
    }

    /// Restore the window to snapshot order after the current track
    fn restore_sequential_window(&mut self) {
        let current_id = self.current.as_ref().map(|t| t.id.clone());
        let start = match current_id
            .as_deref()
            .and_then(|id| self.snapshot.iter().position(|t| t.id == id))
        {
            Some(i) => i + 1,
            None => 0,
        };
        let window: Vec<Track> = self.snapshot[start..]
            .iter()
            .filter(|t| Some(t.id.as_str()) != current_id.as_deref())
            .cloned()
            .collect();
        self.queue.set_contextual(window);
    }

    /// True when a press should be dropped; records accepted presses
    fn debounced(slot: &mut Option<Instant>, window: Duration) -> bool {
        let now = Instant::now();
        if let Some(last) = *slot {
            if now.duration_since(last) < window {
                return true;
            }
        }
        *slot = Some(now);
        false
    }

    // ===== Event emission =====

    fn emit_track_changed(&mut self, previous_track_id: Option<String>) {
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: self.current.as_ref().map(|t| t.id.clone()),
            previous_track_id,
        });
    }

    fn emit_state_changed(&mut self, playing: bool) {
        self.pending_events
            .push(PlayerEvent::StateChanged { playing });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_shuffle_changed(&mut self) {
        self.pending_events.push(PlayerEvent::ShuffleChanged {
            enabled: self.shuffle_on,
        });
    }

    fn emit_load_failed(&mut self, track_id: String, message: String) {
        self.pending_events
            .push(PlayerEvent::LoadFailed { track_id, message });
    }
}
