//! Platform-agnostic playback backend trait
//!
//! Abstracts the audio pipeline (decoding, output, clock) behind a small
//! transport surface so the engine can run identically against desktop
//! audio stacks, remote renderers, or test fakes.

use crate::error::Result;
use crate::types::Track;
use std::time::Duration;

/// Platform-agnostic playback backend
///
/// Implementors own the actual audio pipeline. The engine drives it
/// through this trait and treats the reported playback rate as ground
/// truth for play/pause state; the cached engine flag is display-only.
pub trait PlaybackBackend: Send {
    /// Begin loading a track
    ///
    /// Loading is asynchronous: a successful return means the request
    /// was accepted, not that audio is ready. The host reports the
    /// outcome later through the engine's load-completion entry point,
    /// carrying the track id so stale completions can be discarded.
    ///
    /// # Returns
    /// * `Ok(())` - Load started
    /// * `Err(_)` - Load refused outright (missing file, unsupported format, ...)
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Start or resume playback of the loaded track
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the loaded track and position
    fn pause(&mut self) -> Result<()>;

    /// Seek to position in the loaded track
    ///
    /// # Returns
    /// * `Ok(())` - Seek successful
    /// * `Err(_)` - Seek failed (position out of range, format doesn't support seek, ...)
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Current playback position within the loaded track
    fn position(&self) -> Duration;

    /// Total duration of the loaded track, once known
    ///
    /// `None` while nothing is loaded or the container has not reported
    /// a length yet.
    fn duration(&self) -> Option<Duration>;

    /// Actual playback rate (0.0 = paused/stopped, 1.0 = normal)
    ///
    /// This is what the pipeline is really doing, not what was last
    /// requested.
    fn playback_rate(&self) -> f32;
}
