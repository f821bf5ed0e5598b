//! Catalog seam
//!
//! The engine never touches the host's library; it only ever receives
//! materialized snapshots. This trait is how the control layer asks for
//! them when a play request names a context instead of a track list.

use crate::error::Result;
use encore_playback::{PlayContext, Track};

/// Source of ordered track lists for playback contexts
///
/// Implemented by the host's library or database layer. Ordering is the
/// contract: the returned list becomes the snapshot the queue walks,
/// wraps around, and shuffles over.
pub trait CatalogStore: Send {
    /// All tracks of the context, in play order
    fn fetch_ordered_tracks(&self, context: &PlayContext) -> Result<Vec<Track>>;
}
