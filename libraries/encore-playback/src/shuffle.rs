//! Repeat-avoiding shuffle cycle
//!
//! Shuffle is not a one-shot permutation: the cycle remembers which
//! tracks have played since it began, and every reselection draws only
//! from the remainder. Once the remainder runs dry the cycle restarts
//! with the full snapshot, so long sessions keep producing music without
//! repeating anything mid-cycle.

use crate::types::Track;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Shuffle cycle memory
///
/// Tracks consumed ids for the current cycle. Retreating (previous)
/// removes an id so it becomes eligible again; toggling shuffle off
/// discards the whole cycle.
#[derive(Debug, Clone, Default)]
pub struct ShuffleCycle {
    /// IDs consumed during the current cycle
    played: HashSet<String>,
}

impl ShuffleCycle {
    /// Create an empty cycle
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a track as consumed by this cycle
    pub fn mark_played(&mut self, id: &str) {
        self.played.insert(id.to_string());
    }

    /// Make a track eligible again (previous navigation)
    pub fn unmark(&mut self, id: &str) {
        self.played.remove(id);
    }

    /// Forget the whole cycle
    pub fn clear(&mut self) {
        self.played.clear();
    }

    /// Whether a track has already played this cycle
    pub fn contains(&self, id: &str) -> bool {
        self.played.contains(id)
    }

    /// Number of tracks consumed this cycle
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.played.len()
    }

    /// Draw a fresh randomized lookahead over the snapshot
    ///
    /// The pool is the snapshot minus already-played tracks minus the
    /// current track. When that leaves nothing, the cycle restarts: the
    /// played set is cleared and the pool rebuilt, still excluding the
    /// current track, which must never re-enter the window while it is
    /// playing. An empty or single-track snapshot can therefore yield an
    /// empty permutation.
    pub fn reselect<R: Rng>(
        &mut self,
        snapshot: &[Track],
        current_id: Option<&str>,
        rng: &mut R,
    ) -> Vec<Track> {
        let mut pool = self.unplayed_pool(snapshot, current_id);
        if pool.is_empty() {
            self.played.clear();
            pool = self.unplayed_pool(snapshot, current_id);
        }
        pool.shuffle(rng);
        pool
    }

    /// Snapshot tracks still eligible this cycle, snapshot order
    ///
    /// Snapshots can hold duplicate entries (playlists allow them); the
    /// pool keys on id so each track enters at most once.
    fn unplayed_pool(&self, snapshot: &[Track], current_id: Option<&str>) -> Vec<Track> {
        let mut seen: HashSet<&str> = HashSet::new();
        snapshot
            .iter()
            .filter(|t| Some(t.id.as_str()) != current_id)
            .filter(|t| !self.played.contains(&t.id))
            .filter(|t| seen.insert(t.id.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn create_test_track(id: &str, title: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Test Artist".to_string(),
            album: Some("Test Album".to_string()),
            duration: Duration::from_secs(180),
        }
    }

    fn snapshot(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| create_test_track(id, "Track")).collect()
    }

    fn ids(tracks: &[Track]) -> HashSet<String> {
        tracks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn reselect_excludes_played_and_current() {
        let tracks = snapshot(&["a", "b", "c", "d"]);
        let mut cycle = ShuffleCycle::new();
        cycle.mark_played("b");
        let mut rng = StdRng::seed_from_u64(7);

        let window = cycle.reselect(&tracks, Some("a"), &mut rng);

        assert_eq!(ids(&window), ids(&snapshot(&["c", "d"])));
    }

    #[test]
    fn reselect_yields_each_eligible_track_once() {
        let tracks = snapshot(&["a", "b", "c", "d", "e"]);
        let mut cycle = ShuffleCycle::new();
        let mut rng = StdRng::seed_from_u64(42);

        let window = cycle.reselect(&tracks, None, &mut rng);

        assert_eq!(window.len(), 5);
        assert_eq!(ids(&window).len(), 5);
    }

    #[test]
    fn exhausted_cycle_restarts() {
        let tracks = snapshot(&["a", "b", "c"]);
        let mut cycle = ShuffleCycle::new();
        for id in ["a", "b", "c"] {
            cycle.mark_played(id);
        }
        let mut rng = StdRng::seed_from_u64(3);

        let window = cycle.reselect(&tracks, Some("c"), &mut rng);

        // Played set was cleared, pool rebuilt minus the current track
        assert_eq!(ids(&window), ids(&snapshot(&["a", "b"])));
        assert!(!cycle.contains("a"));
    }

    #[test]
    fn single_track_snapshot_yields_nothing_while_playing() {
        let tracks = snapshot(&["only"]);
        let mut cycle = ShuffleCycle::new();
        let mut rng = StdRng::seed_from_u64(1);

        let window = cycle.reselect(&tracks, Some("only"), &mut rng);
        assert!(window.is_empty());
    }

    #[test]
    fn unmark_restores_eligibility() {
        let tracks = snapshot(&["a", "b", "c"]);
        let mut cycle = ShuffleCycle::new();
        cycle.mark_played("a");
        cycle.mark_played("b");
        cycle.unmark("a");
        let mut rng = StdRng::seed_from_u64(11);

        let window = cycle.reselect(&tracks, None, &mut rng);
        assert_eq!(ids(&window), ids(&snapshot(&["a", "c"])));
    }

    #[test]
    fn duplicate_snapshot_entries_collapse() {
        let tracks = snapshot(&["a", "b", "a", "c", "b"]);
        let mut cycle = ShuffleCycle::new();
        let mut rng = StdRng::seed_from_u64(5);

        let window = cycle.reselect(&tracks, None, &mut rng);
        assert_eq!(window.len(), 3);
        assert_eq!(ids(&window), ids(&snapshot(&["a", "b", "c"])));
    }

    #[test]
    fn same_seed_same_order() {
        let tracks = snapshot(&["a", "b", "c", "d", "e", "f"]);

        let first: Vec<String> = ShuffleCycle::new()
            .reselect(&tracks, None, &mut StdRng::seed_from_u64(99))
            .iter()
            .map(|t| t.id.clone())
            .collect();
        let second: Vec<String> = ShuffleCycle::new()
            .reselect(&tracks, None, &mut StdRng::seed_from_u64(99))
            .iter()
            .map(|t| t.id.clone())
            .collect();

        assert_eq!(first, second);
    }
}
