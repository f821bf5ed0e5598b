//! Property-based tests for the playback engine
//!
//! Uses proptest to verify queue invariants across many random inputs.
//! Small limits are used deliberately so caps and refills get hit often.

mod common;

use common::ScriptedBackend;
use encore_playback::{PlayerConfig, PlayerEngine, Track};
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9]{1,6}",                         // id (collisions welcome)
        "[A-Za-z ]{1,30}",                       // title
        "[A-Za-z ]{1,20}",                       // artist
        proptest::option::of("[A-Za-z ]{1,20}"), // album
        1u64..600,                               // duration in seconds
    )
        .prop_map(|(id, title, artist, album, duration_secs)| Track {
            id,
            title,
            artist,
            album,
            duration: Duration::from_secs(duration_secs),
        })
}

fn arbitrary_snapshot() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..40)
}

fn indexed_track(i: usize) -> Track {
    Track {
        id: i.to_string(),
        title: format!("Track {}", i),
        artist: "Artist".to_string(),
        album: None,
        duration: Duration::from_secs(180),
    }
}

fn indexed_snapshot(len: usize) -> Vec<Track> {
    (0..len).map(indexed_track).collect()
}

fn stress_config() -> PlayerConfig {
    PlayerConfig {
        history_limit: 4,
        lookahead_limit: 5,
        transport_debounce: Duration::ZERO,
        previous_restart_threshold: Duration::from_secs(3),
    }
}

fn stress_engine(seed: u64) -> (PlayerEngine, ScriptedBackend) {
    let backend = ScriptedBackend::new();
    let engine = PlayerEngine::with_seed(stress_config(), Box::new(backend.clone()), seed);
    (engine, backend)
}

/// Report a successful load for whatever is current
fn settle_load(engine: &mut PlayerEngine) {
    if let Some(id) = engine.current_track().map(|t| t.id.clone()) {
        engine.complete_load(&id, Ok(()));
    }
}

fn contextual_ids(engine: &PlayerEngine) -> Vec<String> {
    engine.contextual_queue().iter().map(|t| t.id.clone()).collect()
}

// ===== Property Tests =====

proptest! {
    /// Property: Core queue invariants survive any operation sequence.
    /// The window stays within its cap, holds no duplicate ids, and
    /// never shows the current track; history stays within its cap; the
    /// merged view is exactly manual picks plus the window.
    #[test]
    fn queue_invariants_hold_across_random_operations(
        snapshot in arbitrary_snapshot(),
        ops in prop::collection::vec((0u8..10, 0usize..40), 1..60)
    ) {
        let (mut engine, backend) = stress_engine(99);

        for (code, arg) in ops {
            let queue_len = engine.queue_len();
            match code {
                0 => {
                    let track = snapshot[arg % snapshot.len()].clone();
                    engine.play(track, snapshot.clone());
                    settle_load(&mut engine);
                }
                1 => {
                    engine.next();
                    settle_load(&mut engine);
                }
                2 => {
                    engine.previous();
                    settle_load(&mut engine);
                }
                3 => {
                    let track = snapshot[arg % snapshot.len()].clone();
                    engine.add_to_queue(track, arg % 2 == 0);
                    settle_load(&mut engine);
                }
                4 => {
                    engine.play_from_queue(arg % (queue_len + 1));
                    settle_load(&mut engine);
                }
                5 => {
                    engine.move_queue_items(&[arg % queue_len.max(1)], arg / 7);
                }
                6 => {
                    engine.remove_queue_items(&[arg % queue_len.max(1)]);
                }
                7 => engine.toggle_shuffle(),
                8 => engine.reshuffle(),
                _ => {
                    backend.set_position(Duration::from_secs(arg as u64 * 20));
                    engine.tick();
                    settle_load(&mut engine);
                }
            }

            let window = contextual_ids(&engine);
            prop_assert!(window.len() <= 5, "Window exceeded its cap: {}", window.len());

            let unique: HashSet<&String> = window.iter().collect();
            prop_assert_eq!(unique.len(), window.len(), "Window holds a duplicate id");

            if let Some(current) = engine.current_track() {
                prop_assert!(
                    !window.contains(&current.id),
                    "Window shows the current track {}",
                    current.id
                );
            }

            prop_assert!(engine.history().len() <= 4, "History exceeded its cap");
            prop_assert_eq!(
                engine.queue_len(),
                engine.manual_queue().len() + engine.contextual_queue().len(),
                "Merged length out of sync with its segments"
            );
        }
    }

    /// Property: History never exceeds its configured limit, no matter
    /// how many advances (wrap-around included) happen.
    #[test]
    fn history_never_exceeds_its_limit(
        limit in 1usize..20,
        advances in 1usize..60
    ) {
        let config = PlayerConfig {
            history_limit: limit,
            transport_debounce: Duration::ZERO,
            ..PlayerConfig::default()
        };
        let backend = ScriptedBackend::new();
        let mut engine = PlayerEngine::with_seed(config, Box::new(backend.clone()), 7);

        let snapshot = indexed_snapshot(10);
        engine.play(snapshot[0].clone(), snapshot.clone());
        settle_load(&mut engine);

        for _ in 0..advances {
            engine.next();
            settle_load(&mut engine);
            prop_assert!(
                engine.history().len() <= limit,
                "History exceeded limit: {} > {}",
                engine.history().len(),
                limit
            );
        }
    }

    /// Property: Sequential playback visits the snapshot in order from
    /// any starting index, even with a window far smaller than the
    /// snapshot (forcing the one-per-advance refill to do its job).
    #[test]
    fn sequential_order_is_snapshot_order(
        len in 2usize..25,
        start in 0usize..25
    ) {
        let start = start % len;
        let (mut engine, _backend) = stress_engine(7);

        let snapshot = indexed_snapshot(len);
        engine.play(snapshot[start].clone(), snapshot.clone());
        settle_load(&mut engine);

        for k in 1..(len - start) {
            engine.next();
            settle_load(&mut engine);
            let current = engine.current_track().map(|t| t.id.clone());
            prop_assert_eq!(
                current,
                Some(snapshot[start + k].id.clone()),
                "Advance {} left snapshot order",
                k
            );
        }
    }

    /// Property: A fresh shuffle cycle visits every track exactly once
    /// before any repeat, whatever the seed.
    #[test]
    fn shuffle_cycle_has_no_repeats(
        len in 2usize..30,
        seed in any::<u64>()
    ) {
        let (mut engine, _backend) = stress_engine(seed);

        let snapshot = indexed_snapshot(len);
        engine.play(snapshot[0].clone(), snapshot.clone());
        settle_load(&mut engine);
        engine.toggle_shuffle();

        let mut visited = HashSet::new();
        visited.insert("0".to_string());

        for _ in 0..(len - 1) {
            engine.next();
            settle_load(&mut engine);
            let id = engine.current_track().map(|t| t.id.clone()).unwrap();
            prop_assert!(visited.insert(id.clone()), "Track {} repeated mid-cycle", id);
        }

        prop_assert_eq!(visited.len(), len, "Cycle skipped a track");
    }

    /// Property: A reorder never leaves two entries with the same id in
    /// the merged view, even when manual picks duplicate window entries.
    #[test]
    fn move_rebuild_never_leaves_duplicate_ids(
        snapshot in arbitrary_snapshot(),
        picks in prop::collection::vec(0usize..40, 0..5),
        from in 0usize..40,
        to in 0usize..40
    ) {
        let (mut engine, _backend) = stress_engine(99);

        engine.play(snapshot[0].clone(), snapshot.clone());
        settle_load(&mut engine);
        for pick in picks {
            engine.add_to_queue(snapshot[pick % snapshot.len()].clone(), pick % 2 == 0);
        }

        let len = engine.queue_len();
        engine.move_queue_items(&[from % len.max(1)], to);

        let ids: Vec<String> = engine.queue_view().iter().map(|t| t.id.clone()).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len(), "Reorder produced duplicate entries");
    }
}
