//! Property tests for the stats model, mode controller and rain animation

use deckstat_core::art::{ArtCursor, CATALOG};
use deckstat_core::config::Profile;
use deckstat_core::matrix::{MatrixRain, RAIN_ROWS, TRAIL_MAX, TRAIL_MIN};
use deckstat_core::mode::{ModeController, ModeEvent, ModeSet, Transition};
use deckstat_core::stats::StatsModel;
use deckstat_protocol::{Key, KeySet, LineAssembler};
use proptest::prelude::*;

fn event() -> impl Strategy<Value = ModeEvent> {
    prop_oneof![
        Just(ModeEvent::Dashboard),
        Just(ModeEvent::Art),
        Just(ModeEvent::Rain),
    ]
}

proptest! {
    #[test]
    fn omitted_keys_keep_previous_values(cpu in 0.0f32..100.0, ram in 0.0f32..100.0, next_cpu in 0.0f32..100.0) {
        let mut model = StatsModel::new();
        model.merge_line(&format!("cpu={cpu};ram_percent={ram};hostname=deck"), KeySet::ALL);
        model.merge_line(&format!("cpu={next_cpu}"), KeySet::ALL);

        let record = model.snapshot();
        prop_assert_eq!(record.cpu, next_cpu);
        prop_assert_eq!(record.ram_percent, ram);
        prop_assert_eq!(record.hostname.as_str(), "deck");
    }

    #[test]
    fn merge_touches_only_named_keys_and_is_idempotent(
        picks in proptest::collection::vec((0usize..Key::ALL.len(), 0u32..10_000), 0..8),
    ) {
        let mut line = String::new();
        let mut named = KeySet::EMPTY;
        for (index, value) in &picks {
            let key = Key::ALL[*index];
            line.push_str(&format!("{}={};", key.name(), value));
            named = named.with(key);
        }

        let mut model = StatsModel::new();
        model.merge_line(&line, KeySet::ALL);
        let once = model.snapshot().clone();
        for key in Key::ALL {
            prop_assert_eq!(once.has(key), named.contains(key));
        }

        model.merge_line(&line, KeySet::ALL);
        prop_assert_eq!(model.snapshot(), &once);
    }

    #[test]
    fn garbage_lines_never_disturb_model(junk in "[^=\n]{0,80}") {
        let mut model = StatsModel::new();
        model.merge_line("cpu=42;ram_total_mb=4096", KeySet::ALL);
        let before = model.snapshot().clone();
        model.merge_line(&junk, KeySet::ALL);
        prop_assert_eq!(model.snapshot(), &before);
    }

    #[test]
    fn seeded_rain_stays_in_bounds(seed in any::<u32>(), steps in 1usize..300) {
        let mut rain = MatrixRain::new(seed);
        rain.step();
        for _ in 0..steps {
            let before: Vec<_> = rain.columns().to_vec();
            rain.step();
            for (old, new) in before.iter().zip(rain.columns()) {
                prop_assert!((TRAIL_MIN..=TRAIL_MAX).contains(&new.trail));
                if new.head != old.head + 1 {
                    prop_assert!(new.head <= 0);
                }
                prop_assert!(new.head - i16::from(new.trail) < RAIN_ROWS);
            }
        }
    }

    #[test]
    fn mode_is_always_enabled(events in proptest::collection::vec(event(), 0..40)) {
        for profile in Profile::ALL {
            let spec = profile.spec();
            let mut modes = ModeController::new(spec.modes, 200, ArtCursor::default());
            for event in &events {
                let _ = modes.handle(*event);
                prop_assert!(spec.modes.contains(modes.mode()));
            }
        }
    }

    #[test]
    fn art_selection_is_always_in_catalog(events in proptest::collection::vec(event(), 0..60)) {
        let mut modes = ModeController::new(ModeSet::ALL, 200, ArtCursor::default());
        for event in events {
            if let Transition::ShowArt { index } = modes.handle(event) {
                prop_assert!(index < CATALOG.len());
            }
        }
    }
}

#[test]
fn art_cycles_back_after_catalog_len_advances() {
    let mut modes = ModeController::new(ModeSet::ALL, 200, ArtCursor::default());
    assert_eq!(modes.handle(ModeEvent::Art), Transition::ShowArt { index: 0 });
    for _ in 0..CATALOG.len() - 1 {
        modes.handle(ModeEvent::Art);
    }
    assert_eq!(modes.handle(ModeEvent::Art), Transition::ShowArt { index: 0 });
}

#[test]
fn byte_stream_to_model() {
    let keys = Profile::Classic.spec().keys;
    let mut assembler = LineAssembler::new();
    let mut model = StatsModel::new();

    let stream: &[&[u8]] = &[
        b"time=12:00:01;hostname=deck;cpu=1",
        b"2.5;load_1=0.5;local_ip=10.0.0.2\r\n",
        b"\n\n",
        b"ram_total_mb=4096;ram_percent=33.3\n",
    ];
    for chunk in stream {
        assembler.feed_bytes(chunk, |line| {
            model.merge_line(line, keys);
        });
    }

    let record = model.snapshot();
    assert_eq!(record.time.as_str(), "12:00:01");
    assert_eq!(record.cpu, 12.5);
    assert_eq!(record.load_1, 0.5);
    assert_eq!(record.ram_total_mb, 4096);
    assert_eq!(record.ram_percent, 33.3);
    // Not in the classic key set
    assert!(!keys.contains(Key::LocalIp));
    assert!(record.local_ip.is_empty());
    assert_eq!(model.lines_merged(), 2);
}
