//! Property-based invariant tests for the paginator and activity tracker.
//!
//! 1. The visible end never decreases between refreshes and never exceeds the list length.
//! 2. Once exhausted, `load_more` changes nothing.
//! 3. Two `load_more` calls within one pacing delay grow the window once.
//! 4. `refresh` always returns to the first page.
//! 5. The buffered range contains the visible range and stays inside `[0, len)`.
//! 6. Activity reduction is deterministic under replay.

use feedwindow::{ActivityTracker, Paginator, PaginatorOptions, ViewToken, WindowRange};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Op {
    LoadMore(u64),
    Tick(u64),
    Refresh(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..400).prop_map(Op::LoadMore),
        4 => (0u64..400).prop_map(Op::Tick),
        1 => (0u64..400).prop_map(Op::Refresh),
    ]
}

fn options_strategy() -> impl Strategy<Value = (usize, usize, u64)> {
    (1usize..40, 0usize..60, 0u64..300)
}

// ── 1 + 4 ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn window_grows_monotonically_until_refresh(
        count in 0usize..300,
        (page_size, buffer_size, delay) in options_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut p = Paginator::new(
            count,
            PaginatorOptions::new(page_size, buffer_size).with_pacing_delay_ms(delay),
        );
        let mut now = 0u64;
        let mut last_end = p.visible_range().end;

        for op in ops {
            match op {
                Op::LoadMore(dt) => {
                    now += dt;
                    p.load_more(now);
                }
                Op::Tick(dt) => {
                    now += dt;
                    p.tick(now);
                }
                Op::Refresh(dt) => {
                    now += dt;
                    p.refresh(now);
                    prop_assert_eq!(p.visible_range(), WindowRange::new(0, page_size.min(count)));
                    last_end = p.visible_range().end;
                }
            }
            let end = p.visible_range().end;
            prop_assert!(end >= last_end, "end shrank: {} -> {}", last_end, end);
            prop_assert!(end <= count);
            last_end = end;
        }
    }
}

// ── 2 ────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn exhausted_load_more_is_idempotent(
        count in 0usize..200,
        (page_size, buffer_size, delay) in options_strategy(),
        attempts in 1usize..10,
    ) {
        let mut p = Paginator::new(
            count,
            PaginatorOptions::new(page_size, buffer_size).with_pacing_delay_ms(delay),
        );
        let mut now = 0u64;
        while p.has_more() {
            prop_assert!(p.load_more(now));
            now += delay;
            prop_assert!(p.tick(now) || delay == 0);
        }
        prop_assert_eq!(p.visible_range().end, count);

        let before = p.state();
        for _ in 0..attempts {
            now += 1;
            prop_assert!(!p.load_more(now));
            prop_assert_eq!(p.state(), before);
        }
    }
}

// ── 3 ────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn load_more_within_delay_grows_once(
        page_size in 1usize..30,
        delay in 1u64..500,
        second_at in 0u64..500,
    ) {
        let count = page_size * 10;
        let mut p = Paginator::new(
            count,
            PaginatorOptions::new(page_size, 0).with_pacing_delay_ms(delay),
        );
        let second_at = second_at % delay;

        prop_assert!(p.load_more(0));
        prop_assert!(!p.load_more(second_at));
        p.tick(delay);
        p.tick(delay * 2);
        prop_assert_eq!(p.visible_range().end, page_size * 2);
    }
}

// ── 5 ────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn buffered_range_is_superset(
        start in 0usize..500,
        width in 0usize..500,
        buffer in 0usize..500,
        len in 0usize..1500,
    ) {
        let window = WindowRange::new(start, start + width);
        let buffered = window.buffered(buffer, len);
        prop_assert!(buffered.start <= window.start);
        prop_assert!(buffered.end >= window.end.min(len));
        prop_assert!(buffered.start <= buffered.end);
        prop_assert!(buffered.end <= len);
    }
}

// ── 6 ────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn activity_reduction_is_deterministic(
        flags in prop::collection::vec(any::<bool>(), 0..20),
        replays in 1usize..5,
    ) {
        let report: Vec<ViewToken<usize>> = flags
            .iter()
            .enumerate()
            .map(|(i, &viewable)| ViewToken { key: i, index: Some(i), is_viewable: viewable })
            .collect();
        let expected = flags.iter().position(|&v| v);

        let mut t = ActivityTracker::new();
        for _ in 0..replays {
            t.on_viewable_items_changed(&report);
            prop_assert_eq!(t.active_key().copied(), expected);
        }
    }
}
