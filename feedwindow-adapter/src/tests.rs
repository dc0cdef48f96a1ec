use crate::*;

use alloc::vec::Vec;
use feedwindow::{Activity, PaginatorOptions, ViewToken, ViewabilityConfig, WindowRange};

fn column(keys: &[&'static str], size: u32) -> Vec<ItemExtent<&'static str>> {
    keys.iter()
        .enumerate()
        .map(|(i, &k)| ItemExtent::new(k, i, i as u64 * size as u64, size))
        .collect()
}

#[test]
fn item_needs_threshold_and_dwell_to_become_viewable() {
    let mut v = ViewabilityTracker::new(ViewabilityConfig::new(50, 300));
    let items = column(&["a", "b", "c"], 100);
    let viewport = Viewport::new(0, 150);

    assert!(v.update(&items, viewport, 0).is_empty());
    assert_eq!(v.next_deadline_ms(), Some(300));
    assert!(v.update(&items, viewport, 299).is_empty());

    let changed = v.update(&items, viewport, 300);
    assert_eq!(
        changed,
        [ViewToken::viewable("a", 0), ViewToken::viewable("b", 1)]
    );
    assert!(v.is_viewable(&"a"));
    assert!(!v.is_viewable(&"c"));
    assert_eq!(v.next_deadline_ms(), None);
}

#[test]
fn leaving_the_viewport_restarts_dwell() {
    let mut v = ViewabilityTracker::new(ViewabilityConfig::new(50, 300));
    let items = column(&["a", "b"], 100);

    v.update(&items, Viewport::new(0, 100), 0);
    v.update(&items, Viewport::new(100, 100), 100);
    assert!(v.update(&items, Viewport::new(0, 100), 200).is_empty());
    assert!(v.update(&items, Viewport::new(0, 100), 400).is_empty());
    assert_eq!(
        v.update(&items, Viewport::new(0, 100), 500),
        [ViewToken::viewable("a", 0)]
    );
}

#[test]
fn dropping_below_threshold_is_immediate() {
    let mut v = ViewabilityTracker::new(ViewabilityConfig::new(50, 0));
    let items = column(&["a", "b"], 100);

    assert_eq!(
        v.update(&items, Viewport::new(0, 100), 0),
        [ViewToken::viewable("a", 0)]
    );
    assert_eq!(
        v.update(&items, Viewport::new(60, 100), 1),
        [ViewToken::hidden("a", Some(0)), ViewToken::viewable("b", 1)]
    );
}

#[test]
fn unmounted_items_are_reported_hidden_in_index_order() {
    let mut v = ViewabilityTracker::new(ViewabilityConfig::new(10, 0));
    let items = column(&["a", "b", "c"], 10);
    v.update(&items, Viewport::new(0, 30), 0);
    assert_eq!(v.viewable_count(), 3);

    let changed = v.update(&items[2..], Viewport::new(0, 30), 1);
    assert_eq!(
        changed,
        [ViewToken::hidden("a", None), ViewToken::hidden("b", None)]
    );
    assert_eq!(v.viewable_items(), [ViewToken::viewable("c", 2)]);
}

#[test]
fn zero_threshold_means_any_overlap_and_empty_items_never_count() {
    let mut v = ViewabilityTracker::new(ViewabilityConfig::new(0, 0));
    let items = [
        ItemExtent::new("spacer", 0, 0, 0),
        ItemExtent::new("edge", 1, 0, 1000),
    ];
    assert_eq!(
        v.update(&items, Viewport::new(999, 50), 0),
        [ViewToken::viewable("edge", 1)]
    );
    assert!(!v.is_viewable(&"spacer"));
}

#[test]
fn duplicate_keys_in_layout_are_reported_once() {
    let mut v = ViewabilityTracker::new(ViewabilityConfig::new(0, 0));
    let items = [
        ItemExtent::new("a", 0, 0, 10),
        ItemExtent::new("a", 1, 10, 10),
        ItemExtent::new("b", 2, 20, 10),
    ];
    assert_eq!(
        v.update(&items, Viewport::new(0, 30), 0),
        [ViewToken::viewable("a", 0), ViewToken::viewable("b", 2)]
    );
    assert_eq!(
        v.viewable_items(),
        [ViewToken::viewable("a", 0), ViewToken::viewable("b", 2)]
    );
}

#[test]
fn changed_config_applies_on_next_update() {
    let mut v = ViewabilityTracker::new(ViewabilityConfig::new(50, 300));
    let items = column(&["a"], 100);
    let viewport = Viewport::new(0, 40);

    assert!(v.update(&items, viewport, 0).is_empty());
    assert_eq!(v.next_deadline_ms(), None);

    v.set_config(ViewabilityConfig::new(30, 300));
    assert!(v.update(&items, viewport, 0).is_empty());
    assert_eq!(v.next_deadline_ms(), Some(300));

    // The running dwell timer keeps its start time.
    v.set_config(ViewabilityConfig::new(30, 100));
    assert_eq!(
        v.update(&items, viewport, 100),
        [ViewToken::viewable("a", 0)]
    );

    v.set_config(ViewabilityConfig::new(200, 0));
    assert_eq!(v.config().item_visible_percent_threshold, 100);
}

#[test]
fn invalid_threshold_is_rejected_or_clamped() {
    let err = ViewabilityTracker::<u64>::try_new(ViewabilityConfig::new(150, 0)).unwrap_err();
    assert_eq!(err, feedwindow::ConfigError::ThresholdOutOfRange { value: 150 });

    let v = ViewabilityTracker::<u64>::new(ViewabilityConfig::new(150, 0));
    assert_eq!(v.config().item_visible_percent_threshold, 100);
}

#[test]
fn controller_focuses_topmost_viewable_post_while_scrolling() {
    let mut c = FeedController::new(
        40,
        PaginatorOptions::new(15, 10),
        ViewabilityConfig::new(50, 300),
    );
    assert!(c.on_scroll(ScrollMetrics::new(0, 150, 300), 0).is_empty());
    assert!(c.on_layout(column(&["a", "b", "c"], 100), 0).is_none());

    assert!(c.tick(299).activity.is_none());
    let change = c.tick(300).activity.unwrap();
    assert_eq!(change.activated(), Some(&"a"));
    assert!(c.is_item_active(&"a"));
    assert!(!c.is_item_active(&"b"));

    // "a" scrolls away; "b" stays viewable and takes focus.
    let update = c.on_scroll(ScrollMetrics::new(100, 150, 300), 400);
    let change = update.activity.unwrap();
    assert_eq!(change.deactivated(), Some(&"a"));
    assert_eq!(change.activated(), Some(&"b"));
    assert!(update.load_requested);
    assert!(c.state().loading);
}

#[test]
fn first_page_focuses_without_any_scroll() {
    let mut c = FeedController::new(
        40,
        PaginatorOptions::new(15, 10),
        ViewabilityConfig::new(50, 300),
    );
    assert!(c.on_viewport(Viewport::new(0, 150), 0).is_none());
    assert!(c.on_layout(column(&["a", "b", "c"], 100), 0).is_none());

    let update = c.tick(300);
    assert_eq!(update.activity.unwrap().activated(), Some(&"a"));
    assert_eq!(c.active_key(), Some(&"a"));
    assert!(!c.state().loading);
    assert_eq!(c.state().visible_range, WindowRange::new(0, 15));
}

#[test]
fn update_viewability_sets_layout_and_viewport_together() {
    let mut c = FeedController::new(
        40,
        PaginatorOptions::new(15, 10),
        ViewabilityConfig::new(50, 0),
    );
    let change = c
        .update_viewability(column(&["a", "b", "c"], 100), Viewport::new(0, 150), 0)
        .unwrap();
    assert_eq!(change.activated(), Some(&"a"));
    assert_eq!(c.viewport(), Viewport::new(0, 150));
    assert!(c.paginator().pending().is_none());

    let change = c.on_viewport(Viewport::new(100, 150), 10).unwrap();
    assert_eq!(change.activated(), Some(&"b"));
    assert!(!c.state().loading);
}

#[test]
fn rapid_end_reached_scrolls_load_one_page_per_delay() {
    let mut c: FeedController<u64> = FeedController::new(
        47,
        PaginatorOptions::new(15, 10),
        ViewabilityConfig::default(),
    );
    let near_end = ScrollMetrics::new(900, 100, 1000);

    let mut accepted = 0;
    for now_ms in 0..200u64 {
        if c.on_scroll(near_end, now_ms).load_requested {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
    assert!(c.tick(200).window_changed);
    assert_eq!(c.state().visible_range, WindowRange::new(0, 30));

    assert!(c.on_end_reached(300));
    c.tick(500);
    assert!(c.on_end_reached(600));
    c.tick(800);
    assert_eq!(c.state().visible_range, WindowRange::new(0, 47));
    assert!(!c.on_scroll(near_end, 900).load_requested);
}

#[test]
fn far_from_end_does_not_load() {
    let mut c: FeedController<u64> = FeedController::new(
        100,
        PaginatorOptions::default(),
        ViewabilityConfig::default(),
    )
    .with_end_reached_threshold(1.0);
    assert!(!c.on_scroll(ScrollMetrics::new(0, 100, 1000), 0).load_requested);
    assert!(c.on_scroll(ScrollMetrics::new(800, 100, 1000), 1).load_requested);
}

#[test]
fn refresh_resets_window_and_deactivates() {
    let mut c = FeedController::new(
        60,
        PaginatorOptions::new(15, 10).with_pacing_delay_ms(0),
        ViewabilityConfig::new(50, 0),
    );
    c.on_scroll(ScrollMetrics::new(0, 100, 1500), 0);
    c.on_layout(column(&["a", "b"], 100), 0);
    assert_eq!(c.active_key(), Some(&"a"));
    assert!(c.on_end_reached(1));
    assert_eq!(c.state().visible_range.end, 30);

    let update = c.refresh(2);
    assert!(update.window_changed);
    assert_eq!(update.activity.unwrap().deactivated(), Some(&"a"));
    assert_eq!(c.state().visible_range, WindowRange::new(0, 15));
    assert_eq!(c.activity_tracker().activity(), &Activity::Idle);
    assert_eq!(c.viewability().viewable_count(), 0);
}

#[test]
fn host_reports_drive_activity_directly() {
    let mut c: FeedController<&str> =
        FeedController::new(3, PaginatorOptions::default(), ViewabilityConfig::default());
    let mut observed = Vec::new();

    c.on_viewable_items_changed(&[ViewToken::hidden("A", Some(0))]);
    observed.push(c.active_key().copied());
    c.on_viewable_items_changed(&[
        ViewToken::viewable("A", 0),
        ViewToken::hidden("B", Some(1)),
    ]);
    observed.push(c.active_key().copied());
    c.on_viewable_items_changed(&[ViewToken::viewable("B", 1)]);
    observed.push(c.active_key().copied());

    assert_eq!(observed, [None, Some("A"), Some("B")]);
}

#[test]
fn nan_threshold_is_clamped() {
    let c: FeedController<u64> =
        FeedController::new(0, PaginatorOptions::default(), ViewabilityConfig::default())
            .with_end_reached_threshold(f32::NAN);
    assert_eq!(c.end_reached_threshold(), 0.0);
}
