use alloc::vec::Vec;

use feedwindow::{
    ActivityChange, ActivityTracker, PaginationState, Paginator, PaginatorOptions, ViewToken,
    ViewabilityConfig,
};

use crate::{FeedKey, ItemExtent, ViewabilityTracker, Viewport};

/// Default distance from the end of the content, in viewport lengths, at which more items are
/// requested.
pub const DEFAULT_END_REACHED_THRESHOLD: f32 = 0.5;

/// Scroll position reported by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub offset: u64,
    /// Viewport length along the scroll axis.
    pub viewport: u32,
    /// Total content length along the scroll axis.
    pub content: u64,
}

impl ScrollMetrics {
    pub fn new(offset: u64, viewport: u32, content: u64) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    pub fn distance_from_end(&self) -> u64 {
        let seen = self.offset.saturating_add(self.viewport as u64);
        self.content.saturating_sub(seen)
    }
}

/// What changed as a result of a controller call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedUpdate<K> {
    /// A `load_more` was accepted by the paginator.
    pub load_requested: bool,
    /// The paginator's window or loading flag changed.
    pub window_changed: bool,
    /// The active item changed.
    pub activity: Option<ActivityChange<K>>,
}

impl<K> Default for FeedUpdate<K> {
    fn default() -> Self {
        Self {
            load_requested: false,
            window_changed: false,
            activity: None,
        }
    }
}

impl<K> FeedUpdate<K> {
    pub fn is_empty(&self) -> bool {
        !self.load_requested && !self.window_changed && self.activity.is_none()
    }
}

/// A framework-neutral feed controller: pagination, end-of-list detection, viewability, and
/// the active item in one place.
///
/// This type does not hold any UI objects or the items themselves. Adapters drive it by calling:
/// - `set_count` when the source list changes
/// - `on_layout` / `on_viewport` / `on_scroll` when UI events occur (or `update_viewability`
///   for both at once)
/// - `tick(now_ms)` each frame/timer tick (pacing delays and viewability dwell times)
///
/// Every item should render with `is_item_active(&key)` as its "may autoplay" flag.
#[derive(Clone, Debug)]
pub struct FeedController<K: FeedKey> {
    paginator: Paginator,
    activity: ActivityTracker<K>,
    viewability: ViewabilityTracker<K>,
    end_reached_threshold: f32,
    layout: Vec<ItemExtent<K>>,
    viewport: Viewport,
}

impl<K: FeedKey> FeedController<K> {
    pub fn new(count: usize, options: PaginatorOptions, viewability: ViewabilityConfig) -> Self {
        Self::from_parts(Paginator::new(count, options), ViewabilityTracker::new(viewability))
    }

    pub fn from_parts(paginator: Paginator, viewability: ViewabilityTracker<K>) -> Self {
        Self {
            paginator,
            activity: ActivityTracker::new(),
            viewability,
            end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            layout: Vec::new(),
            viewport: Viewport::default(),
        }
    }

    /// Sets how close (in viewport lengths) to the end of the content a scroll must get before
    /// more items are requested. Negative or NaN values are treated as `0`.
    pub fn with_end_reached_threshold(mut self, threshold: f32) -> Self {
        self.set_end_reached_threshold(threshold);
        self
    }

    pub fn set_end_reached_threshold(&mut self, threshold: f32) {
        if threshold.is_nan() || threshold < 0.0 {
            awarn!(threshold, "FeedController: end_reached_threshold clamped to 0");
            self.end_reached_threshold = 0.0;
            return;
        }
        self.end_reached_threshold = threshold;
    }

    pub fn end_reached_threshold(&self) -> f32 {
        self.end_reached_threshold
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    pub fn activity_tracker(&self) -> &ActivityTracker<K> {
        &self.activity
    }

    pub fn viewability(&self) -> &ViewabilityTracker<K> {
        &self.viewability
    }

    pub fn state(&self) -> PaginationState {
        self.paginator.state()
    }

    /// The buffered slice of `data` to mount.
    pub fn items<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        self.paginator.items(data)
    }

    pub fn active_key(&self) -> Option<&K> {
        self.activity.active_key()
    }

    pub fn is_item_active(&self, key: &K) -> bool {
        self.activity.is_active(key)
    }

    pub fn set_count(&mut self, count: usize) {
        self.paginator.set_count(count);
    }

    /// Stores the layout of the mounted items and re-evaluates viewability.
    ///
    /// `items` should be in document order.
    pub fn on_layout(
        &mut self,
        items: impl IntoIterator<Item = ItemExtent<K>>,
        now_ms: u64,
    ) -> Option<ActivityChange<K>> {
        self.layout.clear();
        self.layout.extend(items);
        self.reevaluate(now_ms)
    }

    /// Stores the viewport (e.g. on first mount or resize) and re-evaluates viewability.
    ///
    /// Unlike `on_scroll`, this never requests another page.
    pub fn on_viewport(&mut self, viewport: Viewport, now_ms: u64) -> Option<ActivityChange<K>> {
        self.viewport = viewport;
        self.reevaluate(now_ms)
    }

    /// Replaces layout and viewport together, then re-evaluates viewability.
    pub fn update_viewability(
        &mut self,
        items: impl IntoIterator<Item = ItemExtent<K>>,
        viewport: Viewport,
        now_ms: u64,
    ) -> Option<ActivityChange<K>> {
        self.layout.clear();
        self.layout.extend(items);
        self.viewport = viewport;
        self.reevaluate(now_ms)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Call this when the UI reports a scroll position change.
    ///
    /// Requests another page when the remaining content is within the end-reached threshold.
    /// Repeated calls near the end are absorbed by the paginator's in-flight guard.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now_ms: u64) -> FeedUpdate<K> {
        self.viewport = Viewport::new(metrics.offset, metrics.viewport);
        let mut update = FeedUpdate {
            activity: self.reevaluate(now_ms),
            ..FeedUpdate::default()
        };

        let threshold = (metrics.viewport as f32 * self.end_reached_threshold) as u64;
        if metrics.distance_from_end() <= threshold {
            atrace!(
                distance = metrics.distance_from_end(),
                threshold,
                "FeedController: end reached"
            );
            update.load_requested = self.paginator.load_more(now_ms);
            update.window_changed = update.load_requested;
        }
        update
    }

    /// Requests another page directly (e.g. from a list's own end-reached event).
    pub fn on_end_reached(&mut self, now_ms: u64) -> bool {
        self.paginator.load_more(now_ms)
    }

    /// Forwards a viewability report produced by the host's own visibility instrumentation.
    ///
    /// Use either this or `on_layout`/`on_scroll`, not both.
    pub fn on_viewable_items_changed(
        &mut self,
        changed: &[ViewToken<K>],
    ) -> Option<ActivityChange<K>> {
        self.activity.on_viewable_items_changed(changed)
    }

    /// Advances pacing delays and viewability dwell timers.
    pub fn tick(&mut self, now_ms: u64) -> FeedUpdate<K> {
        let window_changed = self.paginator.tick(now_ms);
        let activity = match self.viewability.next_deadline_ms() {
            Some(due) if due <= now_ms => self.reevaluate(now_ms),
            _ => None,
        };
        FeedUpdate {
            load_requested: false,
            window_changed,
            activity,
        }
    }

    /// Resets the window to the first page and drops all viewability state.
    ///
    /// Call this after the source list was re-fetched. The previously active item (if any) is
    /// reported as deactivated.
    pub fn refresh(&mut self, now_ms: u64) -> FeedUpdate<K> {
        self.paginator.refresh(now_ms);
        self.layout.clear();
        self.viewability.reset();
        FeedUpdate {
            load_requested: false,
            window_changed: true,
            activity: self.activity.reset(),
        }
    }

    fn reevaluate(&mut self, now_ms: u64) -> Option<ActivityChange<K>> {
        let changed = self.viewability.update(&self.layout, self.viewport, now_ms);
        if changed.is_empty() {
            return None;
        }
        // Full viewable set in index order: the topmost viewable item wins.
        let viewable = self.viewability.viewable_items();
        self.activity.on_viewable_items_changed(&viewable)
    }
}
