use alloc::vec::Vec;

use feedwindow::{ConfigError, ViewToken, ViewabilityConfig};

use crate::FeedKey;
use crate::key::KeyMap;

/// The scroll viewport along the list's main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub offset: u64,
    pub size: u32,
}

impl Viewport {
    pub fn new(offset: u64, size: u32) -> Self {
        Self { offset, size }
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// Layout of one mounted item along the main axis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemExtent<K> {
    pub key: K,
    pub index: usize,
    pub start: u64,
    pub size: u32,
}

impl<K> ItemExtent<K> {
    pub fn new(key: K, index: usize, start: u64, size: u32) -> Self {
        Self {
            key,
            index,
            start,
            size,
        }
    }

    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }

    /// Length of the part of this item inside `viewport`.
    pub fn overlap(&self, viewport: Viewport) -> u64 {
        let start = self.start.max(viewport.offset);
        let end = self.end().min(viewport.end());
        end.saturating_sub(start)
    }
}

/// Applies a [`ViewabilityConfig`] to item layout and produces viewability-change reports.
///
/// An item is a *candidate* while at least `item_visible_percent_threshold` percent of it is
/// inside the viewport. It becomes *viewable* once it has been a candidate for
/// `minimum_view_time_ms`, and stops being viewable as soon as it drops below the threshold or
/// is no longer mounted. Zero-size items are never viewable.
///
/// Dwell time only advances when you call [`ViewabilityTracker::update`]; use
/// [`ViewabilityTracker::next_deadline_ms`] to know when to call it again without new layout.
#[derive(Clone, Debug)]
pub struct ViewabilityTracker<K: FeedKey> {
    config: ViewabilityConfig,
    // Key -> time it first met the threshold.
    candidates: KeyMap<K, u64>,
    // Key -> index at which it was last reported viewable.
    viewable: KeyMap<K, usize>,
}

impl<K: FeedKey> ViewabilityTracker<K> {
    /// Creates a tracker. A threshold above 100 is clamped to 100.
    pub fn new(mut config: ViewabilityConfig) -> Self {
        if config.validate().is_err() {
            awarn!(
                threshold = config.item_visible_percent_threshold,
                "ViewabilityTracker: threshold clamped to 100"
            );
            config.item_visible_percent_threshold = 100;
        }
        Self {
            config,
            candidates: KeyMap::new(),
            viewable: KeyMap::new(),
        }
    }

    pub fn try_new(config: ViewabilityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> ViewabilityConfig {
        self.config
    }

    /// Replaces the policy. Dwell timers already running keep their start time.
    pub fn set_config(&mut self, config: ViewabilityConfig) {
        let mut config = config;
        if config.validate().is_err() {
            awarn!(
                threshold = config.item_visible_percent_threshold,
                "ViewabilityTracker: threshold clamped to 100"
            );
            config.item_visible_percent_threshold = 100;
        }
        self.config = config;
    }

    pub fn is_viewable(&self, key: &K) -> bool {
        self.viewable.contains_key(key)
    }

    pub fn viewable_count(&self) -> usize {
        self.viewable.len()
    }

    /// Returns every currently viewable item, in index order.
    pub fn viewable_items(&self) -> Vec<ViewToken<K>> {
        let mut out: Vec<ViewToken<K>> = self
            .viewable
            .iter()
            .map(|(key, &index)| ViewToken::viewable(key.clone(), index))
            .collect();
        out.sort_by_key(|t| t.index);
        out
    }

    /// The earliest time at which a pending candidate will have dwelled long enough.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.candidates
            .iter()
            .filter(|(key, _)| !self.viewable.contains_key(*key))
            .map(|(_, &since)| since.saturating_add(self.config.minimum_view_time_ms))
            .min()
    }

    fn meets_threshold(&self, item: &ItemExtent<K>, viewport: Viewport) -> bool {
        if item.size == 0 {
            return false;
        }
        let overlap = item.overlap(viewport);
        let threshold = self.config.item_visible_percent_threshold as u64;
        if threshold == 0 {
            return overlap > 0;
        }
        overlap.saturating_mul(100) >= threshold.saturating_mul(item.size as u64)
    }

    /// Evaluates the policy for the currently mounted items.
    ///
    /// `items` should be in document order, one entry per key (later duplicates are ignored).
    /// Returns only the items whose viewable state changed: mounted items first (in the given
    /// order), then previously viewable items that are no longer mounted (with `index: None`).
    pub fn update(
        &mut self,
        items: &[ItemExtent<K>],
        viewport: Viewport,
        now_ms: u64,
    ) -> Vec<ViewToken<K>> {
        let mut mounted = KeyMap::<K, usize>::new();
        let mut unique: Vec<&ItemExtent<K>> = Vec::with_capacity(items.len());
        for item in items {
            if mounted.contains_key(&item.key) {
                awarn!(
                    index = item.index,
                    "ViewabilityTracker: duplicate key in layout ignored"
                );
                continue;
            }
            mounted.insert(item.key.clone(), item.index);
            unique.push(item);
        }

        let mut candidates = KeyMap::<K, u64>::new();
        let mut viewable = KeyMap::<K, usize>::new();

        for &item in &unique {
            if !self.meets_threshold(item, viewport) {
                continue;
            }
            let since = self.candidates.get(&item.key).copied().unwrap_or(now_ms);
            candidates.insert(item.key.clone(), since);
            if now_ms.saturating_sub(since) >= self.config.minimum_view_time_ms {
                viewable.insert(item.key.clone(), item.index);
            }
        }

        let mut changed = Vec::new();
        for &item in &unique {
            let was = self.viewable.contains_key(&item.key);
            let is = viewable.contains_key(&item.key);
            if was != is {
                changed.push(ViewToken {
                    key: item.key.clone(),
                    index: Some(item.index),
                    is_viewable: is,
                });
            }
        }

        let mut unmounted: Vec<(usize, K)> = self
            .viewable
            .iter()
            .filter(|(key, _)| !mounted.contains_key(*key))
            .map(|(key, &index)| (index, key.clone()))
            .collect();
        unmounted.sort_by_key(|(index, _)| *index);
        changed.extend(
            unmounted
                .into_iter()
                .map(|(_, key)| ViewToken::hidden(key, None)),
        );

        atrace!(
            mounted = items.len(),
            viewable = viewable.len(),
            changed = changed.len(),
            now_ms,
            "ViewabilityTracker::update"
        );
        self.candidates = candidates;
        self.viewable = viewable;
        changed
    }

    /// Forgets all dwell timers and viewable items (e.g. after the list was replaced).
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.viewable.clear();
    }
}
