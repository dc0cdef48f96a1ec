use alloc::sync::Arc;

use crate::ConfigError;
use crate::paginator::Paginator;

pub const DEFAULT_PAGE_SIZE: usize = 15;
pub const DEFAULT_BUFFER_SIZE: usize = 10;
pub const DEFAULT_PACING_DELAY_MS: u64 = 200;

pub const DEFAULT_ITEM_VISIBLE_PERCENT_THRESHOLD: u8 = 50;
pub const DEFAULT_MINIMUM_VIEW_TIME_MS: u64 = 300;

/// A callback fired when the paginator's window or loading state changes.
///
/// The second argument is `loading`.
pub type OnChangeCallback = Arc<dyn Fn(&Paginator, bool) + Send + Sync>;

/// Configuration for [`crate::Paginator`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
pub struct PaginatorOptions {
    /// How many items one `load_more` reveals, and the size of the initial window.
    pub page_size: usize,
    /// How many items before/after the visible window stay mounted.
    pub buffer_size: usize,
    /// Delay between `load_more`/`refresh` and the moment their effect is applied.
    ///
    /// The delay keeps an end-of-list trigger that fires on every scroll event from revealing
    /// the whole remaining list in a single frame. `0` applies effects synchronously.
    pub pacing_delay_ms: u64,
    pub on_change: Option<OnChangeCallback>,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            pacing_delay_ms: DEFAULT_PACING_DELAY_MS,
            on_change: None,
        }
    }
}

impl Clone for PaginatorOptions {
    fn clone(&self) -> Self {
        Self {
            page_size: self.page_size,
            buffer_size: self.buffer_size,
            pacing_delay_ms: self.pacing_delay_ms,
            on_change: self.on_change.clone(),
        }
    }
}

impl PaginatorOptions {
    pub fn new(page_size: usize, buffer_size: usize) -> Self {
        Self {
            page_size,
            buffer_size,
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_pacing_delay_ms(mut self, delay_ms: u64) -> Self {
        self.pacing_delay_ms = delay_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Paginator, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}

impl core::fmt::Debug for PaginatorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PaginatorOptions")
            .field("page_size", &self.page_size)
            .field("buffer_size", &self.buffer_size)
            .field("pacing_delay_ms", &self.pacing_delay_ms)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Viewability policy shared by the rendering surface and the activity tracker.
///
/// The core does not interpret these values; [`crate::ActivityTracker`] trusts that reports
/// were already filtered by them. `feedwindow-adapter` ships an evaluator that applies them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewabilityConfig {
    /// Percentage (`0..=100`) of an item that must be inside the viewport. `0` means any overlap.
    pub item_visible_percent_threshold: u8,
    /// How long an item must stay above the threshold before it counts as viewable.
    pub minimum_view_time_ms: u64,
}

impl Default for ViewabilityConfig {
    fn default() -> Self {
        Self {
            item_visible_percent_threshold: DEFAULT_ITEM_VISIBLE_PERCENT_THRESHOLD,
            minimum_view_time_ms: DEFAULT_MINIMUM_VIEW_TIME_MS,
        }
    }
}

impl ViewabilityConfig {
    pub fn new(item_visible_percent_threshold: u8, minimum_view_time_ms: u64) -> Self {
        Self {
            item_visible_percent_threshold,
            minimum_view_time_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_visible_percent_threshold > 100 {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.item_visible_percent_threshold,
            });
        }
        Ok(())
    }
}
