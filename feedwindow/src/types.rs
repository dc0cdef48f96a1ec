/// A half-open index range `[start, end)` into the source list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl WindowRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "WindowRange: start > end ({start} > {end})");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    pub fn contains_range(&self, other: WindowRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn as_range(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }

    /// Widens the range by `buffer` on both sides, clamped to `[0, len)`.
    ///
    /// The result always contains `self` clamped to `len`.
    pub fn buffered(&self, buffer: usize, len: usize) -> WindowRange {
        let end = self.end.saturating_add(buffer).min(len);
        let start = self.start.saturating_sub(buffer).min(end);
        WindowRange { start, end }
    }
}

/// The deferred operation a [`crate::Paginator`] is waiting to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingKind {
    LoadMore,
    Refresh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingOp {
    pub kind: PendingKind,
    /// The host time (ms) at or after which `tick` applies the operation.
    pub due_ms: u64,
}

/// One entry of a viewability report: an item whose viewable state changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewToken<K> {
    pub key: K,
    /// Index in the source list, if the item is still mounted.
    pub index: Option<usize>,
    pub is_viewable: bool,
}

impl<K> ViewToken<K> {
    pub fn viewable(key: K, index: usize) -> Self {
        Self {
            key,
            index: Some(index),
            is_viewable: true,
        }
    }

    pub fn hidden(key: K, index: Option<usize>) -> Self {
        Self {
            key,
            index,
            is_viewable: false,
        }
    }
}

/// Which item, if any, currently owns the exclusive resource.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activity<K> {
    Idle,
    Focused(K),
}

impl<K> Default for Activity<K> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<K> Activity<K> {
    pub fn key(&self) -> Option<&K> {
        match self {
            Self::Idle => None,
            Self::Focused(k) => Some(k),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// A transition of the active item.
///
/// Consumers typically pause `deactivated()` and start `activated()`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityChange<K> {
    pub previous: Activity<K>,
    pub current: Activity<K>,
}

impl<K> ActivityChange<K> {
    pub fn deactivated(&self) -> Option<&K> {
        self.previous.key()
    }

    pub fn activated(&self) -> Option<&K> {
        self.current.key()
    }
}
