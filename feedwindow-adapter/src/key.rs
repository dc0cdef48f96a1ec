#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bound for item keys tracked by the adapter (post ids and the like).
#[cfg(feature = "std")]
pub trait FeedKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> FeedKey for T {}

#[cfg(not(feature = "std"))]
pub trait FeedKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> FeedKey for T {}
