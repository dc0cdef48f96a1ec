//! Adapter utilities for the `feedwindow` crate.
//!
//! The `feedwindow` crate only windows a list and reduces viewability reports. This crate
//! provides the framework-neutral pieces a rendering surface usually needs around it:
//!
//! - A viewability evaluator (percent-visible threshold + minimum dwell time) that turns item
//!   layout and scroll position into viewability-change reports
//! - A feed controller that wires scroll metrics, end-of-list detection, pagination, and the
//!   active-item tracker together
//!
//! This crate is intentionally framework-agnostic (no bindings to any UI toolkit).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod key;
mod viewability;

#[cfg(test)]
mod tests;

pub use controller::{DEFAULT_END_REACHED_THRESHOLD, FeedController, FeedUpdate, ScrollMetrics};
pub use key::FeedKey;
pub use viewability::{ItemExtent, ViewabilityTracker, Viewport};
