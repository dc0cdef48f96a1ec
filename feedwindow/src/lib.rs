//! A headless windowing engine for infinite feeds.
//!
//! For adapter-level utilities (viewability policy, scroll-driven feed controller), see the
//! `feedwindow-adapter` crate.
//!
//! This crate owns two small pieces of state that an infinite-scroll feed needs:
//!
//! - [`Paginator`]: a forward-growing window over an in-memory list, paced so that rapid
//!   "load more" triggers reveal one page at a time, plus a lookahead buffer for mounting.
//! - [`ActivityTracker`]: reduces viewability reports to at most one active item, used to gate
//!   exclusive resources such as video playback.
//!
//! It is UI-agnostic and never touches the items themselves. A UI layer is expected to provide:
//! - the source length (and the source slice when asking for items)
//! - the current time in milliseconds, for pacing delays
//! - viewability reports for mounted items
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod options;
mod paginator;
mod state;
mod tracker;
mod types;


pub use error::ConfigError;
pub use options::{
    DEFAULT_BUFFER_SIZE, DEFAULT_ITEM_VISIBLE_PERCENT_THRESHOLD, DEFAULT_MINIMUM_VIEW_TIME_MS,
    DEFAULT_PACING_DELAY_MS, DEFAULT_PAGE_SIZE, OnChangeCallback, PaginatorOptions,
    ViewabilityConfig,
};
pub use paginator::Paginator;
pub use state::PaginationState;
pub use tracker::ActivityTracker;
pub use types::{Activity, ActivityChange, PendingKind, PendingOp, ViewToken, WindowRange};
