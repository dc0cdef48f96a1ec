use core::cell::Cell;

use crate::{ConfigError, PaginationState, PaginatorOptions, PendingKind, PendingOp, WindowRange};

/// A forward-growing, paced window over an in-memory list.
///
/// This type is intentionally UI-agnostic:
/// - It never owns or mutates the list. It only tracks its length (`count`); pass the slice to
///   [`Paginator::items`] to get the items to mount.
/// - Time is driven by your adapter: `load_more`/`refresh` take `now_ms`, and `tick(now_ms)`
///   applies the deferred effect once the pacing delay has elapsed.
///
/// The window starts at `[0, page_size)` and only grows (by `page_size` per `load_more`) until
/// `refresh` resets it. At most one operation is in flight: `load_more` while `loading()` is
/// `true` is a no-op.
#[derive(Clone, Debug)]
pub struct Paginator {
    options: PaginatorOptions,
    count: usize,
    // Requested window end; the visible end is this clamped to `count`.
    requested_end: usize,
    loading: bool,
    pending: Option<PendingOp>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Paginator {
    /// Creates a paginator over a list of `count` items.
    ///
    /// A `page_size` of zero is clamped to 1. Use [`Paginator::try_new`] to reject it instead.
    pub fn new(count: usize, mut options: PaginatorOptions) -> Self {
        if options.page_size == 0 {
            fwarn!("Paginator::new: page_size=0 clamped to 1");
            options.page_size = 1;
        }
        fdebug!(
            count,
            page_size = options.page_size,
            buffer_size = options.buffer_size,
            pacing_delay_ms = options.pacing_delay_ms,
            "Paginator::new"
        );
        Self {
            count,
            requested_end: options.page_size,
            loading: false,
            pending: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn try_new(count: usize, options: PaginatorOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self::new(count, options))
    }

    pub fn options(&self) -> &PaginatorOptions {
        &self.options
    }

    /// Replaces the options. The current window and any pending operation are kept.
    pub fn set_options(&mut self, mut options: PaginatorOptions) {
        if options.page_size == 0 {
            fwarn!("Paginator::set_options: page_size=0 clamped to 1");
            options.page_size = 1;
        }
        self.options = options;
        ftrace!(
            page_size = self.options.page_size,
            buffer_size = self.options.buffer_size,
            "Paginator::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut PaginatorOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.update_options(|o| o.page_size = page_size);
    }

    pub fn set_buffer_size(&mut self, buffer_size: usize) {
        self.update_options(|o| o.buffer_size = buffer_size);
    }

    pub fn set_pacing_delay_ms(&mut self, delay_ms: u64) {
        self.options.pacing_delay_ms = delay_ms;
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Paginator, bool) + Send + Sync + 'static>,
    ) {
        self.update_options(|o| {
            o.on_change = on_change.map(|f| alloc::sync::Arc::new(f) as _);
        });
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.loading);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Call this after the list was replaced or appended to.
    ///
    /// Growing the list never reveals more than the requested window; shrinking it clamps the
    /// visible window to the new length.
    pub fn set_count(&mut self, count: usize) {
        if self.count == count {
            return;
        }
        ftrace!(prev = self.count, count, "Paginator::set_count");
        self.count = count;
        self.notify();
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn buffer_size(&self) -> usize {
        self.options.buffer_size
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.visible_range().end < self.count
    }

    pub fn pending(&self) -> Option<PendingOp> {
        self.pending
    }

    /// When the pending operation becomes due, if any. Adapters can use this to arm a timer
    /// instead of ticking every frame.
    pub fn pending_until(&self) -> Option<u64> {
        self.pending.map(|p| p.due_ms)
    }

    /// The officially revealed window (no buffer).
    pub fn visible_range(&self) -> WindowRange {
        WindowRange::new(0, self.requested_end.min(self.count))
    }

    /// The visible window widened by `buffer_size` on both sides, clamped to `[0, count)`.
    pub fn buffered_range(&self) -> WindowRange {
        self.visible_range().buffered(self.options.buffer_size, self.count)
    }

    /// Returns the buffered slice of `data` (what the rendering surface should mount).
    ///
    /// `data` should be the list whose length was last passed to `set_count`. If it is not, the
    /// result is still clamped to `data.len()`.
    pub fn items<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        self.slice(data, self.buffered_range())
    }

    /// Returns the visible slice of `data` (no buffer).
    pub fn visible_items<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        self.slice(data, self.visible_range())
    }

    fn slice<'a, T>(&self, data: &'a [T], range: WindowRange) -> &'a [T] {
        if data.len() != self.count {
            fwarn!(
                len = data.len(),
                count = self.count,
                "Paginator: slice length differs from count (missing set_count?)"
            );
        }
        let end = range.end.min(data.len());
        let start = range.start.min(end);
        &data[start..end]
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> PaginationState {
        PaginationState {
            visible_range: self.visible_range(),
            buffered_range: self.buffered_range(),
            loading: self.loading,
            has_more: self.has_more(),
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading == loading {
            return;
        }
        self.loading = loading;
        self.notify();
    }

    /// Requests one more page.
    ///
    /// Returns `false` (and changes nothing) while a previous operation is in flight or when
    /// the window already covers the whole list. Otherwise marks the paginator as loading and
    /// schedules the expansion for `now_ms + pacing_delay_ms`.
    pub fn load_more(&mut self, now_ms: u64) -> bool {
        if self.loading {
            ftrace!(now_ms, "load_more ignored: in flight");
            return false;
        }
        if !self.has_more() {
            ftrace!(now_ms, count = self.count, "load_more ignored: exhausted");
            return false;
        }

        let due_ms = now_ms.saturating_add(self.options.pacing_delay_ms);
        ftrace!(
            now_ms,
            due_ms,
            end = self.visible_range().end,
            "load_more scheduled"
        );
        self.batch_update(|p| {
            p.pending = Some(PendingOp {
                kind: PendingKind::LoadMore,
                due_ms,
            });
            p.set_loading(true);
            if p.options.pacing_delay_ms == 0 {
                p.apply_pending();
            }
        });
        true
    }

    /// Resets the window to the first page and holds `loading` for one pacing delay.
    ///
    /// Always accepted. A pending `load_more` is dropped so it cannot re-grow the fresh window.
    /// Returns the time at which `loading` clears.
    pub fn refresh(&mut self, now_ms: u64) -> u64 {
        let due_ms = now_ms.saturating_add(self.options.pacing_delay_ms);
        if matches!(self.pending, Some(op) if op.kind == PendingKind::LoadMore) {
            fdebug!(now_ms, "refresh supersedes pending load_more");
        }
        fdebug!(now_ms, due_ms, count = self.count, "Paginator::refresh");
        self.batch_update(|p| {
            if p.requested_end != p.options.page_size {
                p.requested_end = p.options.page_size;
                p.notify();
            }
            p.pending = Some(PendingOp {
                kind: PendingKind::Refresh,
                due_ms,
            });
            p.set_loading(true);
            if p.options.pacing_delay_ms == 0 {
                p.apply_pending();
            }
        });
        due_ms
    }

    /// Applies the pending operation if it is due.
    ///
    /// Returns `true` when an operation was applied.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(op) = self.pending else {
            return false;
        };
        if now_ms < op.due_ms {
            return false;
        }
        self.batch_update(|p| p.apply_pending());
        true
    }

    fn apply_pending(&mut self) {
        let Some(op) = self.pending.take() else {
            return;
        };
        if op.kind == PendingKind::LoadMore {
            let end = self.visible_range().end;
            let next = end.saturating_add(self.options.page_size).min(self.count);
            if next > self.requested_end {
                self.requested_end = next;
                self.notify();
            }
            ftrace!(end = next, count = self.count, "load_more applied");
        } else {
            ftrace!("refresh settled");
        }
        self.set_loading(false);
    }
}
