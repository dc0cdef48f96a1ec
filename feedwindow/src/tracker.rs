use crate::{Activity, ActivityChange, ViewToken};

/// Reduces viewability reports to a single active item.
///
/// The rule is first-match, not best-match: the first viewable entry of the latest report
/// becomes active, and a report with no viewable entry makes the tracker idle. Report order is
/// whatever the rendering surface produced (normally document order).
///
/// The tracker holds no reference to players or other resources. Consumers compare their own
/// key with [`ActivityTracker::is_active`], or react to the returned [`ActivityChange`].
#[derive(Clone, Debug)]
pub struct ActivityTracker<K> {
    activity: Activity<K>,
    reports_seen: u64,
}

impl<K> Default for ActivityTracker<K> {
    fn default() -> Self {
        Self {
            activity: Activity::Idle,
            reports_seen: 0,
        }
    }
}

impl<K: Clone + PartialEq> ActivityTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(&self) -> &Activity<K> {
        &self.activity
    }

    pub fn active_key(&self) -> Option<&K> {
        self.activity.key()
    }

    /// The per-item `is_visible` flag: `true` only for the active item.
    pub fn is_active(&self, key: &K) -> bool {
        self.active_key() == Some(key)
    }

    /// Number of reports processed since creation or the last `reset`.
    pub fn reports_seen(&self) -> u64 {
        self.reports_seen
    }

    /// Applies one viewability-change report.
    ///
    /// Returns the transition when the active item changed, `None` otherwise. Replaying the same
    /// report is therefore a no-op.
    pub fn on_viewable_items_changed(
        &mut self,
        changed: &[ViewToken<K>],
    ) -> Option<ActivityChange<K>> {
        self.apply_report(changed.iter().map(|t| (&t.key, t.is_viewable)))
    }

    /// Same as [`ActivityTracker::on_viewable_items_changed`] for reports that are not stored as
    /// [`ViewToken`]s.
    pub fn apply_report<'a>(
        &mut self,
        report: impl IntoIterator<Item = (&'a K, bool)>,
    ) -> Option<ActivityChange<K>>
    where
        K: 'a,
    {
        self.reports_seen = self.reports_seen.saturating_add(1);
        let next = match report.into_iter().find(|(_, viewable)| *viewable) {
            Some((key, _)) => Activity::Focused(key.clone()),
            None => Activity::Idle,
        };
        self.transition(next)
    }

    /// Forces the tracker back to idle (e.g. after the list was refreshed).
    pub fn reset(&mut self) -> Option<ActivityChange<K>> {
        self.reports_seen = 0;
        self.transition(Activity::Idle)
    }

    fn transition(&mut self, next: Activity<K>) -> Option<ActivityChange<K>> {
        if next == self.activity {
            return None;
        }
        let previous = core::mem::replace(&mut self.activity, next);
        ftrace!(
            idle = self.activity.is_idle(),
            reports_seen = self.reports_seen,
            "ActivityTracker: active item changed"
        );
        Some(ActivityChange {
            previous,
            current: self.activity.clone(),
        })
    }
}
