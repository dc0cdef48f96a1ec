use crate::WindowRange;

/// A lightweight, serializable snapshot of the pagination state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
///
/// This is what a rendering surface reads each frame: which indexes to mount (`buffered_range`),
/// which indexes are officially revealed (`visible_range`), and whether to show a loading
/// footer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationState {
    pub visible_range: WindowRange,
    pub buffered_range: WindowRange,
    pub loading: bool,
    pub has_more: bool,
}
