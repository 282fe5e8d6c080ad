//! Active-item matching
//!
//! Highlighting is derived from the current route every time a view is
//! built. Nothing stores an "active" flag.

/// Whether an item with `path` is the active one for `current`
pub fn is_active(path: Option<&str>, current: Option<&str>) -> bool {
    match (path, current) {
        (Some(path), Some(current)) => path == current,
        _ => false,
    }
}

/// Index of the single active item, if any
///
/// When several items share the current route only the first is active, so
/// at most one item is ever highlighted.
pub fn active_index<'a, I>(paths: I, current: Option<&str>) -> Option<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    current?;
    paths
        .into_iter()
        .position(|path| is_active(path, current))
}
