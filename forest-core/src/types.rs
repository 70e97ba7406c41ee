/// Identifier for a tree in a [`crate::forest::Forest`].
///
/// This is an index into `Forest::trees`, and is only meaningful within
/// the lifetime of a given `Forest` instance.
pub type TreeId = usize;

/// Number of growth periods elapsed since the start or the last reset.
///
/// Period `0` is the initial state; `history[p]` of a tree is its height
/// after period `p`.
pub type Period = usize;
