//! Set union and difference.

use relq_core::Table;

/// Returns every record in `left` or `right`.
pub fn union(left: &Table, right: &Table) -> Table {
    left.union(right)
}

/// Returns the records of `left` that are not in `right`.
pub fn difference(left: &Table, right: &Table) -> Table {
    left.difference(right)
}
