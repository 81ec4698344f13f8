//! Cartesian and inner joins.
//!
//! Every join result row is the record `{left: <left row>, right: <right row>}`.

use relq_core::{Record, Table};
use tracing::trace;

/// Performs a nested loop join, keeping the pairs accepted by `predicate`.
fn nested_loop_join<P>(left: &Table, right: &Table, predicate: P) -> Table
where
    P: Fn(&Record, &Record) -> bool,
{
    let mut result = Table::with_capacity(left.len().min(1024));
    for l in left {
        for r in right {
            if predicate(l, r) {
                result.insert(Record::join(l.clone(), r.clone()));
            }
        }
    }
    result
}

/// Pairs every row of `left` with every row of `right`.
///
/// The result holds `|left| * |right|` rows.
pub fn cross_join(left: &Table, right: &Table) -> Table {
    let result = nested_loop_join(left, right, |_, _| true);
    trace!(left = left.len(), right = right.len(), output = result.len(), "cross join");
    result
}

/// Joins the pairs of rows for which `predicate(left_row, right_row)` holds.
///
/// Equivalent to selecting from the cross join with
/// `r => predicate(r.left, r.right)`.
pub fn inner_join<P>(left: &Table, right: &Table, predicate: P) -> Table
where
    P: Fn(&Record, &Record) -> bool,
{
    let result = nested_loop_join(left, right, predicate);
    trace!(left = left.len(), right = right.len(), output = result.len(), "inner join");
    result
}
