//! Left outer join.

use crate::executor::join::inner_join;
use crate::executor::{difference, projection, union};
use relq_core::{Record, Table, LEFT};
use tracing::trace;

/// Returns one `{left: row}` record for every row of `left` that has no
/// partner in `right` under `predicate`. The records carry no `right` column.
pub fn unmatched_left<P>(left: &Table, right: &Table, predicate: P) -> Table
where
    P: Fn(&Record, &Record) -> bool,
{
    let matches = inner_join(left, right, predicate);
    unmatched_from_matches(left, &matches)
}

/// Takes the difference of all left rows against the left side of `matches`.
fn unmatched_from_matches(left: &Table, matches: &Table) -> Table {
    let all_left: Table = left.iter().cloned().map(Record::left_only).collect();
    let matched_left = projection(matches, &[LEFT]);
    difference(&all_left, &matched_left)
}

/// Left outer join.
///
/// Returns the inner join of `left` and `right`, plus one `{left: row}`
/// record for each left row without a match. Looking up `right.<column>` on
/// such a record yields null.
pub fn left_outer_join<P>(left: &Table, right: &Table, predicate: P) -> Table
where
    P: Fn(&Record, &Record) -> bool,
{
    let matches = inner_join(left, right, predicate);
    let unmatched = unmatched_from_matches(left, &matches);
    trace!(
        matched = matches.len(),
        unmatched = unmatched.len(),
        "left outer join"
    );
    union(&matches, &unmatched)
}
