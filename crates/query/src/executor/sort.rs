//! Ordering.
//!
//! Ordering is the only operation that produces a sequence instead of a
//! table.

use relq_core::{Record, Table};
use std::cmp::Ordering;

/// Sort order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Returns the records of `table` ordered by a three-way comparator.
///
/// The sort is stable. Rows are first put in their structural order, so
/// rows the comparator considers equal always come out in the same order.
pub fn order_by<F>(table: &Table, comparator: F) -> Vec<Record>
where
    F: Fn(&Record, &Record) -> Ordering,
{
    let mut rows: Vec<Record> = table.iter().cloned().collect();
    rows.sort_unstable();
    rows.sort_by(|a, b| comparator(a, b));
    rows
}

/// Orders records by a list of dotted paths, each ascending or descending.
/// Null sorts first in ascending order.
pub fn order_by_columns<S>(table: &Table, order_by: &[(S, SortOrder)]) -> Vec<Record>
where
    S: AsRef<str>,
{
    self::order_by(table, |a, b| compare_columns(a, b, order_by))
}

fn compare_columns<S: AsRef<str>>(a: &Record, b: &Record, order_by: &[(S, SortOrder)]) -> Ordering {
    for (column, order) in order_by {
        let cmp = a.get(column.as_ref()).cmp(b.get(column.as_ref()));
        if cmp != Ordering::Equal {
            return match order {
                SortOrder::Asc => cmp,
                SortOrder::Desc => cmp.reverse(),
            };
        }
    }
    Ordering::Equal
}
