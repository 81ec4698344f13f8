//! Selection.

use relq_core::{Record, Table};

/// Returns the records of `table` for which `predicate` holds.
pub fn select<P>(table: &Table, predicate: P) -> Table
where
    P: Fn(&Record) -> bool,
{
    table.iter().filter(|r| predicate(*r)).cloned().collect()
}
