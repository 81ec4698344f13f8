//! Table structure.
//!
//! A `Table` is an unordered set of records. Inserting a record equal to one
//! already present is a no-op.

use crate::record::Record;
use hashbrown::HashSet;

/// An unordered, deduplicated collection of records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    rows: HashSet<Record>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: HashSet::with_capacity(capacity),
        }
    }

    /// Adds a record. Returns false if an equal record was already present.
    pub fn insert(&mut self, record: Record) -> bool {
        self.rows.insert(record)
    }

    /// Returns true if the table holds a record equal to `record`.
    pub fn contains(&self, record: &Record) -> bool {
        self.rows.contains(record)
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the records, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter()
    }

    /// Returns the records of both tables.
    pub fn union(&self, other: &Table) -> Table {
        self.rows.union(&other.rows).cloned().collect()
    }

    /// Returns the records of `self` that are not in `other`.
    pub fn difference(&self, other: &Table) -> Table {
        self.rows.difference(&other.rows).cloned().collect()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl Extend<Record> for Table {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = hashbrown::hash_set::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = hashbrown::hash_set::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
