//! Record structure.
//!
//! A `Record` is an immutable mapping from column name to `Value`. Columns
//! can hold nested records, which are addressed through dotted paths such as
//! `left.id`. A record may also carry an alias map that rewrites external
//! names onto real paths at lookup time.
//!
//! Equality, ordering and hashing only consider the stored data. Entries are
//! kept in a key-sorted map, so the construction order of the columns never
//! affects identity.

use crate::error::{Error, Result};
use crate::value::Value;
use std::collections::BTreeMap;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Separator between segments of a dotted path.
pub const PATH_SEPARATOR: char = '.';

/// Column name of the left side of a joined record.
pub const LEFT: &str = "left";

/// Column name of the right side of a joined record.
pub const RIGHT: &str = "right";

static NULL: Value = Value::Null;

/// An immutable, possibly nested record.
#[derive(Clone, Debug, Default)]
pub struct Record {
    /// Column data, shared between clones.
    data: Arc<BTreeMap<String, Value>>,
    /// Alias name -> real dotted path.
    aliases: Option<Arc<BTreeMap<String, String>>>,
}

impl Record {
    /// Creates a record from a column map.
    pub fn new(data: BTreeMap<String, Value>) -> Self {
        Self {
            data: Arc::new(data),
            aliases: None,
        }
    }

    /// Creates a record from flat `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Creates a nested record from `(dotted path, value)` pairs.
    ///
    /// Intermediate records are created for every path prefix. Shorter paths
    /// are placed first; a deeper path below a nested record value extends
    /// that record.
    pub fn from_paths<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut entries: Vec<(String, Value)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| {
            segment_count(a)
                .cmp(&segment_count(b))
                .then_with(|| a.cmp(b))
        });

        let mut root = BTreeMap::new();
        for (path, value) in entries {
            let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
            insert_path(&mut root, &segments, value);
        }
        Self::new(into_columns(root))
    }

    /// Creates the joined record `{left: .., right: ..}`.
    pub fn join(left: Record, right: Record) -> Self {
        Self::from_pairs([(LEFT, Value::Record(left)), (RIGHT, Value::Record(right))])
    }

    /// Creates the joined record `{left: ..}` for an unmatched outer row.
    pub fn left_only(left: Record) -> Self {
        Self::from_pairs([(LEFT, Value::Record(left))])
    }

    /// Returns a record with the same data and the given alias map
    /// (alias -> real path), replacing any previous one.
    pub fn with_aliases(&self, aliases: BTreeMap<String, String>) -> Self {
        Self {
            data: Arc::clone(&self.data),
            aliases: if aliases.is_empty() {
                None
            } else {
                Some(Arc::new(aliases))
            },
        }
    }

    /// Returns a record renamed by an `old name -> new name` mapping.
    pub fn renamed(&self, mapping: &BTreeMap<String, String>) -> Self {
        let inverted = mapping
            .iter()
            .map(|(old, new)| (new.clone(), old.clone()))
            .collect();
        self.with_aliases(inverted)
    }

    /// Returns the alias map (alias -> real path), if any.
    pub fn aliases(&self) -> Option<&BTreeMap<String, String>> {
        self.aliases.as_deref()
    }

    /// Looks a column up by name.
    ///
    /// The name is first rewritten through the alias map, then resolved as a
    /// dotted path. Missing columns resolve to `Value::Null`.
    pub fn get(&self, name: &str) -> &Value {
        self.resolve(name).unwrap_or(&NULL)
    }

    /// Returns true if `name` resolves to a stored column.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    fn resolve(&self, name: &str) -> Option<&Value> {
        let path = self
            .aliases
            .as_ref()
            .and_then(|aliases| aliases.get(name))
            .map(String::as_str)
            .unwrap_or(name);

        let mut record = self;
        let mut segments = path.split(PATH_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            let value = record.data.get(segment)?;
            if segments.peek().is_none() {
                return Some(value);
            }
            record = value.as_record()?;
        }
        None
    }

    /// Returns every addressable column as a dotted path, sorted.
    pub fn columns(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_columns("", &mut names);
        names.sort();
        names
    }

    fn collect_columns(&self, prefix: &str, names: &mut Vec<String>) {
        for (key, value) in self.data.iter() {
            let name = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, PATH_SEPARATOR, key)
            };
            match value {
                Value::Record(nested) => nested.collect_columns(&name, names),
                _ => names.push(name),
            }
        }
    }

    /// Builds a new record holding exactly the requested columns.
    ///
    /// Dotted names rebuild their nesting; names that do not resolve are
    /// projected as `Value::Null`. A name reaching below a projected scalar
    /// keeps the scalar and adds nothing.
    pub fn projection<I, S>(&self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_paths(columns.into_iter().map(|name| {
            let name = name.as_ref();
            (name.to_string(), self.get(name).clone())
        }))
    }

    /// Records cannot be modified once built; this always fails.
    pub fn set(&self, column: &str, _value: impl Into<Value>) -> Result<()> {
        Err(Error::immutable_record(column))
    }

    /// Returns the top-level columns and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Returns the number of top-level columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this record has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn segment_count(path: &str) -> usize {
    path.matches(PATH_SEPARATOR).count()
}

/// Projection tree used while rebuilding nesting from dotted paths.
enum Slot {
    Leaf(Value),
    Branch(BTreeMap<String, Slot>),
}

impl Slot {
    /// Turns a nested record leaf into a branch holding its columns.
    /// Scalar leaves stay as they are.
    fn expand(&mut self) {
        if let Slot::Leaf(Value::Record(r)) = self {
            let children = r
                .iter()
                .map(|(k, v)| (k.clone(), Slot::Leaf(v.clone())))
                .collect();
            *self = Slot::Branch(children);
        }
    }

    fn into_value(self) -> Value {
        match self {
            Slot::Leaf(value) => value,
            Slot::Branch(children) => Value::Record(Record::new(into_columns(children))),
        }
    }
}

fn insert_path(node: &mut BTreeMap<String, Slot>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            node.insert((*last).to_string(), Slot::Leaf(value));
        }
        [head, rest @ ..] => {
            let slot = node
                .entry((*head).to_string())
                .or_insert_with(|| Slot::Branch(BTreeMap::new()));
            slot.expand();
            // Paths below a scalar are dropped.
            if let Slot::Branch(children) = slot {
                insert_path(children, rest, value);
            }
        }
    }
}

fn into_columns(tree: BTreeMap<String, Slot>) -> BTreeMap<String, Value> {
    tree.into_iter()
        .map(|(k, slot)| (k, slot.into_value()))
        .collect()
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.data == other.data
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data.cmp(&other.data)
    }
}

impl fmt::Display for Record {
    /// Renders the flattened columns, showing aliases in place of the paths
    /// they stand for.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_names: BTreeMap<&str, &str> = self
            .aliases
            .iter()
            .flat_map(|aliases| aliases.iter())
            .map(|(alias, path)| (path.as_str(), alias.as_str()))
            .collect();

        f.write_str("{")?;
        for (i, column) in self.columns().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let name = display_names
                .get(column.as_str())
                .copied()
                .unwrap_or(column.as_str());
            write!(f, "{}: {}", name, self.get(column))?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Builder for records that refuses to overwrite a column.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    data: BTreeMap<String, Value>,
}

impl RecordBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column. Setting the same column twice fails.
    pub fn column(mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let name = name.into();
        if self.data.contains_key(&name) {
            return Err(Error::ImmutableRecord { column: name });
        }
        self.data.insert(name, value.into());
        Ok(self)
    }

    /// Finishes the record.
    pub fn build(self) -> Record {
        Record::new(self.data)
    }
}
