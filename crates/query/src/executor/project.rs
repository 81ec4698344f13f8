//! Projection and rename.

use relq_core::{Record, Table};
use std::collections::BTreeMap;

/// Projects every record of `table` onto `columns`.
///
/// Records that become equal after projection collapse into one.
pub fn projection<S>(table: &Table, columns: &[S]) -> Table
where
    S: AsRef<str>,
{
    let columns: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
    table.iter().map(|r| r.projection(&columns)).collect()
}

/// Renames columns by an `old name -> new name` mapping.
///
/// The mapping is attached to every record as an alias map, replacing any
/// previous one. Stored data is left untouched, so renamed records still
/// compare equal to their sources.
pub fn rename<K, V>(table: &Table, mapping: &[(K, V)]) -> Table
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mapping: BTreeMap<String, String> = mapping
        .iter()
        .map(|(old, new)| (old.as_ref().to_string(), new.as_ref().to_string()))
        .collect();
    table.iter().map(|r| r.renamed(&mapping)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::Value;

    fn employees() -> Table {
        vec![
            Record::from_pairs([
                ("id", Value::Int(0)),
                ("name", Value::from("Michael Scott")),
                ("position", Value::from("Regional Manager")),
            ]),
            Record::from_pairs([
                ("id", Value::Int(3)),
                ("name", Value::from("James Halpert")),
                ("position", Value::from("Sales")),
            ]),
            Record::from_pairs([
                ("id", Value::Int(4)),
                ("name", Value::from("Stanley Hudson")),
                ("position", Value::from("Sales")),
            ]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_projection() {
        let result = projection(&employees(), &["id", "name"]);
        assert_eq!(result.len(), 3);
        assert!(result.contains(&Record::from_pairs([
            ("id", Value::Int(3)),
            ("name", Value::from("James Halpert")),
        ])));
    }

    #[test]
    fn test_projection_collapses_duplicates() {
        let result = projection(&employees(), &["position"]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_projection_idempotent() {
        let once = projection(&employees(), &["name", "position"]);
        let twice = projection(&once, &["name", "position"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rename() {
        let result = rename(&employees(), &[("id", "employee_id")]);
        assert_eq!(result, employees());
        for record in result.iter() {
            assert_eq!(record.get("employee_id"), record.get("id"));
            assert!(!record.get("employee_id").is_null());
        }
    }

    #[test]
    fn test_rename_then_project() {
        let renamed = rename(&employees(), &[("id", "employee_id")]);
        let result = projection(&renamed, &["employee_id"]);
        let expected: Table = [0, 3, 4]
            .into_iter()
            .map(|id| Record::from_pairs([("employee_id", id)]))
            .collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_rename_replaces_previous_aliases() {
        let once = rename(&employees(), &[("id", "employee_id")]);
        let twice = rename(&once, &[("name", "full_name")]);
        for record in twice.iter() {
            assert!(record.get("employee_id").is_null());
            assert!(!record.get("full_name").is_null());
        }
    }
}
