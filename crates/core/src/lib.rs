//! relq Core - Record and table model for the relq relational engine.
//!
//! This crate provides the foundational types:
//!
//! - `Value`: Column values (Null, Boolean, Int, String, nested Record)
//! - `Record`: An immutable, possibly nested, alias-aware tuple
//! - `Table`: An unordered, deduplicated set of records
//! - `Error`: Error types for record operations
//!
//! # Example
//!
//! ```rust
//! use relq_core::{Record, Table, Value};
//!
//! let employee = Record::from_pairs([
//!     ("id", Value::Int(1)),
//!     ("name", Value::from("Dwight K. Schrute")),
//! ]);
//! let task = Record::from_pairs([("id", 2), ("employee_id", 1)]);
//!
//! let row = Record::join(employee, task);
//! assert_eq!(row.get("left.name").as_str(), Some("Dwight K. Schrute"));
//! assert_eq!(row.get("right.employee_id"), &Value::Int(1));
//! assert!(row.get("right.missing").is_null());
//!
//! let table: Table = vec![row.clone(), row].into_iter().collect();
//! assert_eq!(table.len(), 1);
//! ```

mod error;
mod record;
mod table;
mod value;

pub use error::{Error, Result};
pub use record::{Record, RecordBuilder, LEFT, PATH_SEPARATOR, RIGHT};
pub use table::Table;
pub use value::Value;
