//! Relq SQL - parser for SQL-like select statements.
//!
//! The grammar covers a select list, a from list, any number of join clauses
//! and an optional where clause:
//!
//! ```text
//! select id, name from employees
//!     left outer join tasks on id = employee_id
//!     where salary > 10000 and (grade = 2 or grade = 3)
//! ```
//!
//! `and` binds tighter than `or`, and parentheses group. Keywords are case
//! insensitive. Conditions are kept as raw `operand operator operand` text;
//! nothing is resolved against tables or columns.
//!
//! # Usage
//!
//! ```rust
//! use relq_sql::{parse, FilterExpr, JoinKind};
//!
//! let statement = parse("select id from employees join tasks on id = employee_id").unwrap();
//! assert_eq!(statement.select_list, vec!["id"]);
//! assert_eq!(statement.joins[0].kind, JoinKind::Plain);
//! assert!(matches!(statement.joins[0].on, FilterExpr::Condition(_)));
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{ConditionAtom, FilterExpr, JoinClause, JoinKind, Statement};
pub use error::{ParseError, Result};
pub use parser::{parse, parse_filter, MAX_FILTER_DEPTH, MAX_NESTING};
