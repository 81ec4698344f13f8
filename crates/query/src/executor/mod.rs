//! Query executor module.
//!
//! Relational operators over `Table`s plus the plan runner that drives them.

mod filter;
pub mod join;
mod project;
mod runner;
mod set_ops;
mod sort;

pub use filter::select;
pub use join::{cross_join, inner_join, left_outer_join, unmatched_left};
pub use project::{projection, rename};
pub use runner::{execute, Catalog, DataSource, ExecutionError, ExecutionResult, PlanRunner};
pub use set_ops::{difference, union};
pub use sort::{order_by, order_by_columns, SortOrder};
