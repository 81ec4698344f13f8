//! Relq Query - relational operators and plan execution.
//!
//! This crate provides:
//!
//! - `executor`: relational algebra operators (selection, projection, rename,
//!   union, difference, joins, ordering) and the plan runner
//! - `planner`: query plan nodes, join conditions and the stack-based builder
//! - `context`: runner configuration
//!
//! # Example
//!
//! ```
//! use relq_core::Record;
//! use relq_query::executor::{execute, Catalog};
//! use relq_query::planner::{BinaryCondition, JoinType, QueryPlanBuilder};
//!
//! let employees = [1i64, 2]
//!     .into_iter()
//!     .map(|id| Record::from_pairs([("id", id)]))
//!     .collect();
//! let tasks = [1i64, 1, 3]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(task, employee)| {
//!         Record::from_pairs([("task_id", task as i64), ("employee_id", employee)])
//!     })
//!     .collect();
//! let catalog = Catalog::new()
//!     .with_table("employees", employees)
//!     .with_table("tasks", tasks);
//!
//! let plan = QueryPlanBuilder::new()
//!     .scan("employees")
//!     .scan("tasks")
//!     .join(JoinType::LeftOuter, [BinaryCondition::eq("id", "employee_id")])
//!     .build()
//!     .unwrap();
//!
//! let result = execute(&plan, &catalog).unwrap();
//! assert_eq!(result.len(), 3);
//! ```

pub mod context;
pub mod executor;
pub mod planner;

pub use context::RunnerConfig;
pub use executor::{execute, Catalog, DataSource, ExecutionError, ExecutionResult, PlanRunner};
pub use planner::{PlanError, QueryPlan, QueryPlanBuilder};
