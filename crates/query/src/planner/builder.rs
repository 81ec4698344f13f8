//! Stack-based query plan builder.
//!
//! `scan` pushes a leaf, `join` pops its two inputs (right first, then left)
//! and pushes the combined node. `build` consumes the builder and expects
//! exactly one node on the stack.
//!
//! ```
//! use relq_query::planner::{BinaryCondition, JoinType, QueryPlanBuilder};
//!
//! let plan = QueryPlanBuilder::new()
//!     .scan("employees")
//!     .scan("tasks")
//!     .join(JoinType::Inner, [BinaryCondition::eq("id", "employee_id")])
//!     .build()
//!     .unwrap();
//! assert_eq!(plan.tables(), vec!["employees", "tasks"]);
//! ```

use crate::planner::{Condition, JoinType, PlanNode, QueryPlan};
use thiserror::Error;

/// Errors raised while building a plan.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The stack did not hold the number of nodes an operation needs.
    #[error("malformed plan: expected {expected} node(s) on the stack, found {stack_size}")]
    MalformedPlan { expected: usize, stack_size: usize },
}

/// Builds query plans in postfix order.
#[derive(Debug, Default)]
pub struct QueryPlanBuilder {
    stack: Vec<PlanNode>,
    /// First error hit while chaining; reported by `build`.
    error: Option<PlanError>,
}

impl QueryPlanBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a scan of `table`.
    pub fn scan(mut self, table: impl Into<String>) -> Self {
        if self.error.is_none() {
            self.stack.push(PlanNode::scan(table));
        }
        self
    }

    /// Pops the right and then the left input and pushes their join.
    pub fn join<I, C>(mut self, join_type: JoinType, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        if self.error.is_some() {
            return self;
        }
        let stack_size = self.stack.len();
        if stack_size < 2 {
            self.error = Some(PlanError::MalformedPlan {
                expected: 2,
                stack_size,
            });
            return self;
        }

        let right = self.stack.pop();
        let left = self.stack.pop();
        if let (Some(left), Some(right)) = (left, right) {
            let conditions = conditions.into_iter().map(Into::into).collect();
            self.stack
                .push(PlanNode::join(join_type, left, right, conditions));
        }
        self
    }

    /// Returns the number of nodes currently on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Finishes the plan.
    pub fn build(mut self) -> Result<QueryPlan, PlanError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let stack_size = self.stack.len();
        match self.stack.pop() {
            Some(root) if stack_size == 1 => Ok(QueryPlan::new(root)),
            _ => Err(PlanError::MalformedPlan {
                expected: 1,
                stack_size,
            }),
        }
    }
}
