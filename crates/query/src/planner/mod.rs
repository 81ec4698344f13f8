//! Query planner module.

mod builder;
mod plan;

pub use builder::{PlanError, QueryPlanBuilder};
pub use plan::{BinaryCondition, CompareOp, Condition, JoinType, PlanNode, QueryPlan};
