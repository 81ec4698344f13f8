//! Plan runner - evaluates query plans against a catalog of tables.
//!
//! The runner recursively evaluates plan nodes: scans read tables from a
//! `DataSource`, joins evaluate both inputs and hand them to the join
//! operators with the conjunction of the node's conditions.

use crate::context::RunnerConfig;
use crate::executor::{cross_join, inner_join, left_outer_join};
use crate::planner::{Condition, JoinType, PlanNode, QueryPlan};
use hashbrown::HashMap;
use relq_core::{Record, Table};
use std::collections::{BTreeMap, HashMap as StdHashMap};
use std::hash::BuildHasher;
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for plan execution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// A scan named a table the catalog does not hold.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// The plan is deeper than the configured limit.
    #[error("plan depth {depth} exceeds the limit of {max_depth}")]
    PlanTooDeep { depth: usize, max_depth: usize },
}

/// Result type for plan execution.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Provides tables by name.
pub trait DataSource {
    /// Returns the table called `name`, if any.
    fn table(&self, name: &str) -> Option<&Table>;
}

impl<S: BuildHasher> DataSource for StdHashMap<String, Table, S> {
    fn table(&self, name: &str) -> Option<&Table> {
        self.get(name)
    }
}

impl DataSource for BTreeMap<String, Table> {
    fn table(&self, name: &str) -> Option<&Table> {
        self.get(name)
    }
}

/// In-memory mapping from table name to table.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a table.
    pub fn add_table(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// Adds a table, builder style.
    pub fn with_table(mut self, name: impl Into<String>, table: Table) -> Self {
        self.add_table(name, table);
        self
    }

    /// Returns the number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the catalog holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl DataSource for Catalog {
    fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}

/// Plan runner - executes query plans.
pub struct PlanRunner<'a, D: DataSource> {
    data_source: &'a D,
    config: RunnerConfig,
}

impl<'a, D: DataSource> PlanRunner<'a, D> {
    /// Creates a runner with the default configuration.
    pub fn new(data_source: &'a D) -> Self {
        Self::with_config(data_source, RunnerConfig::default())
    }

    /// Creates a runner with an explicit configuration.
    pub fn with_config(data_source: &'a D, config: RunnerConfig) -> Self {
        Self {
            data_source,
            config,
        }
    }

    /// Executes a plan and returns the result table.
    pub fn execute(&self, plan: &QueryPlan) -> ExecutionResult<Table> {
        let depth = plan.depth();
        if depth > self.config.max_depth {
            return Err(ExecutionError::PlanTooDeep {
                depth,
                max_depth: self.config.max_depth,
            });
        }
        self.execute_node(plan.root())
    }

    fn execute_node(&self, node: &PlanNode) -> ExecutionResult<Table> {
        match node {
            PlanNode::Scan { table } => self.execute_scan(table),
            PlanNode::Join {
                join_type,
                left,
                right,
                conditions,
            } => {
                let left = self.execute_node(left)?;
                let right = self.execute_node(right)?;
                Ok(self.execute_join(*join_type, &left, &right, conditions))
            }
        }
    }

    fn execute_scan(&self, name: &str) -> ExecutionResult<Table> {
        let table = self
            .data_source
            .table(name)
            .ok_or_else(|| ExecutionError::UnknownTable(name.into()))?;
        debug!(table = name, rows = table.len(), "scan");
        Ok(table.clone())
    }

    fn execute_join(
        &self,
        join_type: JoinType,
        left: &Table,
        right: &Table,
        conditions: &[Condition],
    ) -> Table {
        let predicate = |l: &Record, r: &Record| conditions.iter().all(|c| c.eval(l, r));
        let result = match join_type {
            JoinType::Cartesian => {
                if !conditions.is_empty() {
                    warn!(conditions = conditions.len(), "cartesian join ignores its conditions");
                }
                cross_join(left, right)
            }
            JoinType::Inner => inner_join(left, right, predicate),
            JoinType::LeftOuter => left_outer_join(left, right, predicate),
        };
        debug!(
            %join_type,
            left = left.len(),
            right = right.len(),
            rows = result.len(),
            "join"
        );
        result
    }
}

/// Executes `plan` against `catalog` with the default configuration.
pub fn execute<D: DataSource>(plan: &QueryPlan, catalog: &D) -> ExecutionResult<Table> {
    PlanRunner::new(catalog).execute(plan)
}
