//! Query plan definitions.

use relq_core::Record;
use std::fmt;

/// Join type of a join node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// Cartesian product; conditions are not applied.
    Cartesian,
    Inner,
    LeftOuter,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinType::Cartesian => "cartesian_join",
            JoinType::Inner => "inner_join",
            JoinType::LeftOuter => "left_outer_join",
        })
    }
}

/// Comparison operator of a binary condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompareOp {
    #[default]
    Eq,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => f.write_str("="),
        }
    }
}

/// Compares a dotted path of the left row with a dotted path of the right
/// row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryCondition {
    pub left: String,
    pub right: String,
    pub operator: CompareOp,
}

impl BinaryCondition {
    /// Creates a condition with an explicit operator.
    pub fn new(left: impl Into<String>, right: impl Into<String>, operator: CompareOp) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            operator,
        }
    }

    /// Creates an equality condition.
    pub fn eq(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, right, CompareOp::Eq)
    }

    /// Evaluates the condition against a pair of rows.
    ///
    /// Values compare structurally. A missing path reads as null, and null
    /// equals null.
    pub fn eval(&self, left: &Record, right: &Record) -> bool {
        let l = left.get(&self.left);
        let r = right.get(&self.right);
        match self.operator {
            CompareOp::Eq => l == r,
        }
    }

    /// Returns the condition as a predicate over `(left, right)` rows.
    pub fn predicate(&self) -> impl Fn(&Record, &Record) -> bool + '_ {
        move |l: &Record, r: &Record| self.eval(l, r)
    }
}

impl fmt::Display for BinaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// A join condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Binary(BinaryCondition),
}

impl Condition {
    /// Evaluates the condition against a pair of rows.
    pub fn eval(&self, left: &Record, right: &Record) -> bool {
        match self {
            Condition::Binary(c) => c.eval(left, right),
        }
    }

    /// Returns the condition as a predicate over `(left, right)` rows.
    pub fn predicate(&self) -> impl Fn(&Record, &Record) -> bool + '_ {
        move |l: &Record, r: &Record| self.eval(l, r)
    }
}

impl From<BinaryCondition> for Condition {
    fn from(c: BinaryCondition) -> Self {
        Condition::Binary(c)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Binary(c) => write!(f, "{}", c),
        }
    }
}

/// Query plan node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanNode {
    /// Reads a named table from the catalog.
    Scan { table: String },

    /// Joins two subtrees.
    Join {
        join_type: JoinType,
        left: Box<PlanNode>,
        right: Box<PlanNode>,
        conditions: Vec<Condition>,
    },
}

impl PlanNode {
    /// Creates a table scan node.
    pub fn scan(table: impl Into<String>) -> Self {
        PlanNode::Scan {
            table: table.into(),
        }
    }

    /// Creates a join node.
    pub fn join(
        join_type: JoinType,
        left: PlanNode,
        right: PlanNode,
        conditions: Vec<Condition>,
    ) -> Self {
        PlanNode::Join {
            join_type,
            left: Box::new(left),
            right: Box::new(right),
            conditions,
        }
    }

    /// Returns the input nodes of a join, or `None` for a scan.
    pub fn inputs(&self) -> Option<(&PlanNode, &PlanNode)> {
        match self {
            PlanNode::Scan { .. } => None,
            PlanNode::Join { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// Returns the number of levels in the tree rooted at this node.
    ///
    /// Walks the tree with an explicit stack, so arbitrarily deep plans can
    /// be measured before they are rejected.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            depth = depth.max(level);
            if let Some((left, right)) = node.inputs() {
                stack.push((left, level + 1));
                stack.push((right, level + 1));
            }
        }
        depth
    }

    /// Returns the scanned table names, left to right.
    pub fn tables(&self) -> Vec<&str> {
        let mut tables = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                PlanNode::Scan { table } => tables.push(table.as_str()),
                PlanNode::Join { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        tables
    }
}

impl fmt::Display for PlanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanNode::Scan { table } => write!(f, "Scan(table=\"{}\")", table),
            PlanNode::Join {
                join_type,
                left,
                right,
                conditions,
            } => {
                write!(f, "Join(type={}, left={}, right={}, on=\"", join_type, left, right)?;
                for (i, c) in conditions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\")")
            }
        }
    }
}

/// An immutable query plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryPlan {
    root: PlanNode,
}

impl QueryPlan {
    /// Wraps a root node.
    pub fn new(root: PlanNode) -> Self {
        Self { root }
    }

    /// Returns the root node.
    pub fn root(&self) -> &PlanNode {
        &self.root
    }

    /// Returns the depth of the plan tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns the scanned table names, left to right.
    pub fn tables(&self) -> Vec<&str> {
        self.root.tables()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryPlan(node={})", self.root)
    }
}
