//! Abstract syntax tree for parsed statements.
//!
//! Every name and operand is kept as the raw text that appeared in the
//! input. `Display` renders filters fully parenthesized, so the rendered
//! text parses back to the same tree.

use std::fmt;

/// A parsed `select` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    /// Selected column names, in order.
    pub select_list: Vec<String>,
    /// Table names listed after `from`, in order.
    pub from_list: Vec<String>,
    /// Join clauses, in order.
    pub joins: Vec<JoinClause>,
    /// Filter of the `where` clause, if present.
    pub where_clause: Option<FilterExpr>,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "select {} from {}",
            self.select_list.join(", "),
            self.from_list.join(", ")
        )?;
        for join in &self.joins {
            write!(f, " {}", join)?;
        }
        if let Some(filter) = &self.where_clause {
            write!(f, " where {}", filter)?;
        }
        Ok(())
    }
}

/// Join keyword of a join clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// `left outer join`
    LeftOuter,
    /// `inner join`
    Inner,
    /// `join`
    Plain,
}

impl JoinKind {
    /// Returns the keyword sequence of this join kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::LeftOuter => "left outer join",
            JoinKind::Inner => "inner join",
            JoinKind::Plain => "join",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<kind> <table> on <filter>` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: String,
    pub on: FilterExpr,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.kind, self.table, self.on)
    }
}

/// A filter expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterExpr {
    Condition(ConditionAtom),
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
}

impl FilterExpr {
    /// Creates a leaf condition.
    pub fn condition(
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        FilterExpr::Condition(ConditionAtom::new(left, operator, right))
    }

    /// Creates a conjunction.
    pub fn and(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::And(Box::new(left), Box::new(right))
    }

    /// Creates a disjunction.
    pub fn or(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::Or(Box::new(left), Box::new(right))
    }

    /// Returns the leaf conditions, left to right.
    pub fn conditions(&self) -> Vec<&ConditionAtom> {
        let mut atoms = Vec::new();
        self.collect_conditions(&mut atoms);
        atoms
    }

    fn collect_conditions<'a>(&'a self, atoms: &mut Vec<&'a ConditionAtom>) {
        match self {
            FilterExpr::Condition(atom) => atoms.push(atom),
            FilterExpr::And(l, r) | FilterExpr::Or(l, r) => {
                l.collect_conditions(atoms);
                r.collect_conditions(atoms);
            }
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpr::Condition(atom) => write!(f, "{}", atom),
            FilterExpr::And(l, r) => write!(f, "({} and {})", l, r),
            FilterExpr::Or(l, r) => write!(f, "({} or {})", l, r),
        }
    }
}

/// `operand operator operand`, as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConditionAtom {
    pub left: String,
    pub operator: String,
    pub right: String,
}

impl ConditionAtom {
    /// Creates a condition atom.
    pub fn new(
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            operator: operator.into(),
            right: right.into(),
        }
    }
}

impl fmt::Display for ConditionAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}
