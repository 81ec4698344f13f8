//! Recursive-descent parser for select statements.
//!
//! Grammar:
//!
//! ```text
//! Statement   := 'select' NameList 'from' NameList JoinClause* WhereClause? EOF
//! NameList    := Name (',' Name)*
//! JoinClause  := ('left' 'outer' 'join' | 'inner' 'join' | 'join') Name 'on' FilterExpr
//! WhereClause := 'where' FilterExpr
//! FilterExpr  := AndExpr ('or' AndExpr)*
//! AndExpr     := Atom ('and' Atom)*
//! Atom        := '(' FilterExpr ')' | Operand Operator Operand
//! ```
//!
//! Chains of the same connective nest to the right. Chains are read in a
//! loop; only parentheses recurse, and both the tree depth and the
//! parenthesis nesting are capped.

use crate::ast::{ConditionAtom, FilterExpr, JoinClause, JoinKind, Statement};
use crate::error::{ParseError, Result, END_OF_INPUT};
use std::str::FromStr;
use tracing::{debug, trace};

/// Parses a complete statement.
pub fn parse(input: &str) -> Result<Statement> {
    Parser::new(input).parse_statement()
}

/// Parses a standalone filter expression such as `a = 1 and (b = 2 or c = 3)`.
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let expr = parser.parse_filter_expr()?;
    parser.expect_end()?;
    Ok(expr)
}

impl FromStr for Statement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl FromStr for FilterExpr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_filter(s)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Characters that end a keyword.
fn is_word_boundary(c: char) -> bool {
    is_whitespace(c) || matches!(c, '(' | ')' | ',')
}

fn is_paren(c: char) -> bool {
    matches!(c, '(' | ')')
}

/// Maximum depth of a parsed filter tree.
pub const MAX_FILTER_DEPTH: usize = 512;

/// Maximum number of nested parentheses in a filter.
pub const MAX_NESTING: usize = 64;

/// A parsed filter together with its tree depth and start offset.
struct Term {
    expr: FilterExpr,
    depth: usize,
    position: usize,
}

/// Parser state.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
    /// Currently open parentheses.
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            nesting: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if is_whitespace(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Returns true if `keyword` starts at the current position and is
    /// followed by a word boundary. Case-insensitive.
    fn at_keyword(&self, keyword: &str) -> bool {
        let rest = self.rest();
        match rest.get(..keyword.len()) {
            Some(head) if head.eq_ignore_ascii_case(keyword) => rest[keyword.len()..]
                .chars()
                .next()
                .map_or(true, is_word_boundary),
            _ => false,
        }
    }

    /// Consumes `keyword` and any whitespace after it.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if !self.at_keyword(keyword) {
            return false;
        }
        trace!(keyword, position = self.pos, "keyword");
        self.pos += keyword.len();
        self.skip_whitespace();
        true
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error([keyword]))
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        if self.peek() == Some(expected) {
            self.advance();
            self.skip_whitespace();
            Ok(())
        } else {
            Err(self.error([expected.to_string()]))
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.peek().is_none() {
            Ok(())
        } else {
            Err(self.error([END_OF_INPUT]))
        }
    }

    /// Reads a non-empty token ending at a character matching `stop` or at
    /// the end of input, then skips whitespace.
    fn read_token(&mut self, what: &str, stop: fn(char) -> bool) -> Result<&'a str> {
        let rest = self.rest();
        let len = rest.find(stop).unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error([what]));
        }
        let token = &rest[..len];
        self.pos += len;
        self.skip_whitespace();
        Ok(token)
    }

    /// Text of the token at the current position, for error reports.
    fn found(&self) -> String {
        let rest = self.rest();
        match rest.find(is_word_boundary) {
            _ if rest.is_empty() => END_OF_INPUT.to_string(),
            Some(0) => rest.chars().take(1).collect(),
            Some(end) => rest[..end].to_string(),
            None => rest.to_string(),
        }
    }

    fn error<I, S>(&self, expected: I) -> ParseError
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let err = ParseError::invalid_token(self.pos, expected, self.found());
        debug!(position = self.pos, error = %err, "parse failed");
        err
    }

    fn too_deep(&self, position: usize, max_depth: usize) -> ParseError {
        let err = ParseError::TooDeep {
            position,
            max_depth,
        };
        debug!(position, error = %err, "parse failed");
        err
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        self.skip_whitespace();
        self.expect_keyword("select")?;
        let select_list = self.parse_name_list()?;
        self.expect_keyword("from")?;
        let from_list = self.parse_name_list()?;

        let mut joins = Vec::new();
        while let Some(join) = self.parse_join_clause()? {
            joins.push(join);
        }

        let where_clause = if self.eat_keyword("where") {
            Some(self.parse_filter_expr()?)
        } else {
            None
        };
        self.expect_end()?;

        trace!(
            columns = select_list.len(),
            tables = from_list.len(),
            joins = joins.len(),
            "parsed statement"
        );
        Ok(Statement {
            select_list,
            from_list,
            joins,
            where_clause,
        })
    }

    fn parse_name_list(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        loop {
            names.push(self.parse_name()?);
            if self.peek() != Some(',') {
                return Ok(names);
            }
            self.advance();
            self.skip_whitespace();
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        self.read_token("name", |c| is_whitespace(c) || c == ',')
            .map(str::to_string)
    }

    fn parse_join_kind(&mut self) -> Result<Option<JoinKind>> {
        let kind = if self.eat_keyword("left") {
            self.expect_keyword("outer")?;
            self.expect_keyword("join")?;
            JoinKind::LeftOuter
        } else if self.eat_keyword("inner") {
            self.expect_keyword("join")?;
            JoinKind::Inner
        } else if self.eat_keyword("join") {
            JoinKind::Plain
        } else {
            return Ok(None);
        };
        Ok(Some(kind))
    }

    fn parse_join_clause(&mut self) -> Result<Option<JoinClause>> {
        let kind = match self.parse_join_kind()? {
            Some(kind) => kind,
            None => return Ok(None),
        };
        let table = self.parse_name()?;
        self.expect_keyword("on")?;
        let on = self.parse_filter_expr()?;
        trace!(%kind, table = table.as_str(), "join clause");
        Ok(Some(JoinClause { kind, table, on }))
    }

    fn parse_filter_expr(&mut self) -> Result<FilterExpr> {
        self.parse_or_chain().map(|term| term.expr)
    }

    fn parse_or_chain(&mut self) -> Result<Term> {
        let mut terms = vec![self.parse_and_chain()?];
        while self.eat_keyword("or") {
            terms.push(self.parse_and_chain()?);
        }
        self.fold_chain(terms, FilterExpr::or)
    }

    fn parse_and_chain(&mut self) -> Result<Term> {
        let mut terms = vec![self.parse_atom()?];
        while self.eat_keyword("and") {
            terms.push(self.parse_atom()?);
        }
        self.fold_chain(terms, FilterExpr::and)
    }

    /// Nests `terms` to the right: `[a, b, c]` becomes `combine(a, combine(b, c))`.
    ///
    /// Fails before building anything if the result would be deeper than
    /// `MAX_FILTER_DEPTH`.
    fn fold_chain(
        &self,
        terms: Vec<Term>,
        combine: fn(FilterExpr, FilterExpr) -> FilterExpr,
    ) -> Result<Term> {
        let last = terms.len().saturating_sub(1);
        let mut depth = 0;
        for (i, term) in terms.iter().enumerate() {
            // Term `i` sits below `i` connectives, plus one more unless it
            // is the innermost right operand.
            let level = if i == last { i } else { i + 1 };
            if level + term.depth > MAX_FILTER_DEPTH {
                return Err(self.too_deep(term.position, MAX_FILTER_DEPTH));
            }
            depth = depth.max(level + term.depth);
        }

        let position = terms.first().map_or(self.pos, |t| t.position);
        let expr = terms
            .into_iter()
            .rev()
            .map(|t| t.expr)
            .reduce(|right, left| combine(left, right))
            .ok_or_else(|| self.error(["operand"]))?;
        Ok(Term {
            expr,
            depth,
            position,
        })
    }

    fn parse_atom(&mut self) -> Result<Term> {
        let position = self.pos;
        if self.peek() == Some('(') {
            if self.nesting >= MAX_NESTING {
                return Err(self.too_deep(position, MAX_NESTING));
            }
            self.advance();
            self.skip_whitespace();
            self.nesting += 1;
            let inner = self.parse_or_chain();
            self.nesting -= 1;
            let inner = inner?;
            self.expect_char(')')?;
            return Ok(Term { position, ..inner });
        }
        let expr = FilterExpr::Condition(self.parse_condition()?);
        Ok(Term {
            expr,
            depth: 1,
            position,
        })
    }

    fn parse_condition(&mut self) -> Result<ConditionAtom> {
        let stop = |c: char| is_whitespace(c) || is_paren(c);
        let left = self.read_token("operand", stop)?;
        let operator = self.read_token("operator", stop)?;
        let right = self.read_token("operand", stop)?;
        Ok(ConditionAtom::new(left, operator, right))
    }
}
