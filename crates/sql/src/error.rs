//! Parse errors.

use thiserror::Error;

/// Text reported as `found` when the input ran out.
pub const END_OF_INPUT: &str = "end of input";

/// Error raised while parsing a statement.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input at `position` did not match any of the expected tokens.
    #[error(
        "invalid token at position {position}: expected {}, found `{found}`",
        join_expected(.expected)
    )]
    InvalidToken {
        /// Byte offset into the input.
        position: usize,
        expected: Vec<String>,
        found: String,
    },

    /// The filter nests deeper than the parser accepts.
    #[error("filter nesting at position {position} exceeds the limit of {max_depth}")]
    TooDeep { position: usize, max_depth: usize },
}

/// Result type for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

fn join_expected(expected: &[String]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [one] => format!("`{}`", one),
        many => {
            let quoted: Vec<String> = many.iter().map(|e| format!("`{}`", e)).collect();
            format!("one of {}", quoted.join(", "))
        }
    }
}

impl ParseError {
    /// Creates an invalid token error.
    pub fn invalid_token<I, S>(position: usize, expected: I, found: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParseError::InvalidToken {
            position,
            expected: expected.into_iter().map(Into::into).collect(),
            found: found.into(),
        }
    }

    /// Returns the byte offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            ParseError::InvalidToken { position, .. } | ParseError::TooDeep { position, .. } => {
                *position
            }
        }
    }

    /// Returns the expected tokens. Empty for depth errors.
    pub fn expected(&self) -> &[String] {
        match self {
            ParseError::InvalidToken { expected, .. } => expected,
            ParseError::TooDeep { .. } => &[],
        }
    }

    /// Formats the error with the offending source line and a caret under
    /// the error position.
    pub fn format_with_source(&self, source: &str) -> String {
        let (line, col) = offset_to_line_col(source, self.position());
        let mut result = format!("error: {}\n", self);
        result.push_str(&format!("  --> line {}:{}\n", line, col));

        let source_line = source.lines().nth(line - 1).unwrap_or("");
        result.push_str(&format!("   |\n{:3}| {}\n   |", line, source_line));
        for _ in 0..col {
            result.push(' ');
        }
        result.push_str("^\n");
        result
    }
}

/// Converts a byte offset to a 1-based line and column.
fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
