//! Parsing of the free-form text inputs.

use simulator::deadlock::Edge;
use thiserror::Error;

/// Errors raised while turning text into numeric inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token is not an integer.
    #[error("'{token}' at position {position} is not an integer")]
    InvalidToken {
        /// The offending token.
        token: String,
        /// Zero-based token position in its list.
        position: usize,
    },

    /// A size or count is negative.
    #[error("'{token}' at position {position} must not be negative")]
    Negative {
        /// The offending token.
        token: String,
        /// Zero-based token position in its list.
        position: usize,
    },

    /// A list holds no value at all.
    #[error("no values in {0}")]
    Empty(&'static str),

    /// An edge is not a `SOURCE TARGET` pair.
    #[error("edge '{0}' must be two names separated by whitespace")]
    MalformedEdge(String),

    /// A matrix row has the wrong number of values.
    #[error("row {row} of {what} has {found} values, expected {expected}")]
    RowWidth {
        /// The matrix.
        what: &'static str,
        /// Zero-based row.
        row: usize,
        /// Declared column count.
        expected: usize,
        /// Values on the row.
        found: usize,
    },

    /// A matrix has the wrong number of rows.
    #[error("{what} has {found} rows, expected {expected}")]
    RowCount {
        /// The matrix.
        what: &'static str,
        /// Declared row count.
        expected: usize,
        /// Rows supplied.
        found: usize,
    },
}

/// Parses a whitespace-delimited list of non-negative integers.
///
/// ```rust
/// assert_eq!(report::parse::numbers("5 8  12", "bursts").unwrap(), vec![5, 8, 12]);
/// ```
pub fn numbers(text: &str, what: &'static str) -> Result<Vec<usize>, ParseError> {
    let values: Vec<usize> = text
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| unsigned(token, position))
        .collect::<Result<_, _>>()?;

    if values.is_empty() {
        return Err(ParseError::Empty(what));
    }
    Ok(values)
}

/// Parses a whitespace-delimited list of integers that may be negative.
pub fn signed(text: &str, what: &'static str) -> Result<Vec<i32>, ParseError> {
    let values: Vec<i32> = text
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<i32>().map_err(|_| ParseError::InvalidToken {
                token: token.to_string(),
                position,
            })
        })
        .collect::<Result<_, _>>()?;

    if values.is_empty() {
        return Err(ParseError::Empty(what));
    }
    Ok(values)
}

/// Parses a single non-negative integer.
pub fn number(text: &str, what: &'static str) -> Result<usize, ParseError> {
    let token = text.trim();
    if token.is_empty() {
        return Err(ParseError::Empty(what));
    }
    unsigned(token, 0)
}

/// Parses comma-separated `SOURCE TARGET` pairs, e.g. `"P0 R0, R0 P1"`.
pub fn edges(text: &str) -> Result<Vec<Edge>, ParseError> {
    let edges: Vec<Edge> = text
        .split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let names: Vec<&str> = pair.split_whitespace().collect();
            match names.as_slice() {
                [from, to] => Ok(Edge::new(*from, *to)),
                _ => Err(ParseError::MalformedEdge(pair.trim().to_string())),
            }
        })
        .collect::<Result<_, _>>()?;

    if edges.is_empty() {
        return Err(ParseError::Empty("graph edges"));
    }
    Ok(edges)
}

/// Parses one row per process, each with exactly `columns` values.
pub fn matrix<S: AsRef<str>>(
    rows: &[S],
    what: &'static str,
    expected_rows: usize,
    columns: usize,
) -> Result<Vec<Vec<usize>>, ParseError> {
    if rows.len() != expected_rows {
        return Err(ParseError::RowCount {
            what,
            expected: expected_rows,
            found: rows.len(),
        });
    }

    rows.iter()
        .enumerate()
        .map(|(row, text)| {
            let values = numbers(text.as_ref(), what)?;
            if values.len() != columns {
                return Err(ParseError::RowWidth {
                    what,
                    row,
                    expected: columns,
                    found: values.len(),
                });
            }
            Ok(values)
        })
        .collect()
}

fn unsigned(token: &str, position: usize) -> Result<usize, ParseError> {
    match token.parse::<usize>() {
        Ok(value) => Ok(value),
        Err(_) if token.parse::<i64>().is_ok() => Err(ParseError::Negative {
            token: token.to_string(),
            position,
        }),
        Err(_) => Err(ParseError::InvalidToken {
            token: token.to_string(),
            position,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_split_on_any_whitespace() {
        assert_eq!(
            numbers(" 98 183\t37\n122 ", "requests").unwrap(),
            vec![98, 183, 37, 122]
        );
    }

    #[test]
    fn numbers_reject_bad_tokens() {
        assert_eq!(
            numbers("5 x 12", "bursts"),
            Err(ParseError::InvalidToken {
                token: "x".to_string(),
                position: 1
            })
        );
        assert_eq!(
            numbers("5 -8", "bursts"),
            Err(ParseError::Negative {
                token: "-8".to_string(),
                position: 1
            })
        );
        assert_eq!(numbers("   ", "bursts"), Err(ParseError::Empty("bursts")));
    }

    #[test]
    fn signed_accepts_negative_priorities() {
        assert_eq!(signed("3 -1 0", "priorities").unwrap(), vec![3, -1, 0]);
    }

    #[test]
    fn single_number() {
        assert_eq!(number(" 53 ", "head").unwrap(), 53);
        assert_eq!(number("", "head"), Err(ParseError::Empty("head")));
    }

    #[test]
    fn edge_pairs() {
        assert_eq!(
            edges("P0 R0, R0 P1,").unwrap(),
            vec![Edge::new("P0", "R0"), Edge::new("R0", "P1")]
        );
        assert_eq!(
            edges("P0 R0, R0"),
            Err(ParseError::MalformedEdge("R0".to_string()))
        );
    }

    #[test]
    fn matrix_rows() {
        assert_eq!(
            matrix(&["0 1 0", "2 0 0"], "allocation", 2, 3).unwrap(),
            vec![vec![0, 1, 0], vec![2, 0, 0]]
        );
        assert_eq!(
            matrix(&["0 1", "2 0 0"], "allocation", 2, 3),
            Err(ParseError::RowWidth {
                what: "allocation",
                row: 0,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            matrix(&["0 1 0"], "max", 2, 3),
            Err(ParseError::RowCount {
                what: "max",
                expected: 2,
                found: 1
            })
        );
    }
}
