//! Error type shared by grid editing and search sessions.
//!
//! Every variant is a local validation failure reported at the offending call. An unreachable
//! destination is not an error, see [SearchStatus::Unreachable](crate::session::SearchStatus).

use core::fmt;

use crate::coord::Coord;
use crate::grid::CellRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Grid dimensions must both be positive.
    InvalidDimensions { rows: i32, cols: i32 },

    /// Coordinate lies outside `[0, rows) x [0, cols)`.
    OutOfBounds { coord: Coord, rows: i32, cols: i32 },

    /// The role change is not allowed under the strict policy of
    /// [try_set_role](crate::grid::Grid::try_set_role).
    InvalidRole {
        coord: Coord,
        current: CellRole,
        requested: CellRole,
    },

    /// Obstacle count was negative.
    InvalidCount(i32),

    /// Traversal costs must be at least 1.
    InvalidCost { coord: Coord, cost: u32 },

    /// The grid has no source or no destination.
    MissingEndpoint {
        source: bool,
        destination: bool,
    },

    /// The session already reached a terminal state.
    SessionFinished,

    /// Algorithm name does not map to an implemented strategy.
    UnsupportedAlgorithm(String),

    /// An ASCII map contained an unknown symbol or a duplicate endpoint.
    MalformedMap { row: usize, col: usize, symbol: char },
}

impl SearchError {
    /// Short stable code, handy for hosts that map errors to messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::InvalidRole { .. } => "INVALID_ROLE",
            Self::InvalidCount(_) => "INVALID_COUNT",
            Self::InvalidCost { .. } => "INVALID_COST",
            Self::MissingEndpoint { .. } => "MISSING_ENDPOINT",
            Self::SessionFinished => "SESSION_FINISHED",
            Self::UnsupportedAlgorithm(_) => "UNSUPPORTED_ALGORITHM",
            Self::MalformedMap { .. } => "MALFORMED_MAP",
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {}x{}", rows, cols)
            }
            Self::OutOfBounds { coord, rows, cols } => {
                write!(f, "{} is outside the {}x{} grid", coord, rows, cols)
            }
            Self::InvalidRole {
                coord,
                current,
                requested,
            } => write!(
                f,
                "cannot mark {} as {:?} while it is the {:?}",
                coord, requested, current
            ),
            Self::InvalidCount(count) => write!(f, "invalid obstacle count {}", count),
            Self::InvalidCost { coord, cost } => {
                write!(f, "invalid traversal cost {} at {}", cost, coord)
            }
            Self::MissingEndpoint {
                source,
                destination,
            } => match (source, destination) {
                (false, false) => write!(f, "grid has neither a source nor a destination"),
                (false, true) => write!(f, "grid has no source"),
                _ => write!(f, "grid has no destination"),
            },
            Self::SessionFinished => write!(f, "search session has already finished"),
            Self::UnsupportedAlgorithm(name) => write!(f, "unsupported algorithm '{}'", name),
            Self::MalformedMap { row, col, symbol } => {
                write!(f, "unexpected '{}' at line {}, column {}", symbol, row + 1, col + 1)
            }
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::OutOfBounds {
            coord: Coord::new(-1, 2),
            rows: 3,
            cols: 4,
        };
        assert_eq!(err.to_string(), "(-1, 2) is outside the 3x4 grid");
        let err = SearchError::MissingEndpoint {
            source: true,
            destination: false,
        };
        assert_eq!(err.to_string(), "grid has no destination");
    }

    #[test]
    fn test_error_code() {
        assert_eq!(SearchError::SessionFinished.code(), "SESSION_FINISHED");
        assert_eq!(
            SearchError::UnsupportedAlgorithm("Thorup".into()).code(),
            "UNSUPPORTED_ALGORITHM"
        );
    }
}
