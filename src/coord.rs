use core::fmt;

use grid_util::point::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `(row, col)` position on a [Grid](crate::grid::Grid). Converts to and from a
/// [grid_util] [Point] with the row on the `y` axis and the column on the `x` axis. Positions
/// outside the grid, such as a row of `-1`, are representable and rejected by bounds checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        Point::from(*self).manhattan_distance(&Point::from(*other))
    }
}

impl From<Coord> for Point {
    fn from(coord: Coord) -> Point {
        Point::new(coord.col, coord.row)
    }
}

impl From<Point> for Coord {
    fn from(point: Point) -> Coord {
        Coord::new(point.y, point.x)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_axes() {
        let point = Point::from(Coord::new(2, 5));
        assert_eq!((point.x, point.y), (5, 2));
        assert_eq!(Coord::from(point), Coord::new(2, 5));
    }

    #[test]
    fn manhattan() {
        assert_eq!(Coord::new(0, 0).manhattan_distance(&Coord::new(4, 4)), 8);
        assert_eq!(Coord::new(3, -1).manhattan_distance(&Coord::new(1, 2)), 5);
    }
}
