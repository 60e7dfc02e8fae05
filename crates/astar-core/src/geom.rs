//! Geometry primitives: [`Coord`], [`Range`] and [`Direction`].
//!
//! Coordinates are screen-like: X grows right, Y grows down, so
//! [`Direction::North`] decreases `y`.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// An immutable integer cell coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step away in direction `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        self + dir.delta()
    }

    /// Whether `other` is one step away, orthogonally or (if `diagonal`)
    /// diagonally. A coordinate is never adjacent to itself.
    pub fn is_adjacent(self, other: Coord, diagonal: bool) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        match (dx, dy) {
            (1, 0) | (0, 1) => true,
            (1, 1) => diagonal,
            _ => false,
        }
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    /// Row-major: by `y`, then by `x`.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub min: Coord,
    pub max: Coord,
}

impl Range {
    /// Range covering `[0, width) × [0, height)`. Negative sizes give an
    /// empty range.
    #[inline]
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            min: Coord::ZERO,
            max: Coord::new(width.max(0), height.max(0)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `c` is inside the half-open range.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.x >= self.min.x && c.x < self.max.x && c.y >= self.min.y && c.y < self.max.y
    }

    /// Row-major iterator over every coordinate in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Coord;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Row-major iterator over the coordinates in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Coord,
}

impl Iterator for RangeIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.cur.y >= self.range.max.y || self.range.is_empty() {
            return None;
        }
        let c = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.x - self.cur.x) as usize;
        let remaining_rows = (self.range.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A single move between adjacent cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// Orthogonal moves in neighbor-expansion order.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Diagonal moves in neighbor-expansion order.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Unit offset of the move.
    pub const fn delta(self) -> Coord {
        match self {
            Direction::North => Coord::new(0, -1),
            Direction::South => Coord::new(0, 1),
            Direction::West => Coord::new(-1, 0),
            Direction::East => Coord::new(1, 0),
            Direction::NorthWest => Coord::new(-1, -1),
            Direction::NorthEast => Coord::new(1, -1),
            Direction::SouthWest => Coord::new(-1, 1),
            Direction::SouthEast => Coord::new(1, 1),
        }
    }

    /// Direction of the move from `from` to `to`, picked from the signs of the
    /// deltas. `None` when both coordinates are equal.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        let dir = match (dx, dy) {
            (0, -1) => Direction::North,
            (0, 1) => Direction::South,
            (-1, 0) => Direction::West,
            (1, 0) => Direction::East,
            (-1, -1) => Direction::NorthWest,
            (1, -1) => Direction::NorthEast,
            (-1, 1) => Direction::SouthWest,
            (1, 1) => Direction::SouthEast,
            _ => return None,
        };
        Some(dir)
    }

    /// The opposite move.
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    /// Arrow glyph pointing along the move on a screen where `y` grows down.
    pub const fn glyph(self) -> char {
        match self {
            Direction::North => '^',
            Direction::South => 'v',
            Direction::West => '<',
            Direction::East => '>',
            Direction::NorthWest | Direction::SouthEast => '\\',
            Direction::NorthEast | Direction::SouthWest => '/',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::West => "West",
            Direction::East => "East",
            Direction::NorthWest => "NorthWest",
            Direction::NorthEast => "NorthEast",
            Direction::SouthWest => "SouthWest",
            Direction::SouthEast => "SouthEast",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn coord_arithmetic() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, 4);
        assert_eq!(a + b, Coord::new(4, 6));
        assert_eq!(b - a, Coord::new(2, 2));
        assert_eq!(a * 2, Coord::new(2, 4));
        assert_eq!(a.step(Direction::North), Coord::new(1, 1));
    }

    #[test]
    fn coord_as_set_key() {
        let mut set = HashSet::new();
        set.insert(Coord::new(1, 1));
        assert!(set.contains(&Coord::from((1, 1))));
        assert!(!set.contains(&Coord::new(1, 2)));
    }

    #[test]
    fn coord_adjacency() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(2, 1), false));
        assert!(c.is_adjacent(Coord::new(3, 2), false));
        assert!(!c.is_adjacent(Coord::new(3, 3), false));
        assert!(c.is_adjacent(Coord::new(3, 3), true));
        assert!(!c.is_adjacent(c, true));
        assert!(!c.is_adjacent(Coord::new(4, 2), true));
    }

    #[test]
    fn range_basics() {
        let r = Range::with_size(3, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Coord::new(2, 1)));
        assert!(!r.contains(Coord::new(3, 0)));
        assert!(!r.contains(Coord::new(0, -1)));
    }

    #[test]
    fn range_negative_size_is_empty() {
        let r = Range::with_size(-2, 4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn range_iter_is_row_major() {
        let pts: Vec<_> = Range::with_size(3, 2).iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Coord::new(0, 0));
        assert_eq!(pts[2], Coord::new(2, 0));
        assert_eq!(pts[3], Coord::new(0, 1));
        assert_eq!(Range::with_size(3, 2).iter().len(), 6);
    }

    #[test]
    fn direction_between_uses_signs() {
        let o = Coord::new(5, 5);
        assert_eq!(Direction::between(o, Coord::new(5, 4)), Some(Direction::North));
        assert_eq!(Direction::between(o, Coord::new(9, 5)), Some(Direction::East));
        assert_eq!(
            Direction::between(o, Coord::new(4, 6)),
            Some(Direction::SouthWest)
        );
        assert_eq!(Direction::between(o, o), None);
    }

    #[test]
    fn direction_reverse_and_delta_agree() {
        for d in Direction::ORTHOGONAL.into_iter().chain(Direction::DIAGONAL) {
            assert_eq!(d.delta() + d.reverse().delta(), Coord::ZERO);
            assert_eq!(Direction::between(Coord::ZERO, d.delta()), Some(d));
        }
    }
}
