//! Inclusive integer intervals used as sample extents.

use crate::TerrainError;
use std::fmt;

/// Inclusive interval `[from, to]` of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval1D {
    from: i32,
    to: i32,
}

impl Interval1D {
    pub fn new(included_from: i32, included_to: i32) -> Result<Self, TerrainError> {
        if included_from > included_to {
            return Err(TerrainError::InvalidArgument(
                "interval lower bound exceeds upper bound",
            ));
        }
        Ok(Self {
            from: included_from,
            to: included_to,
        })
    }

    pub fn included_from(&self) -> i32 {
        self.from
    }

    pub fn included_to(&self) -> i32 {
        self.to
    }

    pub fn contains(&self, v: i32) -> bool {
        self.from <= v && v <= self.to
    }

    /// Returns the number of integers in this interval.
    pub fn size(&self) -> i64 {
        i64::from(self.to) - i64::from(self.from) + 1
    }

    pub fn size_of_intersection_with(&self, that: &Interval1D) -> i64 {
        let from = self.from.max(that.from);
        let to = self.to.min(that.to);
        if to < from {
            0
        } else {
            i64::from(to) - i64::from(from) + 1
        }
    }

    /// Returns the smallest interval containing both `self` and `that`.
    pub fn bounding_union(&self, that: &Interval1D) -> Interval1D {
        Interval1D {
            from: self.from.min(that.from),
            to: self.to.max(that.to),
        }
    }

    /// Returns `true` if the set union of `self` and `that` is itself
    /// an interval, i.e. equals their bounding union.
    pub fn is_unionable_with(&self, that: &Interval1D) -> bool {
        self.size() + that.size() - self.size_of_intersection_with(that)
            == self.bounding_union(that).size()
    }

    pub fn union(&self, that: &Interval1D) -> Result<Interval1D, TerrainError> {
        if self.is_unionable_with(that) {
            Ok(self.bounding_union(that))
        } else {
            Err(TerrainError::InvalidArgument("intervals are not unionable"))
        }
    }
}

impl fmt::Display for Interval1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.from, self.to)
    }
}

/// Cartesian product of two [Interval1D].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval2D {
    ix: Interval1D,
    iy: Interval1D,
}

impl Interval2D {
    pub fn new(ix: Interval1D, iy: Interval1D) -> Self {
        Self { ix, iy }
    }

    pub fn ix(&self) -> Interval1D {
        self.ix
    }

    pub fn iy(&self) -> Interval1D {
        self.iy
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.ix.contains(x) && self.iy.contains(y)
    }

    pub fn size(&self) -> i64 {
        self.ix.size() * self.iy.size()
    }

    pub fn size_of_intersection_with(&self, that: &Interval2D) -> i64 {
        self.ix.size_of_intersection_with(&that.ix) * self.iy.size_of_intersection_with(&that.iy)
    }

    pub fn bounding_union(&self, that: &Interval2D) -> Interval2D {
        Interval2D {
            ix: self.ix.bounding_union(&that.ix),
            iy: self.iy.bounding_union(&that.iy),
        }
    }

    pub fn is_unionable_with(&self, that: &Interval2D) -> bool {
        self.size() + that.size() - self.size_of_intersection_with(that)
            == self.bounding_union(that).size()
    }

    pub fn union(&self, that: &Interval2D) -> Result<Interval2D, TerrainError> {
        if self.is_unionable_with(that) {
            Ok(self.bounding_union(that))
        } else {
            Err(TerrainError::InvalidArgument("intervals are not unionable"))
        }
    }
}

impl fmt::Display for Interval2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.ix, self.iy)
    }
}
