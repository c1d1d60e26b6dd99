use ndarray::Ix;

/// One coordinate of a [`Location`].
pub type Coord = usize;

/// A cell position on the grid, in `(column, row)` order; both coordinates start at 0.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// The row-major linear index of this cell on a grid of side `dim`.
    pub(crate) fn linear_index(&self, dim: usize) -> usize {
        self.1 * dim + self.0
    }

    pub(crate) fn from_linear_index(i: usize, dim: usize) -> Self {
        Self(i % dim, i / dim)
    }

    pub(crate) fn is_adjacent_to(&self, other: Location) -> bool {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1) == 1
    }

    pub(crate) fn in_bounds(&self, dim: usize) -> bool {
        self.0 < dim && self.1 < dim
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
