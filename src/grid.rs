use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::cell::{Cell, Digit};
use crate::location::Location;
use crate::solver::{self, Encoder, SolverFailure};
use crate::variant::Variant;

/// A puzzle grid of any supported variant.
///
/// [`Grid`]s should be built using a [`SudokuBuilder`](crate::builder::SudokuBuilder); solving one
/// consumes it and yields the filled grid.
pub struct Grid {
    pub(crate) dim: usize,
    pub(crate) cells: Array2<Cell>,
    pub(crate) variant: Variant,
}

impl Grid {
    /// The side length of this grid.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The digit at `location`, if it is given or has been solved.
    pub fn digit_at(&self, location: Location) -> Option<Digit> {
        self.cells[location.as_index()].digit()
    }

    /// Solves this grid, deferring to the SAT oracle and mutating and returning `self` with every
    /// cell filled in.
    ///
    /// Returns [`Inconsistent`](SolverFailure::Inconsistent) if the puzzle as stated has no
    /// solution.
    pub fn solve(mut self) -> Result<Self, SolverFailure> {
        let truths = Encoder::encode(&self).solve_oracle()?;
        self.cells = solver::decode(&truths, self.dim, &self.cells)?;
        Ok(self)
    }

    /// Whether some completion of this grid satisfies the variant's rules, without recovering one.
    ///
    /// Useful for checking that a partial fill has not already gone wrong.
    pub fn has_solution(&self) -> bool {
        Encoder::encode(self).solve_oracle().is_ok()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.display_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
