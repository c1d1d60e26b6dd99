use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::cell::{Cell, Digit};
use crate::grid::Grid;
use crate::location::Location;
use crate::variant::{Cage, HorizontalGreater, Sign, Variant, VerticalGreater};

/// Reasons a builder may become invalid while building.
#[derive(Clone, Copy, Debug, strum::Display)]
pub enum BuilderInvalidReason {
    /// A given or feature was placed outside the grid, or a digit exceeds the grid's side length.
    FeatureOutOfBounds,
    /// The requested side length is not one of 4, 6, 9, 16, or 25.
    UnsupportedDimension,
    /// Killer cages, hyper windows, and inequality signs are only defined on 9×9 grids.
    WrongDimension,
    /// Features of two different variants were placed on the same builder.
    VariantConflict,
    /// A cage has no cells, more than 9 cells, or repeats a cell.
    MalformedCage,
    /// A cage total larger than any set of distinct digits of that size can reach.
    CageTotalOutOfRange,
    /// An inequality sign between cells that are not orthogonal neighbors, or whose claimed
    /// larger cell is not one of its two endpoints.
    MalformedSign,
}

/// Builds [`Grid`]s for every supported puzzle variant.
///
/// The variant is implied by the features placed: cages make a Killer Sudoku, signs a Greater-Than
/// Sudoku, [`hyper()`](Self::hyper) a Hyper Sudoku, and a bare builder a standard grid.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some
/// point. A misuse pushes a [`BuilderInvalidReason`] and turns every later call into a no-op; the
/// reasons surface from [`build()`](Self::build).
#[derive(Clone)]
pub struct SudokuBuilder {
    dim: usize,
    cells: Array2<Cell>,
    invalid_reasons: Vec<BuilderInvalidReason>,
    hyper: bool,
    cages: Vec<Cage>,
    signs: Vec<(UnorderedPair<Location>, Location)>,
}

impl Default for SudokuBuilder {
    fn default() -> Self {
        Self::with_dim(9)
    }
}

impl SudokuBuilder {
    /// Construct a builder for a grid of side `dim`, which must be one of 4, 6, 9, 16, or 25.
    pub fn with_dim(dim: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if !matches!(dim, 4 | 6 | 9 | 16 | 25) {
            invalid_reasons.push(BuilderInvalidReason::UnsupportedDimension);
        }

        Self {
            dim,
            cells: Array2::from_shape_simple_fn((dim, dim), Cell::default),
            invalid_reasons,
            hyper: false,
            cages: Vec::new(),
            signs: Vec::new(),
        }
    }

    /// Place a given digit at `location`.
    ///
    /// May invalidate the builder with [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// if `location` is outside the grid or `digit` is not in `1..=dim`.
    pub fn given(&mut self, location: Location, digit: Digit) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !location.in_bounds(self.dim) || digit < 1 || digit > self.dim {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.cells[location.as_index()] = Cell::Given(digit);
        self
    }

    /// Place every given at once from row-major rows; a 0 leaves the cell empty.
    ///
    /// `rows` must be `dim` rows of `dim` entries each.
    pub fn given_rows(&mut self, rows: &[&[Digit]]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if rows.len() != self.dim || rows.iter().any(|row| row.len() != self.dim) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        for (r, row) in rows.iter().enumerate() {
            for (c, digit) in row.iter().enumerate() {
                if *digit != 0 {
                    self.given(Location(c, r), *digit);
                }
            }
        }
        self
    }

    /// Mark this grid as a Hyper Sudoku, adding four extra 3×3 windows at rows and columns 1–3
    /// and 5–7.
    ///
    /// May invalidate the builder with [`WrongDimension`](BuilderInvalidReason::WrongDimension) or
    /// [`VariantConflict`](BuilderInvalidReason::VariantConflict).
    pub fn hyper(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.dim != 9 {
            self.invalid_reasons.push(BuilderInvalidReason::WrongDimension);
            return self;
        }
        if !self.cages.is_empty() || !self.signs.is_empty() {
            self.invalid_reasons.push(BuilderInvalidReason::VariantConflict);
            return self;
        }

        self.hyper = true;
        self
    }

    /// Add a Killer Sudoku cage over `cells` whose digits must be pairwise distinct and sum to
    /// `total`.
    ///
    /// Cage consistency beyond local checks (cages partitioning the grid, a solvable combination
    /// of totals) is not verified here; an impossible cage set simply solves to
    /// [`Inconsistent`](crate::SolverFailure::Inconsistent).
    pub fn cage(&mut self, cells: &[Location], total: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.dim != 9 {
            self.invalid_reasons.push(BuilderInvalidReason::WrongDimension);
            return self;
        }
        if self.hyper || !self.signs.is_empty() {
            self.invalid_reasons.push(BuilderInvalidReason::VariantConflict);
            return self;
        }
        if cells.is_empty() || cells.len() > 9 || !cells.iter().all_unique() {
            self.invalid_reasons.push(BuilderInvalidReason::MalformedCage);
            return self;
        }
        if cells.iter().any(|cell| !cell.in_bounds(self.dim)) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }
        if total > Cage::max_total(cells.len()) {
            self.invalid_reasons.push(BuilderInvalidReason::CageTotalOutOfRange);
            return self;
        }

        self.cages.push(Cage { cells: cells.to_vec(), total });
        self
    }

    /// Place one inequality sign between two orthogonally adjacent cells; `larger` names the
    /// endpoint holding the larger digit.
    ///
    /// Sign consistency is not verified here; contradictory signs simply solve to
    /// [`Inconsistent`](crate::SolverFailure::Inconsistent).
    pub fn greater(&mut self, locations: UnorderedPair<Location>, larger: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.dim != 9 {
            self.invalid_reasons.push(BuilderInvalidReason::WrongDimension);
            return self;
        }
        if self.hyper || !self.cages.is_empty() {
            self.invalid_reasons.push(BuilderInvalidReason::VariantConflict);
            return self;
        }
        if !locations.0.in_bounds(self.dim) || !locations.1.in_bounds(self.dim) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }
        if !locations.0.is_adjacent_to(locations.1)
            || (larger != locations.0 && larger != locations.1)
        {
            self.invalid_reasons.push(BuilderInvalidReason::MalformedSign);
            return self;
        }

        self.signs.push((locations, larger));
        self
    }

    /// Place all 108 signs of a classic Greater-Than Sudoku at once.
    ///
    /// `horizontal` holds the 54 in-block boundaries between horizontally adjacent cells in
    /// reading order, `vertical` the 54 between vertically adjacent cells; block-crossing
    /// boundaries carry no sign and are skipped by the indexing.
    pub fn signs(
        &mut self,
        horizontal: &[HorizontalGreater; 54],
        vertical: &[VerticalGreater; 54],
    ) -> &mut Self {
        for (i, sign) in horizontal.iter().enumerate() {
            // skip the boundary between columns 2|3 and 5|6 of each row
            let left = Location::from_linear_index(i + i / 2, 9);
            let right = Location(left.0 + 1, left.1);
            let larger = match sign {
                HorizontalGreater::Left => left,
                HorizontalGreater::Right => right,
            };
            self.greater(UnorderedPair::from((left, right)), larger);
        }

        for (i, sign) in vertical.iter().enumerate() {
            // skip the boundary between rows 2|3 and 5|6
            let up = Location::from_linear_index(i + 9 * (i / 18), 9);
            let down = Location(up.0, up.1 + 1);
            let larger = match sign {
                VerticalGreater::Up => up,
                VerticalGreater::Down => down,
            };
            self.greater(UnorderedPair::from((up, down)), larger);
        }
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Grid`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of
    /// [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Grid, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let variant = if self.hyper {
            Variant::Hyper
        } else if !self.cages.is_empty() {
            Variant::Killer { cages: self.cages.clone() }
        } else if !self.signs.is_empty() {
            let mut signs = UnGraphMap::with_capacity(self.dim * self.dim, self.signs.len());
            // every cell is a node so the pruning pass can read each cell's degree
            for i in 0..self.dim * self.dim {
                signs.add_node(Location::from_linear_index(i, self.dim));
            }
            for (UnorderedPair(a, b), larger) in self.signs.iter() {
                signs.add_edge(*a, *b, Sign { larger: *larger });
            }
            Variant::GreaterThan { signs }
        } else {
            Variant::Standard
        };

        Ok(Grid {
            dim: self.dim,
            cells: self.cells.clone(),
            variant,
        })
    }
}
