use std::collections::{HashMap, HashSet};
use std::convert::identity;
use std::ops::RangeInclusive;

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use varisat::{CnfFormula, Lit, Solver};

use crate::cell::{Cell, Digit};
use crate::grid::Grid;
use crate::location::Location;
use crate::logic::{dnf_to_cnf, not_both};
use crate::variant::{self, Cage, Sign, Variant};

/// Reasons a solve may fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
pub enum SolverFailure {
    /// The SAT oracle detected a logical inconsistency, i.e. the puzzle as stated is unsolvable.
    Inconsistent,
    /// The oracle's model assigned no digit to at least one cell.
    /// This should probably never happen.
    NoDigitFound,
}

/// A SAT variable id. Primary variables (one per digit/cell combination) occupy `1..=dim³`;
/// auxiliary variables from Tseitin transforms live strictly above that range.
pub(crate) type VarId = i32;
/// A variable id, negated if negative. DIMACS sign convention.
pub(crate) type Literal = i32;

/// Map a digit/cell combination to its primary variable: a bijection onto `1..=dim³`.
pub(crate) fn var(digit: Digit, location: Location, dim: usize) -> VarId {
    (digit + dim * location.linear_index(dim)) as VarId
}

/// Inverse of [`var`] for the cell part; the digit is then `var - dim * linear_index`.
pub(crate) fn location_of(var: VarId, dim: usize) -> Location {
    Location::from_linear_index((var as usize - 1) / dim, dim)
}

/// The clause-encoding engine. One instance exists per solve attempt and owns the growing clause
/// store, the auxiliary-variable counter, and the cage permutation cache; nothing is shared across
/// concurrent solves.
pub(crate) struct Encoder {
    dim: usize,
    pub(crate) clauses: Vec<Vec<Literal>>,
    pub(crate) next_aux: VarId,
    permutation_pool: HashMap<usize, Vec<Vec<Digit>>>,
}

impl Encoder {
    pub(crate) fn new(dim: usize) -> Self {
        Self {
            dim,
            clauses: Vec::new(),
            next_aux: (dim * dim * dim) as VarId + 1,
            permutation_pool: HashMap::new(),
        }
    }

    #[inline]
    fn digits(&self) -> RangeInclusive<Digit> {
        1..=self.dim
    }

    fn push(&mut self, clause: Vec<Literal>) {
        self.clauses.push(clause);
    }

    /// Unit clauses fixing every given digit.
    fn givens(&mut self, cells: &Array2<Cell>) {
        for (index, cell) in cells.indexed_iter() {
            if let Some(digit) = cell.digit() {
                let unit = vec![var(digit, Location::from(index), self.dim)];
                self.push(unit);
            }
        }
    }

    /// Every cell holds at least one digit.
    ///
    /// The complementary per-cell at-most-one constraint is deliberately not emitted: a second
    /// digit in the same cell always collides with the row, column, and block pair clauses.
    pub(crate) fn coverage(&mut self) {
        for row in 0..self.dim {
            for col in 0..self.dim {
                let clause = self
                    .digits()
                    .map(|digit| var(digit, Location(col, row), self.dim))
                    .collect();
                self.push(clause);
            }
        }
    }

    /// No digit appears twice in any row.
    pub(crate) fn row_uniqueness(&mut self) {
        for row in 0..self.dim {
            for digit in self.digits() {
                for (c1, c2) in (0..self.dim).tuple_combinations() {
                    let clause = not_both(
                        var(digit, Location(c1, row), self.dim),
                        var(digit, Location(c2, row), self.dim),
                    );
                    self.push(clause);
                }
            }
        }
    }

    /// No digit appears twice in any column.
    pub(crate) fn column_uniqueness(&mut self) {
        for col in 0..self.dim {
            for digit in self.digits() {
                for (r1, r2) in (0..self.dim).tuple_combinations() {
                    let clause = not_both(
                        var(digit, Location(col, r1), self.dim),
                        var(digit, Location(col, r2), self.dim),
                    );
                    self.push(clause);
                }
            }
        }
    }

    /// No digit appears twice among `cells`.
    ///
    /// `cells` must be in canonical intra-region order; `tuple_combinations` then visits each
    /// unordered pair exactly once, so no "not both" clause is emitted twice.
    fn region_uniqueness(&mut self, cells: &[Location]) {
        for digit in self.digits() {
            for (a, b) in cells.iter().tuple_combinations() {
                let clause = not_both(var(digit, *a, self.dim), var(digit, *b, self.dim));
                self.push(clause);
            }
        }
    }

    /// No digit appears twice in any block. Blocks partition the grid: 2 rows × 3 columns at side
    /// 6, √dim × √dim otherwise.
    pub(crate) fn block_uniqueness(&mut self) {
        let block = variant::block_dims(self.dim);
        for row in (0..self.dim).step_by(block.0) {
            for col in (0..self.dim).step_by(block.1) {
                let cells = variant::block_cells(Location(col, row), block);
                self.region_uniqueness(&cells);
            }
        }
    }

    /// The rules every variant shares: givens, coverage, and row/column/block uniqueness.
    pub(crate) fn standard_rules(&mut self, cells: &Array2<Cell>) {
        self.givens(cells);
        self.coverage();
        self.row_uniqueness();
        self.column_uniqueness();
        self.block_uniqueness();
    }

    /// No digit appears twice in any of the four extra windows of a Hyper Sudoku.
    pub(crate) fn window_uniqueness(&mut self) {
        for origin in variant::HYPER_WINDOWS {
            let cells = variant::block_cells(origin, (3, 3));
            self.region_uniqueness(&cells);
        }
    }

    /// All ordered tuples of `size` distinct digits from 1..=9 summing to `total`.
    ///
    /// The unfiltered tuple lists are cached by `size`, since killer puzzles typically repeat cage
    /// sizes many times.
    pub(crate) fn sum_permutations(&mut self, size: usize, total: usize) -> Vec<Vec<Digit>> {
        self.permutation_pool
            .entry(size)
            .or_insert_with(|| (1..=9).permutations(size).collect())
            .iter()
            .filter(|tuple| tuple.iter().sum::<usize>() == total)
            .cloned()
            .collect()
    }

    /// Killer cage sums: each cage is satisfied by some permutation of distinct digits reaching
    /// its total, stated as a DNF over the cage's cells and Tseitin-transformed.
    ///
    /// A total no permutation reaches leaves the DNF empty; the transform then renders the whole
    /// clause set unsatisfiable, which is the correct outcome for an impossible cage.
    pub(crate) fn cage_sums(&mut self, cages: &[Cage]) {
        for cage in cages {
            let terms = self
                .sum_permutations(cage.cells.len(), cage.total)
                .into_iter()
                .map(|tuple| {
                    tuple
                        .into_iter()
                        .zip(cage.cells.iter())
                        .map(|(digit, cell)| var(digit, *cell, self.dim))
                        .collect()
                })
                .collect_vec();
            self.apply_dnf(terms);
        }
    }

    /// Per-cell digit-range pruning for Greater-Than Sudoku.
    ///
    /// A cell larger than `g` of its `e` signed neighbors can hold neither the lowest `g` digits
    /// nor the highest `e - g`; one clause per cell admits only the remaining range. This is a
    /// necessary condition that narrows the search; full correctness comes from
    /// [`sign_inequalities`](Self::sign_inequalities).
    pub(crate) fn sign_range_pruning(&mut self, signs: &UnGraphMap<Location, Sign>) {
        for cell in signs.nodes() {
            let incident = signs.edges(cell).collect_vec();
            if incident.is_empty() {
                continue;
            }

            let greater = incident.iter().filter(|(_, _, sign)| sign.larger == cell).count();
            let clause = (greater + 1..=self.dim - (incident.len() - greater))
                .map(|digit| var(digit, cell, self.dim))
                .collect();
            self.push(clause);
        }
    }

    /// Pairwise inequality per sign: the two cells hold some digit pair respecting the recorded
    /// direction, stated as a DNF over all such pairs and Tseitin-transformed.
    pub(crate) fn sign_inequalities(&mut self, signs: &UnGraphMap<Location, Sign>) {
        for (a, b, sign) in signs.all_edges() {
            let terms = self
                .digits()
                .cartesian_product(self.digits())
                .filter(|(da, db)| if sign.larger == a { da > db } else { db > da })
                .map(|(da, db)| vec![var(da, a, self.dim), var(db, b, self.dim)])
                .collect_vec();
            self.apply_dnf(terms);
        }
    }

    /// Tseitin-transform `terms` into the clause store, advancing the auxiliary counter so that no
    /// two transforms (nor the primary range) ever share a variable id.
    fn apply_dnf(&mut self, terms: Vec<Vec<Literal>>) {
        let (clauses, next_aux) = dnf_to_cnf(&terms, self.next_aux);
        debug_assert!(next_aux > self.next_aux);
        self.clauses.extend(clauses);
        self.next_aux = next_aux;
    }

    /// Encode `grid` into a clause set, selecting the generator set by puzzle variant.
    ///
    /// Generators never fail; an internally inconsistent puzzle simply produces an unsatisfiable
    /// clause set, detected later by the oracle.
    pub(crate) fn encode(grid: &Grid) -> Self {
        let mut encoder = Self::new(grid.dim);

        match &grid.variant {
            Variant::Standard => {}
            Variant::Hyper => encoder.window_uniqueness(),
            Variant::Killer { cages } => encoder.cage_sums(cages),
            Variant::GreaterThan { signs } => {
                encoder.sign_range_pruning(signs);
                encoder.sign_inequalities(signs);
            }
        }
        // cage and sign logic alone does not imply the standard rules
        encoder.standard_rules(&grid.cells);

        encoder
    }

    /// Hand the clause store to the oracle and return the set of variables it made true, or
    /// [`Inconsistent`](SolverFailure::Inconsistent) on UNSAT.
    pub(crate) fn solve_oracle(&self) -> Result<HashSet<VarId>, SolverFailure> {
        let formula = CnfFormula::from(self.clauses.iter().map(|clause| {
            clause
                .iter()
                .map(|lit| Lit::from_dimacs(*lit as isize))
                .collect_vec()
        }));

        let mut solver = Solver::new();
        solver.add_formula(&formula);
        if !solver.solve().is_ok_and(identity) {
            return Err(SolverFailure::Inconsistent);
        }
        let model = solver.model().unwrap();

        Ok(model
            .iter()
            .filter(|lit| lit.is_positive())
            .map(|lit| lit.var().to_dimacs() as VarId)
            .collect())
    }
}

/// Inverse of the variable encoder: every true primary variable names a digit/cell combination,
/// written back into a copy of `cells`. Givens are kept as is.
pub(crate) fn decode(
    truths: &HashSet<VarId>,
    dim: usize,
    cells: &Array2<Cell>,
) -> Result<Array2<Cell>, SolverFailure> {
    let mut solved = cells.clone();
    for id in truths {
        if *id > (dim * dim * dim) as VarId {
            // a Tseitin auxiliary, which carries no digit
            continue;
        }

        let location = location_of(*id, dim);
        let digit = *id as usize - dim * location.linear_index(dim);
        let cell = &mut solved[location.as_index()];
        if cell.digit().is_none() {
            *cell = Cell::Solved(digit);
        }
    }

    if solved.iter().any(|cell| cell.digit().is_none()) {
        return Err(SolverFailure::NoDigitFound);
    }
    Ok(solved)
}
