#![warn(missing_docs)]

//! # `chromate`
//!
//! A solver for Sudoku and several of its variants: Killer Sudoku, Hyper Sudoku, and Greater-Than
//! Sudoku. Plain grids are supported at sides 4, 6, 9, 16, and 25; the variants are defined on the
//! classic 9×9 grid.
//! Begin by building a grid with [`SudokuBuilder`], placing givens, cages, or inequality signs as
//! the variant requires. Convert it to a [`Grid`], then call [`solve()`](Grid::solve), consuming
//! the grid and yielding a solved version of it.
//!
//! # Internals
//! This crate is driven by expressing the puzzle as a Boolean satisfiability problem (a "SAT"),
//! extracting information from that solver, and re-expressing the grid accordingly.
//! The search itself is delegated entirely to [`varisat`]; this crate only encodes rules into
//! conjunctive normal form and decodes satisfying assignments.
//!
//! A high level overview is as follows:
//!
//! Every (digit, cell) combination becomes one SAT variable, so an `N`-sided grid occupies the
//! variable range `1..=N³`. We assert:
//! 1. Every given digit holds, as a unit clause.
//! 2. Every cell holds at least one digit.
//! 3. No digit appears twice in a row, column, or block, as pairwise "not both" clauses.
//!
//! Killer cages and inequality signs do not reduce to "not both" clauses. Those rules are instead
//! stated as a disjunction of fully conjunctive cases (all digit tuples reaching the cage total,
//! or all digit pairs respecting the recorded sign) and Tseitin-transformed into equisatisfiable
//! CNF using fresh auxiliary variables allocated above the primary range.
//!
//! If the oracle reports the clause set satisfiable, each cell's digit is read back off the model;
//! otherwise the puzzle as stated has no solution and solving fails with
//! [`Inconsistent`](SolverFailure::Inconsistent).

pub use builder::{BuilderInvalidReason, SudokuBuilder};
pub use cell::Digit;
pub use grid::Grid;
pub use location::{Coord, Location};
pub use solver::SolverFailure;
pub use variant::{HorizontalGreater, VerticalGreater};

pub(crate) mod builder;
pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod solver;
pub(crate) mod variant;
