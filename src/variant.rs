use petgraph::graphmap::UnGraphMap;

use crate::location::Location;

/// Which side of a horizontal in-block boundary holds the larger digit in a Greater-Than Sudoku.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display)]
pub enum HorizontalGreater {
    /// The left cell is larger.
    Left,
    /// The right cell is larger.
    Right,
}

/// Which side of a vertical in-block boundary holds the larger digit in a Greater-Than Sudoku.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display)]
pub enum VerticalGreater {
    /// The upper cell is larger.
    Up,
    /// The lower cell is larger.
    Down,
}

/// One inequality sign between two adjacent cells, stored as an edge weight on the sign graph.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub(crate) struct Sign {
    /// The endpoint holding the larger digit.
    pub(crate) larger: Location,
}

/// A Killer Sudoku cage: an ordered set of cells whose digits are pairwise distinct and reach a
/// given total.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Cage {
    pub(crate) cells: Vec<Location>,
    pub(crate) total: usize,
}

impl Cage {
    /// The largest total `size` distinct digits from 1..=9 can reach, i.e. 9 + 8 + ...
    pub(crate) fn max_total(size: usize) -> usize {
        size * (19 - size) / 2
    }
}

/// Variant-specific rule data, set once by the builder and read-only afterwards.
#[derive(Clone)]
pub(crate) enum Variant {
    Standard,
    /// Standard rules plus four extra 3×3 windows.
    Hyper,
    /// Standard rules plus cage sums.
    Killer { cages: Vec<Cage> },
    /// Standard rules plus pairwise inequalities. Every cell is a node of the graph; each edge
    /// records which endpoint is larger.
    GreaterThan { signs: UnGraphMap<Location, Sign> },
}

/// Block height and width for a grid of side `dim`: 2 rows × 3 columns at 6, square otherwise.
pub(crate) fn block_dims(dim: usize) -> (usize, usize) {
    match dim {
        6 => (2, 3),
        _ => (dim.isqrt(), dim.isqrt()),
    }
}

/// The cells of the block anchored at `origin`, in canonical intra-block order (row-major within
/// the block). Listing cells this way lets pair generators emit each unordered pair exactly once.
pub(crate) fn block_cells(origin: Location, block: (usize, usize)) -> Vec<Location> {
    let (height, width) = block;
    (0..height)
        .flat_map(|dr| (0..width).map(move |dc| Location(origin.0 + dc, origin.1 + dr)))
        .collect()
}

/// Top-left corners of the four extra windows of a Hyper Sudoku.
pub(crate) const HYPER_WINDOWS: [Location; 4] =
    [Location(1, 1), Location(1, 5), Location(5, 1), Location(5, 5)];
