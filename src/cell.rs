/// A digit placed on the grid, `1..=dim`.
pub type Digit = usize;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Cell {
    /// A clue fixed before solving.
    Given(Digit),
    /// A digit recovered from the oracle's model.
    Solved(Digit),
    #[default]
    Empty,
}

impl Cell {
    pub(crate) fn digit(&self) -> Option<Digit> {
        match self {
            Self::Given(digit) | Self::Solved(digit) => Some(*digit),
            Self::Empty => None,
        }
    }

    // digits 10 and up (16x16 and 25x25 grids) display as letters
    pub(crate) fn display_char(&self) -> char {
        match self.digit() {
            None => '.',
            Some(digit) => char::from_digit(digit as u32, 36).unwrap_or('?'),
        }
    }
}
