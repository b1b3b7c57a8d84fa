use crate::consts;
use rand::Rng;
use std::time::Duration;

/// A cell on the board.  `x` is the column and `y` is the row, both counted
/// from the top-left corner.
///
/// Coordinates are signed so that a move off the top or left edge can be
/// represented and then rejected by [`Bounds::is_out_of_bounds()`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }
}

/// The dimensions of the board, in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Bounds {
    pub(crate) const fn new(width: i32, height: i32) -> Bounds {
        Bounds { width, height }
    }

    /// Is `pos` outside of the board?
    pub(crate) fn is_out_of_bounds(self, pos: Position) -> bool {
        !self.contains(pos)
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Total number of cells on the board
    pub(crate) fn area(self) -> usize {
        let width = usize::try_from(self.width).unwrap_or_default();
        let height = usize::try_from(self.height).unwrap_or_default();
        width.saturating_mul(height)
    }

    /// Iterate over every cell on the board in row-major order
    pub(crate) fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Pick a cell uniformly at random.  The cell may well be occupied; it is
    /// up to the caller to reroll.
    pub(crate) fn random_position<R: Rng>(self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }
}

/// Time between snake movements at the given level.  Each level shaves
/// [`TICK_DECREMENT`][consts::TICK_DECREMENT] off of
/// [`BASE_TICK_PERIOD`][consts::BASE_TICK_PERIOD], down to a floor of
/// [`MIN_TICK_PERIOD`][consts::MIN_TICK_PERIOD].
pub(crate) fn speed_for_level(level: u32) -> Duration {
    consts::BASE_TICK_PERIOD
        .saturating_sub(consts::TICK_DECREMENT.saturating_mul(level))
        .max(consts::MIN_TICK_PERIOD)
}
