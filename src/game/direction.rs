use super::grid::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction.  The result is
    /// not clamped to the board.
    pub(crate) fn advance(self, pos: Position) -> Position {
        let Position { x, y } = pos;
        match self {
            Direction::North => Position::new(x, y.saturating_sub(1)),
            Direction::East => Position::new(x.saturating_add(1), y),
            Direction::South => Position::new(x, y.saturating_add(1)),
            Direction::West => Position::new(x.saturating_sub(1), y),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }
}
