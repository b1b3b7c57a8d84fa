use super::direction::Direction;
use super::grid::Position;
use crate::consts;
use std::collections::VecDeque;

/// The snake: where it is and where it's going.
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first.  Never empty.
    pub(super) body: VecDeque<Position>,

    /// The direction the snake moved in on its most recent step
    pub(super) direction: Direction,

    /// The direction the snake will move in on its next step
    pub(super) heading: Direction,
}

impl Snake {
    /// Create a snake of [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH]
    /// cells with its head at `head`, trailing out behind it opposite to
    /// `direction`.
    pub(super) fn new(head: Position, direction: Direction) -> Snake {
        let behind = direction.reverse();
        let body = std::iter::successors(Some(head), |&p| Some(behind.advance(p)))
            .take(consts::INITIAL_SNAKE_LENGTH)
            .collect();
        Snake {
            body,
            direction,
            heading: direction,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        // `body` is never empty, but fall back to the origin instead of
        // panicking.
        self.body.front().copied().unwrap_or_default()
    }

    /// Return the cells of the snake, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Return the direction that will be applied on the next step
    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// The cell the head will move into on the next step
    pub(super) fn next_head(&self) -> Position {
        self.heading.advance(self.head())
    }

    /// Set the heading for the next step.  Turning back on the direction the
    /// snake last moved in is refused, and `false` is returned.
    ///
    /// Only one turn is queued; a later call replaces an earlier one.
    pub(super) fn turn(&mut self, heading: Direction) -> bool {
        if heading.is_opposite(self.direction) {
            false
        } else {
            self.heading = heading;
            true
        }
    }

    /// Move the head to `head`.  Unless `grow` is true, the last cell of the
    /// tail is dropped so that the length stays the same.
    pub(super) fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
        self.direction = self.heading;
    }
}
