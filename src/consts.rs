//! Assorted constants & hard-coded configuration
use crate::game::{Bounds, Direction, Position};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Size of the board in cells
pub(crate) const GRID: Bounds = Bounds::new(30, 30);

/// Where the snake's head starts at the beginning of each game
pub(crate) const SNAKE_START: Position = Position::new(10, 10);

/// The direction the snake faces at the beginning of each game
pub(crate) const SNAKE_START_DIRECTION: Direction = Direction::East;

/// Snake length at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded for each piece of food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// The level goes up every time the score passes a multiple of this
pub(crate) const POINTS_PER_LEVEL: u32 = 50;

/// Time between movements of the snake at level 0
pub(crate) const BASE_TICK_PERIOD: Duration = Duration::from_millis(150);

/// How much faster the snake gets with each level
pub(crate) const TICK_DECREMENT: Duration = Duration::from_millis(10);

/// The snake never moves faster than this
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(80);

/// How many random cells to try when placing food before falling back to
/// choosing among the free cells directly
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Name of the directory under the platform's local config & data
/// directories in which files are stored
pub(crate) const APP_DIR_NAME: &str = "gridsnake";

/// Name of the file in which the high score is stored
pub(crate) const HIGH_SCORE_FILE_NAME: &str = "high-score.json";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 32,
};

/// Each grid cell is drawn this many terminal columns wide so that the board
/// comes out roughly square
pub(crate) const CELL_WIDTH: u16 = 2;

/// Width of the stats panel to the right of the board
pub(crate) const PANEL_WIDTH: u16 = 16;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: &str = "▲▲";

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: &str = "▼▼";

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: &str = "▶▶";

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: &str = "◀◀";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "●●";

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the labels in the stats panel
pub(crate) const LABEL_STYLE: Style = Style::new().fg(Color::Gray);

/// Style for the score
pub(crate) const SCORE_STYLE: Style = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);

/// Style for the level
pub(crate) const LEVEL_STYLE: Style = Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD);

/// Style for the high score and the new-record banner
pub(crate) const HIGH_SCORE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
