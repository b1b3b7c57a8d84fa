use crate::command::Command;
use crate::consts;
use crate::game::{Direction, Game, Position, RunState};
use crate::highscores::HighScoreStore;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The terminal front end for a [`Game`]: draws it, feeds it key presses, and
/// calls [`Game::tick()`] on schedule
#[derive(Clone, Debug)]
pub(crate) struct GameScreen<S, R = rand::rngs::ThreadRng> {
    game: Game<S, R>,
    /// When the next tick is due.  Only set while the game is being played.
    next_tick: Option<Instant>,
}

impl<S: HighScoreStore, R: Rng> GameScreen<S, R> {
    pub(crate) fn new(game: Game<S, R>) -> Self {
        GameScreen {
            game,
            next_tick: None,
        }
    }

    /// Wait for either the next key press or the next tick, whichever comes
    /// first, and act on it
    pub(crate) fn process_input(&mut self) -> io::Result<Status> {
        if self.game.state() == RunState::Playing {
            let interval = self.game.tick_interval();
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + interval);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                let _ = self.game.tick();
                // The interval is recomputed for the next tick in case the
                // level changed.
                self.next_tick = None;
                Ok(Status::Running)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            self.next_tick = None;
            Ok(self.handle_event(read()?))
        }
    }

    fn handle_event(&mut self, event: Event) -> Status {
        if event == Event::FocusLost {
            if self.game.state() == RunState::Playing {
                let _ = self.game.toggle_pause();
            }
            return Status::Running;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return Status::Running;
        };
        let _ = match cmd {
            Command::Quit => return Status::Quit,
            Command::Up => self.game.change_direction(Direction::North),
            Command::Down => self.game.change_direction(Direction::South),
            Command::Left => self.game.change_direction(Direction::West),
            Command::Right => self.game.change_direction(Direction::East),
            Command::Enter => self.game.start(),
            Command::Pause => self.game.toggle_pause(),
            Command::Restart => self.game.reset(),
        };
        Status::Running
    }
}

impl<S, R> GameScreen<S, R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Running,
    Quit,
}

impl<S, R> Widget for &GameScreen<S, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = &self.game;
        let bounds = game.bounds();
        let board_size = Size {
            width: u16::try_from(bounds.width)
                .unwrap_or_default()
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: u16::try_from(bounds.height)
                .unwrap_or_default()
                .saturating_add(2),
        };
        let display = get_display_area(area);
        let [board_area, panel_area] = Layout::horizontal([
            Constraint::Length(board_size.width),
            Constraint::Length(consts::PANEL_WIDTH),
        ])
        .flex(Flex::Start)
        .spacing(1)
        .areas(display);
        let [board_area] = Layout::vertical([board_size.height])
            .flex(Flex::Start)
            .areas(board_area);

        Block::bordered()
            .title(" SNAKE ")
            .title_alignment(Alignment::Center)
            .render(board_area, buf);
        let mut board = Canvas {
            area: board_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &p in game.snake().segments().iter().skip(1) {
            board.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(food) = game.food() {
            board.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        let head = game.snake().head();
        if game.state() == RunState::GameOver {
            board.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            let symbol = match game.direction() {
                Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
                Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
                Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
                Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
            };
            board.draw_cell(head, symbol, consts::SNAKE_STYLE);
        }

        if let Some(popup) = Popup::for_game(game) {
            popup.render(board.area, board.buf);
        }
        StatsPanel::for_game(game).render(panel_area, buf);
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let Some(x) = x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        if x >= self.area.right() || y >= self.area.bottom() {
            return;
        }
        let width = usize::from(self.area.right() - x);
        let _ = self
            .buf
            .set_stringn(x, y, symbol, width, Style::reset().patch(style));
    }
}

/// A box drawn over the middle of the board when the game is not in play
#[derive(Clone, Debug, Eq, PartialEq)]
struct Popup {
    title: &'static str,
    lines: Vec<Line<'static>>,
}

impl Popup {
    const WIDTH: u16 = 28;

    fn for_game<S, R>(game: &Game<S, R>) -> Option<Popup> {
        let stats = game.stats();
        match game.state() {
            RunState::Playing => None,
            RunState::Ready => {
                let verb = if game.has_played() {
                    "play again"
                } else {
                    "start"
                };
                Some(Popup {
                    title: " READY ",
                    lines: vec![key_line("Press ", "Enter", &format!(" to {verb}"))],
                })
            }
            RunState::Paused => Some(Popup {
                title: " PAUSED ",
                lines: vec![
                    key_line("Press ", "Space", " to resume"),
                    key_line("Press ", "r", " to restart"),
                ],
            }),
            RunState::GameOver | RunState::Cleared => {
                let mut lines = Vec::new();
                if game.state() == RunState::Cleared {
                    lines.push(Line::from("You filled the board!"));
                }
                lines.push(Line::from(format!("Final Score: {}", stats.score)));
                if stats.new_record {
                    lines.push(Line::styled("New High Score!", consts::HIGH_SCORE_STYLE));
                }
                lines.push(key_line("Press ", "r", " to restart"));
                Some(Popup {
                    title: " GAME OVER ",
                    lines,
                })
            }
        }
    }
}

impl Widget for Popup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let popup_area = center_rect(
            area,
            Size {
                width: Popup::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .style(Style::reset());
        let inner = block.inner(popup_area);
        Clear.render(popup_area, buf);
        block.render(popup_area, buf);
        Text::from(self.lines).centered().render(inner, buf);
    }
}

fn key_line(before: &str, key: &'static str, after: &str) -> Line<'static> {
    Line::from_iter([
        Span::raw(before.to_owned()),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(after.to_owned()),
    ])
}

/// The score, level, and high score, plus a reminder of the controls
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct StatsPanel {
    score: u32,
    level: u32,
    high_score: u32,
}

impl StatsPanel {
    fn for_game<S, R>(game: &Game<S, R>) -> StatsPanel {
        let stats = game.stats();
        StatsPanel {
            score: stats.score,
            level: stats.level,
            high_score: stats.high_score,
        }
    }
}

impl Widget for StatsPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" STATS ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        block.render(area, buf);
        let text = Text::from_iter([
            Line::styled("Score", consts::LABEL_STYLE),
            Line::styled(self.score.to_string(), consts::SCORE_STYLE),
            Line::default(),
            Line::styled("Level", consts::LABEL_STYLE),
            Line::styled(self.level.to_string(), consts::LEVEL_STYLE),
            Line::default(),
            Line::styled("High Score", consts::LABEL_STYLE),
            Line::styled(self.high_score.to_string(), consts::HIGH_SCORE_STYLE),
            Line::default(),
            Line::styled("Controls", consts::LABEL_STYLE),
            key_line("", "←↓↑→", " Move"),
            key_line("", "Enter", " Start"),
            key_line("", "Space", " Pause"),
            key_line("", "r", " Restart"),
            key_line("", "q", " Quit"),
        ]);
        text.render(inner, buf);
    }
}
