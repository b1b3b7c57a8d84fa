//! The game simulation: a state machine that moves the snake, resolves
//! collisions, places food, and keeps score.
//!
//! Nothing in here knows about terminals, key presses, or clocks.  A front
//! end reads the state through the accessors on [`Game`] and drives it by
//! calling [`Game::tick()`] every [`Game::tick_interval()`] while the game is
//! [`RunState::Playing`].
mod direction;
mod grid;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{speed_for_level, Bounds, Position};
pub(crate) use self::snake::Snake;
use crate::consts;
use crate::highscores::HighScoreStore;
use crate::util::error_chain;
use rand::{seq::IteratorRandom, Rng};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct Game<S, R = rand::rngs::ThreadRng> {
    rng: R,
    store: S,
    bounds: Bounds,
    snake: Snake,
    /// `None` only once the snake has filled the board
    food: Option<Position>,
    state: RunState,
    stats: Stats,
    has_played: bool,
}

impl<S: HighScoreStore> Game<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(store: S) -> Self {
        Game::new_with_rng(store, rand::rng())
    }
}

impl<S: HighScoreStore, R: Rng> Game<S, R> {
    /// Create a game in the [`RunState::Ready`] state, reading the high score
    /// from `store`.  If the high score cannot be read, it starts at 0.
    pub(crate) fn new_with_rng(store: S, mut rng: R) -> Game<S, R> {
        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("{}", error_chain(&e));
                0
            }
        };
        let bounds = consts::GRID;
        let snake = Snake::new(consts::SNAKE_START, consts::SNAKE_START_DIRECTION);
        let food = place_food(&snake, bounds, &mut rng);
        Game {
            rng,
            store,
            bounds,
            snake,
            food,
            state: RunState::Ready,
            stats: Stats::new(high_score),
            has_played: false,
        }
    }

    /// Advance the snake one cell.  Does nothing unless the game is
    /// [`RunState::Playing`].
    ///
    /// Hitting a wall or the snake's own body ends the game and leaves the
    /// snake where it was.  Otherwise the snake moves, and if its head lands
    /// on the food it grows by one cell, the score goes up, and new food is
    /// placed.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if self.state != RunState::Playing {
            return TickOutcome::Idle;
        }
        let head = self.snake.next_head();
        if self.bounds.is_out_of_bounds(head) {
            return self.crash(Collision::Wall);
        }
        if self.snake.contains(head) {
            return self.crash(Collision::Body);
        }
        let ate = self.food == Some(head);
        self.snake.advance(head, ate);
        if !ate {
            return TickOutcome::Moved;
        }
        if self.stats.add_points(consts::FOOD_REWARD) {
            self.save_high_score();
        }
        self.food = place_food(&self.snake, self.bounds, &mut self.rng);
        if self.food.is_none() {
            log::info!("Board cleared with a score of {}", self.stats.score);
            self.state = RunState::Cleared;
            return TickOutcome::Cleared;
        }
        TickOutcome::Ate
    }

    /// Queue a turn for the next tick.  Ignored (returning `false`) unless
    /// the game is [`RunState::Playing`] and `direction` does not reverse the
    /// snake.
    pub(crate) fn change_direction(&mut self, direction: Direction) -> bool {
        self.state == RunState::Playing && self.snake.turn(direction)
    }

    /// Begin play.  Only valid from [`RunState::Ready`].
    pub(crate) fn start(&mut self) -> bool {
        if self.state != RunState::Ready {
            return false;
        }
        log::info!("Starting game; high score is {}", self.stats.high_score);
        self.state = RunState::Playing;
        self.has_played = true;
        true
    }

    /// Switch between [`RunState::Playing`] and [`RunState::Paused`].
    /// Ignored in any other state.
    pub(crate) fn toggle_pause(&mut self) -> bool {
        match self.state {
            RunState::Playing => self.state = RunState::Paused,
            RunState::Paused => self.state = RunState::Playing,
            RunState::Ready | RunState::GameOver | RunState::Cleared => return false,
        }
        true
    }

    /// Put the snake back at the start, place new food, and zero the score,
    /// returning to [`RunState::Ready`].  The high score is kept.  Only
    /// valid once a game is paused or over.
    pub(crate) fn reset(&mut self) -> bool {
        if matches!(self.state, RunState::Ready | RunState::Playing) {
            return false;
        }
        self.snake = Snake::new(consts::SNAKE_START, consts::SNAKE_START_DIRECTION);
        self.food = place_food(&self.snake, self.bounds, &mut self.rng);
        self.stats = Stats::new(self.stats.high_score);
        self.state = RunState::Ready;
        true
    }

    fn crash(&mut self, collision: Collision) -> TickOutcome {
        log::info!(
            "Game over: {collision} collision with a score of {}",
            self.stats.score
        );
        self.state = RunState::GameOver;
        TickOutcome::Crashed(collision)
    }

    fn save_high_score(&mut self) {
        if let Err(e) = self.store.save(self.stats.high_score) {
            log::warn!("{}", error_chain(&e));
        }
    }
}

impl<S, R> Game<S, R> {
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    /// The direction the snake will move in on the next tick
    pub(crate) fn direction(&self) -> Direction {
        self.snake.heading()
    }

    pub(crate) fn state(&self) -> RunState {
        self.state
    }

    pub(crate) fn stats(&self) -> Stats {
        self.stats
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Has [`Game::start()`] ever been called on this game?
    pub(crate) fn has_played(&self) -> bool {
        self.has_played
    }

    /// How long to wait between ticks at the current level
    pub(crate) fn tick_interval(&self) -> Duration {
        speed_for_level(self.stats.level)
    }
}

/// Pick a free cell for the food.  A handful of random cells are tried first;
/// if they all land on the snake, a free cell is chosen directly.  Returns
/// `None` if the snake covers the whole board.
fn place_food<R: Rng>(snake: &Snake, bounds: Bounds, rng: &mut R) -> Option<Position> {
    if snake.len() < bounds.area() {
        for _ in 0..consts::FOOD_PLACEMENT_ATTEMPTS {
            let pos = bounds.random_position(rng);
            if !snake.contains(pos) {
                return Some(pos);
            }
        }
    }
    bounds
        .positions()
        .filter(|&p| !snake.contains(p))
        .choose(rng)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RunState {
    /// Waiting for the player to start
    Ready,
    Playing,
    Paused,
    /// The snake hit a wall or itself
    GameOver,
    /// The snake has filled the board and there are no more cells to place
    /// food in.
    Cleared,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Stats {
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) level: u32,
    /// Has the high score been beaten during the current game?
    pub(crate) new_record: bool,
}

impl Stats {
    fn new(high_score: u32) -> Stats {
        Stats {
            score: 0,
            high_score,
            level: level_for_score(0),
            new_record: false,
        }
    }

    /// Add `points` to the score and recompute the level.  Returns `true` if
    /// the high score was raised.
    fn add_points(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        self.level = level_for_score(self.score);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_record = true;
            true
        } else {
            false
        }
    }
}

pub(crate) fn level_for_score(score: u32) -> u32 {
    score / consts::POINTS_PER_LEVEL + 1
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The game is not being played, so nothing happened
    Idle,
    Moved,
    /// The snake ate the food and grew
    Ate,
    Crashed(Collision),
    /// The snake ate the last piece of food that could fit on the board
    Cleared,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Body,
}

impl std::fmt::Display for Collision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collision::Wall => f.write_str("wall"),
            Collision::Body => f.write_str("body"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{FileStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123_4567_89AB_CDEF;

    type TestGame = Game<MemoryStore, ChaCha12Rng>;

    fn new_game() -> TestGame {
        Game::new_with_rng(MemoryStore::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn playing_game() -> TestGame {
        let mut game = new_game();
        assert!(game.start(), "start should be accepted");
        game
    }

    fn set_snake(game: &mut TestGame, cells: &[(i32, i32)], direction: Direction) {
        game.snake.body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        game.snake.direction = direction;
        game.snake.heading = direction;
        if game.food.is_some_and(|f| game.snake.contains(f)) {
            game.food = Some(Position::new(0, 0));
        }
    }

    fn initial_snake() -> VecDeque<Position> {
        VecDeque::from([
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
        ])
    }

    #[test]
    fn new_game_is_ready() {
        let mut game = new_game();
        assert_eq!(game.state(), RunState::Ready);
        assert_eq!(game.snake().segments(), &initial_snake());
        assert_eq!(game.direction(), Direction::East);
        assert_eq!(
            game.stats(),
            Stats {
                score: 0,
                high_score: 0,
                level: 1,
                new_record: false
            }
        );
        let food = game.food().expect("food should be placed");
        assert!(game.bounds().contains(food), "food is off the board");
        assert!(!game.snake().contains(food), "food is on the snake");
        assert!(!game.has_played(), "no game has been started");
        assert_eq!(game.tick_interval(), Duration::from_millis(140));

        assert_eq!(game.tick(), TickOutcome::Idle);
        assert!(!game.change_direction(Direction::North), "turn while ready");
        assert!(!game.toggle_pause(), "pause while ready");
        assert_eq!(game.snake().segments(), &initial_snake());
        assert_eq!(game.direction(), Direction::East);
    }

    #[test]
    fn loads_high_score() {
        let game = Game::new_with_rng(MemoryStore(70), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(game.stats().high_score, 70);
        assert_eq!(game.stats().score, 0);
    }

    #[test]
    fn start_only_from_ready() {
        let mut game = new_game();
        assert!(game.start(), "start from ready");
        assert_eq!(game.state(), RunState::Playing);
        assert!(game.has_played(), "game has been started");
        assert!(!game.start(), "start while playing");
        assert!(game.toggle_pause(), "pause while playing");
        assert!(!game.start(), "start while paused");
        assert_eq!(game.state(), RunState::Paused);
    }

    #[test]
    fn moves_forward() {
        let mut game = playing_game();
        let food = game.food();
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(
            game.snake().segments(),
            &VecDeque::from([
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
            ])
        );
        assert_eq!(game.food(), food);
        assert_eq!(game.stats().score, 0);
    }

    #[test]
    fn reversal_is_rejected() {
        let mut game = playing_game();
        assert!(!game.change_direction(Direction::West), "west reverses east");
        assert_eq!(game.direction(), Direction::East);
        assert!(game.change_direction(Direction::North), "north is a turn");
        assert_eq!(game.direction(), Direction::North);
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake().head(), Position::new(10, 9));
    }

    #[test]
    fn latest_turn_wins() {
        let mut game = playing_game();
        assert!(game.change_direction(Direction::North), "north is a turn");
        assert!(game.change_direction(Direction::South), "south is a turn");
        assert!(
            !game.change_direction(Direction::West),
            "west still reverses the last move"
        );
        assert_eq!(game.direction(), Direction::South);
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake().head(), Position::new(10, 11));
    }

    #[rstest]
    #[case(&[(29, 5), (28, 5), (27, 5)], Direction::East)]
    #[case(&[(0, 5), (1, 5), (2, 5)], Direction::West)]
    #[case(&[(5, 0), (5, 1), (5, 2)], Direction::North)]
    #[case(&[(5, 29), (5, 28), (5, 27)], Direction::South)]
    fn wall_collision(#[case] cells: &[(i32, i32)], #[case] direction: Direction) {
        let mut game = playing_game();
        set_snake(&mut game, cells, direction);
        let before = game.snake().clone();
        let food = game.food();
        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Wall));
        assert_eq!(game.state(), RunState::GameOver);
        assert_eq!(game.snake(), &before);
        assert_eq!(game.food(), food);
    }

    #[test]
    fn self_collision() {
        let mut game = playing_game();
        set_snake(
            &mut game,
            &[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4), (4, 3)],
            Direction::North,
        );
        assert!(game.change_direction(Direction::West), "west is a turn");
        let before = game.snake().clone();
        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Body));
        assert_eq!(game.state(), RunState::GameOver);
        assert_eq!(game.snake(), &before);
    }

    #[test]
    fn collision_with_tail_end() {
        let mut game = playing_game();
        set_snake(&mut game, &[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::North);
        assert!(game.change_direction(Direction::West), "west is a turn");
        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Body));
        assert_eq!(game.state(), RunState::GameOver);
    }

    #[test]
    fn wall_checked_before_food() {
        let mut game = playing_game();
        set_snake(&mut game, &[(29, 5), (28, 5), (27, 5)], Direction::East);
        game.food = Some(Position::new(30, 5));
        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Wall));
        assert_eq!(game.stats().score, 0);
        assert_eq!(game.snake().len(), 3);
    }

    #[test]
    fn eat_food() {
        let mut game = playing_game();
        game.food = Some(Position::new(11, 10));
        assert_eq!(game.tick(), TickOutcome::Ate);
        assert_eq!(
            game.snake().segments(),
            &VecDeque::from([
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ])
        );
        let food = game.food().expect("food should be placed");
        assert!(!game.snake().contains(food), "food is on the snake");
        assert_eq!(
            game.stats(),
            Stats {
                score: 10,
                high_score: 10,
                level: 1,
                new_record: true
            }
        );
        assert_eq!(game.store, MemoryStore(10));
    }

    #[test]
    fn level_up() {
        let mut game = playing_game();
        game.stats.score = 40;
        game.stats.high_score = 200;
        game.food = Some(Position::new(11, 10));
        assert_eq!(game.tick(), TickOutcome::Ate);
        assert_eq!(game.stats().score, 50);
        assert_eq!(game.stats().level, 2);
        assert_eq!(game.tick_interval(), Duration::from_millis(130));
    }

    #[test]
    fn high_score_not_lowered() {
        let mut game = Game::new_with_rng(MemoryStore(100), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert!(game.start(), "start from ready");
        game.food = Some(Position::new(11, 10));
        assert_eq!(game.tick(), TickOutcome::Ate);
        assert_eq!(game.stats().score, 10);
        assert_eq!(game.stats().high_score, 100);
        assert!(!game.stats().new_record, "100 has not been beaten");
        assert_eq!(game.store, MemoryStore(100));
    }

    #[test]
    fn unusable_store() {
        let tmpdir = tempfile::tempdir().expect("failed to create tempdir");
        // A directory can be neither read nor written as a file.
        let store = FileStore::new(tmpdir.path().to_path_buf());
        let mut game = Game::new_with_rng(store, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(game.stats().high_score, 0);
        assert!(game.start(), "start from ready");
        game.food = Some(Position::new(11, 10));
        assert_eq!(game.tick(), TickOutcome::Ate);
        assert_eq!(game.stats().high_score, 10);
        assert_eq!(game.state(), RunState::Playing);
    }

    #[test]
    fn pause_round_trip() {
        let mut game = playing_game();
        assert_eq!(game.tick(), TickOutcome::Moved);
        let snake = game.snake().clone();
        let food = game.food();
        let stats = game.stats();
        assert!(game.toggle_pause(), "pause while playing");
        assert_eq!(game.state(), RunState::Paused);
        for _ in 0..5 {
            assert_eq!(game.tick(), TickOutcome::Idle);
        }
        assert!(!game.change_direction(Direction::North), "turn while paused");
        assert!(game.toggle_pause(), "resume while paused");
        assert_eq!(game.state(), RunState::Playing);
        assert_eq!(game.snake(), &snake);
        assert_eq!(game.food(), food);
        assert_eq!(game.direction(), Direction::East);
        assert_eq!(game.stats(), stats);
    }

    #[test]
    fn game_over_ignores_everything_but_reset() {
        let mut game = playing_game();
        set_snake(&mut game, &[(29, 5), (28, 5), (27, 5)], Direction::East);
        assert_eq!(game.tick(), TickOutcome::Crashed(Collision::Wall));
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert!(!game.change_direction(Direction::North), "turn after crash");
        assert!(!game.toggle_pause(), "pause after crash");
        assert!(!game.start(), "start after crash");
        assert_eq!(game.state(), RunState::GameOver);
        assert!(game.reset(), "reset after crash");
        assert_eq!(game.state(), RunState::Ready);
    }

    #[test]
    fn reset_refused_while_playing() {
        let mut game = playing_game();
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert!(!game.reset(), "reset while playing");
        assert_eq!(game.state(), RunState::Playing);
        assert_eq!(game.snake().head(), Position::new(11, 10));
    }

    #[test]
    fn reset_refused_while_ready() {
        let mut game = new_game();
        let food = game.food();
        assert!(!game.reset(), "reset while ready");
        assert_eq!(game.state(), RunState::Ready);
        assert_eq!(game.food(), food);
        assert_eq!(game.snake().segments(), &initial_snake());
    }

    #[test]
    fn reset_from_paused() {
        let mut game = playing_game();
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert!(game.toggle_pause(), "pause while playing");
        assert!(game.reset(), "reset while paused");
        assert_eq!(game.state(), RunState::Ready);
        assert_eq!(game.snake().segments(), &initial_snake());
    }

    #[test]
    fn reset_twice() {
        let mut game = Game::new_with_rng(MemoryStore(30), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert!(game.start(), "start from ready");
        game.food = Some(Position::new(11, 10));
        assert_eq!(game.tick(), TickOutcome::Ate);
        assert!(game.change_direction(Direction::North), "north is a turn");
        for _ in 0..20 {
            let _ = game.tick();
        }
        assert_eq!(game.state(), RunState::GameOver);
        let high_score = game.stats().high_score;

        let expected = Stats {
            score: 0,
            high_score,
            level: 1,
            new_record: false,
        };
        for _ in 0..2 {
            assert!(game.reset(), "reset after game over");
            assert_eq!(game.state(), RunState::Ready);
            assert_eq!(game.snake().segments(), &initial_snake());
            assert_eq!(game.direction(), Direction::East);
            assert_eq!(game.stats(), expected);
            let food = game.food().expect("food should be placed");
            assert!(!game.snake().contains(food), "food is on the snake");
        }
    }

    #[test]
    fn fill_the_board() {
        let mut game = playing_game();
        game.bounds = Bounds::new(2, 2);
        game.snake.body = VecDeque::from([
            Position::new(1, 1),
            Position::new(0, 1),
            Position::new(0, 0),
        ]);
        game.snake.direction = Direction::East;
        game.snake.heading = Direction::North;
        game.food = Some(Position::new(1, 0));
        assert_eq!(game.tick(), TickOutcome::Cleared);
        assert_eq!(game.state(), RunState::Cleared);
        assert_eq!(game.food(), None);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert!(!game.toggle_pause(), "pause after clearing the board");
    }

    #[test]
    fn place_food_finds_last_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let bounds = Bounds::new(3, 1);
        let snake = Snake {
            body: VecDeque::from([Position::new(2, 0), Position::new(0, 0)]),
            direction: Direction::East,
            heading: Direction::East,
        };
        for _ in 0..20 {
            assert_eq!(
                place_food(&snake, bounds, &mut rng),
                Some(Position::new(1, 0))
            );
        }
    }

    #[test]
    fn random_play_invariants() {
        let mut game = playing_game();
        let mut rng = ChaCha12Rng::seed_from_u64(!RNG_SEED);
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        let mut games = 0;
        for _ in 0..5000 {
            if rng.random_ratio(1, 4) {
                if let Some(&d) = directions.iter().choose(&mut rng) {
                    let _ = game.change_direction(d);
                }
            }
            let len = game.snake().len();
            let outcome = game.tick();
            let stats = game.stats();
            match outcome {
                TickOutcome::Moved | TickOutcome::Crashed(_) => {
                    assert_eq!(game.snake().len(), len);
                }
                TickOutcome::Ate | TickOutcome::Cleared => {
                    assert_eq!(game.snake().len(), len + 1);
                }
                TickOutcome::Idle => panic!("tick while playing should not be idle"),
            }
            assert!(stats.high_score >= stats.score, "{stats:?}");
            assert_eq!(stats.level, stats.score / 50 + 1, "{stats:?}");
            if let Some(food) = game.food() {
                assert!(!game.snake().contains(food), "food is on the snake");
            }
            if game.state() == RunState::GameOver {
                games += 1;
                assert!(game.reset(), "reset after game over");
                assert!(game.start(), "start after reset");
            }
        }
        assert!(games > 0, "random play should crash at least once");
    }
}
