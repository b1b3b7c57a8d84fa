use crate::game::Game;
use crate::highscores::HighScoreStore;
use crate::screen::{GameScreen, Status};
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App {
    screen: GameScreen<Box<dyn HighScoreStore>>,
}

impl App {
    pub(crate) fn new(store: Box<dyn HighScoreStore>) -> App {
        App {
            screen: GameScreen::new(Game::new(store)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.screen.draw(frame))?;
            if self.screen.process_input()? == Status::Quit {
                return Ok(());
            }
        }
    }
}
