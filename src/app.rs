use std::{thread::sleep, time::Duration};

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};

use crate::config::GameConfig;
use crate::game::{GameController, Tick};
use crate::input::KeyState;
use crate::snake::Heading::{self, *};
use crate::term::TermManager;

pub struct SnakeApp {
    frame: Duration,
    game: GameController,
    keys: KeyState,
    term: TermManager,
}

enum Key {
    Steer(Heading),
    Quit,
}

impl SnakeApp {
    /// Checks the board fits the terminal before allocating it.
    pub fn new(config: &GameConfig) -> Result<Self> {
        let term = TermManager::new();
        if !term.fits(config.cols, config.rows)? {
            bail!("terminal is too small for a {}x{} board", config.cols, config.rows);
        }

        Ok(SnakeApp {
            frame: Duration::from_millis(config.frame_ms),
            game: GameController::new(config)?,
            keys: KeyState::new(),
            term,
        })
    }

    /// Runs until the player quits, leaving the terminal as it was found.
    pub fn run(&mut self) -> Result<()> {
        let term = &mut self.term;
        let setup = term.setup();
        undo_on_error(setup, || {
            // Setup may have switched screens before failing.
            let _ = term.restore();
        })?;

        let res = self.play();
        self.term.restore()?;
        res
    }

    fn play(&mut self) -> Result<()> {
        loop {
            sleep(self.frame);

            for key_ev in self.term.read_key_events_queue()? {
                match classify(&key_ev) {
                    Some(Key::Quit) => return Ok(()),
                    Some(Key::Steer(heading)) => self.keys.press(heading),
                    None => {}
                }
            }

            let tick = self.game.update(&self.keys)?;
            // Terminals only report presses, so a key counts as held for one frame.
            self.keys.release_all();

            match tick {
                Tick::Ate { score } => debug!("score {}, length {}", score, self.game.snake().len()),
                Tick::GameOver { cause, score } => info!("crashed into {:?} with score {}", cause, score),
                Tick::BoardFull { score } => info!("board filled with score {}", score),
                _ => {}
            }

            self.term.render(self.game.grid(), self.game.score())?;
        }
    }
}

fn classify(ev: &KeyEvent) -> Option<Key> {
    if is_ctrl_c(ev) {
        return Some(Key::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Key::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Key::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Key::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Key::Steer(Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

fn undo_on_error<E>(res: std::result::Result<(), E>, undo: impl FnOnce()) -> std::result::Result<(), E> {
    if res.is_err() {
        undo();
    }
    res
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        let cases = vec![
            (KeyCode::Up, Up),
            (KeyCode::Char('w'), Up),
            (KeyCode::Left, Left),
            (KeyCode::Char('a'), Left),
            (KeyCode::Down, Down),
            (KeyCode::Char('s'), Down),
            (KeyCode::Right, Right),
            (KeyCode::Char('d'), Right),
        ];

        for (code, expected) in cases {
            assert!(matches!(classify(&key(code)), Some(Key::Steer(h)) if h == expected));
        }
    }

    #[test]
    fn failed_setup_is_undone() {
        let mut undone = false;
        let res = undo_on_error(Err("raw mode unavailable"), || undone = true);
        assert_eq!(res, Err("raw mode unavailable"));
        assert!(undone);

        let mut undone = false;
        let res: std::result::Result<(), &str> = undo_on_error(Ok(()), || undone = true);
        assert!(res.is_ok());
        assert!(!undone);
    }

    #[test]
    fn quitting_and_ignored_keys() {
        assert!(matches!(classify(&key(KeyCode::Char('q'))), Some(Key::Quit)));
        assert!(matches!(classify(&key(KeyCode::Esc)), Some(Key::Quit)));
        assert!(matches!(
            classify(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Quit)
        ));
        assert!(classify(&key(KeyCode::Char('c'))).is_none());
        assert!(classify(&key(KeyCode::Enter)).is_none());
    }
}
