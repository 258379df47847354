use log::{debug, info, trace};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::GameConfig;
use crate::errors::InvariantViolation;
use crate::grid::{CellKind, Grid};
use crate::input::KeyState;
use crate::snake::{Heading, Snake};
use crate::GridInt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

/// What a single `update` call did. The terminal variants carry the score the
/// session ended with; by the time they are returned the board is already reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    Idle,
    Moved,
    Ate { score: u32 },
    GameOver { cause: Crash, score: u32 },
    BoardFull { score: u32 },
}

pub struct GameController<R = ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
    score: u32,
    frames: u64,
    ticks_per_step: u64,
    pending: Heading,
}

impl GameController<ThreadRng> {
    pub fn new(config: &GameConfig) -> Result<Self, InvariantViolation> {
        GameController::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_rng(config: &GameConfig, mut rng: R) -> Result<Self, InvariantViolation> {
        let (grid, snake) = fresh_board(config.cols, config.rows, &mut rng)?;
        Ok(GameController::assemble(config, grid, snake, rng))
    }

    /// Starts from an arbitrary snake and food position instead of the usual
    /// opening. Panics if either lies off the board or they overlap.
    #[cfg(test)]
    pub fn from_parts(config: &GameConfig, snake: Snake, food: Option<crate::Coords>, rng: R) -> Self {
        let mut grid = stamp(config.cols, config.rows, &snake);
        if let Some(pos) = food {
            assert_eq!(grid.get(pos), CellKind::Empty, "food placed on the snake at {:?}", pos);
            grid.set(pos, CellKind::Food);
        }

        GameController::assemble(config, grid, snake, rng)
    }

    fn assemble(config: &GameConfig, grid: Grid, snake: Snake, rng: R) -> Self {
        let pending = snake.heading();
        GameController {
            rng,
            grid,
            snake,
            score: 0,
            frames: 0,
            ticks_per_step: config.ticks_per_step.max(1),
            pending,
        }
    }

    /// Called once per frame. Held keys are latched every call, the snake only
    /// moves on every `ticks_per_step`-th call.
    pub fn update(&mut self, keys: &KeyState) -> Result<Tick, InvariantViolation> {
        self.latch(keys);

        self.frames = self.frames.wrapping_add(1);
        if self.frames % self.ticks_per_step != 0 {
            return Ok(Tick::Idle);
        }

        self.step()
    }

    fn latch(&mut self, keys: &KeyState) {
        // Compare against the heading of the last step, not the pending one:
        // Up then Left between two steps of a right-moving snake must not turn it around.
        let moving = self.snake.heading();
        for heading in keys.held() {
            if heading == moving.reverse() {
                trace!("ignoring {:?} while moving {:?}", heading, moving);
                continue;
            }
            self.pending = heading;
        }
    }

    fn step(&mut self) -> Result<Tick, InvariantViolation> {
        self.snake.set_heading(self.pending);

        let grid = &self.grid;
        let candidate = self.pending.step(self.snake.head()).filter(|pos| grid.contains(*pos));
        let next = match candidate {
            Some(pos) => pos,
            None => return self.restart(Tick::GameOver { cause: Crash::Wall, score: self.score }),
        };

        match self.grid.get(next) {
            CellKind::SnakeBody => self.restart(Tick::GameOver { cause: Crash::Body, score: self.score }),

            CellKind::Food => {
                self.score += 1;
                self.snake.insert_head(next);
                self.grid.set(next, CellKind::SnakeBody);

                match self.grid.place_food(&mut self.rng) {
                    Some(food) => {
                        debug!("ate at {:?}, score {}, new food at {:?}", next, self.score, food);
                        Ok(Tick::Ate { score: self.score })
                    }
                    None => self.restart(Tick::BoardFull { score: self.score }),
                }
            }

            CellKind::Empty => {
                self.snake.insert_head(next);
                self.grid.set(next, CellKind::SnakeBody);
                let tail = self.snake.remove_tail()?;
                self.grid.set(tail, CellKind::Empty);
                Ok(Tick::Moved)
            }
        }
    }

    /// Swaps in a fresh board and snake in one go and hands back `outcome`.
    fn restart(&mut self, outcome: Tick) -> Result<Tick, InvariantViolation> {
        info!("{:?}, restarting", outcome);

        let (grid, snake) = fresh_board(self.grid.cols(), self.grid.rows(), &mut self.rng)?;
        self.pending = snake.heading();
        self.grid = grid;
        self.snake = snake;
        self.score = 0;

        Ok(outcome)
    }
}

impl<R> GameController<R> {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The heading the snake will take on its next step.
    #[cfg(test)]
    pub fn heading(&self) -> Heading {
        self.pending
    }

    #[cfg(test)]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn stamp(cols: GridInt, rows: GridInt, snake: &Snake) -> Grid {
    let mut grid = Grid::new(cols, rows);
    for pos in snake.occupied_cells() {
        grid.set(pos, CellKind::SnakeBody);
    }
    grid
}

fn fresh_board<R: Rng>(cols: GridInt, rows: GridInt, rng: &mut R) -> Result<(Grid, Snake), InvariantViolation> {
    let snake = Snake::starting()?;
    let mut grid = stamp(cols, rows, &snake);
    if let Some(food) = grid.place_food(rng) {
        debug!("new session, food at {:?}", food);
    }
    Ok((grid, snake))
}
