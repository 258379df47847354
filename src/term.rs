use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{self, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::grid::{CellKind, Grid};
use crate::{Coords, GridInt};

const CELL: &str = "  ";

const GRASS: Color = Color::Rgb { r: 0x00, g: 0x7e, b: 0x30 };
const SNAKE: Color = Color::Rgb { r: 0x00, g: 0x20, b: 0x00 };
const FOOD: Color = Color::Rgb { r: 0xc3, g: 0xb1, b: 0x00 };

/// Draws the board; reads game state, never changes it. Cells are two
/// characters wide so they come out roughly square.
pub struct TermManager {
    stdout: Stdout,
    // What is on screen right now, so a frame only repaints cells that changed.
    drawn: Vec<CellKind>,
    drawn_score: Option<u32>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), drawn: vec![], drawn_score: None }
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Whether a board of this size, with its border and score line, fits the terminal.
    pub fn fits(&self, cols: GridInt, rows: GridInt) -> crossterm::Result<bool> {
        let (width, height) = terminal::size()?;
        Ok(board_width(cols) <= width as u32 && rows as u32 + 3 <= height as u32)
    }

    /// Every key pressed since the last call.
    pub fn read_key_events_queue(&self) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn render(&mut self, grid: &Grid, score: u32) -> crossterm::Result<()> {
        let cells_on_board = grid.cols() as usize * grid.rows() as usize;
        if self.drawn.len() != cells_on_board {
            self.clear()?;
            self.draw_borders(grid.cols(), grid.rows())?;
            self.drawn = vec![];
        }

        for (i, (pos, kind)) in grid.cells().enumerate() {
            if self.drawn.get(i) == Some(&kind) {
                continue;
            }
            self.print_cell(pos, kind)?;
        }
        self.drawn = grid.cells().map(|(_, kind)| kind).collect();

        if self.drawn_score != Some(score) {
            queue!(
                self.stdout,
                cursor::MoveTo(0, grid.rows() + 2),
                terminal::Clear(ClearType::CurrentLine),
                style::Print(format!("Score: {}", score))
            )?;
            self.drawn_score = Some(score);
        }

        self.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_cell(&mut self, (x, y): Coords, kind: CellKind) -> crossterm::Result<()> {
        let color = match kind {
            CellKind::Empty => GRASS,
            CellKind::SnakeBody => SNAKE,
            CellKind::Food => FOOD,
        };

        queue!(
            self.stdout,
            cursor::MoveTo(1 + x * 2, 1 + y),
            style::SetBackgroundColor(color),
            style::Print(CELL),
            style::ResetColor
        )
    }

    fn draw_borders(&mut self, cols: GridInt, rows: GridInt) -> crossterm::Result<()> {
        // Only reached once `fits` has confirmed the board is narrower than the terminal.
        let width = board_width(cols) as GridInt;
        let end_x = width - 1;
        let end_y = rows + 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> crossterm::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn clear(&mut self) -> crossterm::Result<()> {
        self.drawn_score = None;
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

fn board_width(cols: GridInt) -> u32 {
    cols as u32 * CELL.len() as u32 + 2
}
