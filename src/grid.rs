use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Coords, GridInt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    SnakeBody,
    Food,
}

/// Fixed-size board, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: GridInt,
    rows: GridInt,
    cells: Vec<CellKind>,
}

impl Grid {
    pub fn new(cols: GridInt, rows: GridInt) -> Self {
        let cells = vec![CellKind::Empty; cols as usize * rows as usize];
        Grid { cols, rows, cells }
    }

    pub fn cols(&self) -> GridInt {
        self.cols
    }

    pub fn rows(&self) -> GridInt {
        self.rows
    }

    pub fn contains(&self, (x, y): Coords) -> bool {
        x < self.cols && y < self.rows
    }

    /// Panics if `pos` is off the board.
    pub fn set(&mut self, pos: Coords, kind: CellKind) {
        let idx = self.index(pos);
        self.cells[idx] = kind;
    }

    /// Panics if `pos` is off the board.
    pub fn get(&self, pos: Coords) -> CellKind {
        self.cells[self.index(pos)]
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coords, CellKind)> + '_ {
        let cols = self.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, kind)| (((i % cols) as GridInt, (i / cols) as GridInt), *kind))
    }

    pub fn empty_cells(&self) -> Vec<Coords> {
        self.cells()
            .filter(|(_, kind)| *kind == CellKind::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    #[cfg(test)]
    pub fn food(&self) -> Option<Coords> {
        self.cells()
            .find(|(_, kind)| *kind == CellKind::Food)
            .map(|(pos, _)| pos)
    }

    /// Drops food on a uniformly chosen empty cell. Returns `None`, leaving the
    /// board untouched, when there is no empty cell left.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coords> {
        let pos = *self.empty_cells().choose(rng)?;
        self.set(pos, CellKind::Food);
        Some(pos)
    }

    fn index(&self, (x, y): Coords) -> usize {
        assert!(self.contains((x, y)), "{:?} is outside a {}x{} grid", (x, y), self.cols, self.rows);
        y as usize * self.cols as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use super::*;

    #[test]
    fn starts_empty() {
        let grid = Grid::new(4, 3);

        assert_eq!(grid.empty_cells().len(), 12);
        assert_eq!(grid.food(), None);
        assert!(grid.cells().all(|(_, kind)| kind == CellKind::Empty));
    }

    #[test]
    fn empty_cells_are_row_major() {
        let mut grid = Grid::new(3, 2);
        grid.set((1, 0), CellKind::SnakeBody);
        grid.set((0, 1), CellKind::Food);

        assert_eq!(grid.empty_cells(), vec![(0, 0), (2, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn set_overwrites() {
        let mut grid = Grid::new(3, 3);
        grid.set((2, 1), CellKind::Food);
        grid.set((2, 1), CellKind::SnakeBody);

        assert_eq!(grid.get((2, 1)), CellKind::SnakeBody);
        assert_eq!(grid.food(), None);
    }

    #[test]
    fn bounds() {
        let grid = Grid::new(5, 2);

        assert!(grid.contains((4, 1)));
        assert!(!grid.contains((5, 1)));
        assert!(!grid.contains((0, 2)));
    }

    #[test]
    #[should_panic]
    fn set_off_the_board_panics() {
        Grid::new(2, 2).set((2, 0), CellKind::Food);
    }

    #[test]
    fn food_lands_on_an_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let mut grid = Grid::new(3, 3);
            for pos in &[(0, 0), (1, 0), (2, 0), (0, 1), (2, 2)] {
                grid.set(*pos, CellKind::SnakeBody);
            }

            let food = grid.place_food(&mut rng).unwrap();
            assert!(matches!(food, (1, 1) | (2, 1) | (0, 2) | (1, 2)), "food at {:?}", food);
            assert_eq!(grid.food(), Some(food));
        }
    }

    #[test]
    fn every_empty_cell_can_get_food() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = vec![0; 4];

        for _ in 0..2000 {
            let mut grid = Grid::new(2, 2);
            let (x, y) = grid.place_food(&mut rng).unwrap();
            hits[y as usize * 2 + x as usize] += 1;
        }

        // Corners included: a rounding pick would starve the first and last cell.
        assert!(hits.iter().all(|&n| n > 350), "skewed picks: {:?}", hits);
    }

    #[test]
    fn full_board_gets_no_food() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(2, 1);
        grid.set((0, 0), CellKind::SnakeBody);
        grid.set((1, 0), CellKind::SnakeBody);
        let before = grid.clone();

        assert_eq!(grid.place_food(&mut rng), None);
        assert_eq!(grid, before);
    }
}
