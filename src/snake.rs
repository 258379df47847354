use std::collections::{HashSet, VecDeque};

use crate::errors::InvariantViolation;
use crate::Coords;
use Heading::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Left,
    Up,
    Right,
    Down,
}

impl Heading {
    /// Input is latched in this order, so a later held key wins over an earlier one.
    pub const ALL: [Heading; 4] = [Left, Up, Right, Down];

    pub fn reverse(self) -> Heading {
        match self {
            Left => Right,
            Up => Down,
            Right => Left,
            Down => Up,
        }
    }

    /// The neighbouring cell in this direction, or `None` when it would fall
    /// below zero (or past `u16::MAX`). Upper grid bounds are the grid's business.
    pub fn step(self, (x, y): Coords) -> Option<Coords> {
        match self {
            Left => x.checked_sub(1).map(|x| (x, y)),
            Up => y.checked_sub(1).map(|y| (x, y)),
            Right => x.checked_add(1).map(|x| (x, y)),
            Down => y.checked_add(1).map(|y| (x, y)),
        }
    }

    /// The heading that leads from `from` to the adjacent cell `to`.
    pub fn between(from: Coords, to: Coords) -> Option<Heading> {
        Heading::ALL.iter().copied().find(|h| h.step(from) == Some(to))
    }
}

/// The snake's body, tail first. The back of the queue is the head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    heading: Heading,
}

impl Snake {
    /// Builds a snake from a tail-first path. Without an explicit heading the
    /// snake keeps going the way its last two segments point, or Right if it
    /// only has one.
    pub fn new(path: Vec<Coords>, heading: Option<Heading>) -> Result<Self, InvariantViolation> {
        if path.is_empty() {
            return Err(InvariantViolation::EmptyPath);
        }

        let mut seen = HashSet::with_capacity(path.len());
        for pos in &path {
            if !seen.insert(*pos) {
                return Err(InvariantViolation::Repeated(*pos));
            }
        }

        for pair in path.windows(2) {
            if Heading::between(pair[0], pair[1]).is_none() {
                return Err(InvariantViolation::Disjoint { from: pair[0], to: pair[1] });
            }
        }

        let heading = heading.unwrap_or_else(|| infer_heading(&path));
        Ok(Snake { body: path.into(), heading })
    }

    /// The snake every session starts with, heading Right.
    pub fn starting() -> Result<Self, InvariantViolation> {
        Snake::new(vec![(5, 5), (5, 4), (6, 4)], None)
    }

    pub fn head(&self) -> Coords {
        // Never empty: `new` rejects empty paths and `remove_tail` refuses to
        // take the last segment.
        self.body[self.body.len() - 1]
    }

    #[cfg(test)]
    pub fn tail(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn insert_head(&mut self, pos: Coords) {
        self.body.push_back(pos);
    }

    pub fn remove_tail(&mut self) -> Result<Coords, InvariantViolation> {
        if self.body.len() <= 1 {
            return Err(InvariantViolation::EmptySnake);
        }

        self.body.pop_front().ok_or(InvariantViolation::EmptySnake)
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = Coords> + '_ {
        self.body.iter().copied()
    }

    #[cfg(test)]
    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }
}

fn infer_heading(path: &[Coords]) -> Heading {
    match path {
        [.., neck, head] => Heading::between(*neck, *head).unwrap_or(Right),
        _ => Right,
    }
}
