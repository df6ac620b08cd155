use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Left => Right,
            Up => Down,
            Right => Left,
            Down => Up,
        }
    }

    pub fn step(self, pos: Coords) -> Coords {
        match self {
            Left => (pos.0 - 1, pos.1),
            Up => (pos.0, pos.1 - 1),
            Right => (pos.0 + 1, pos.1),
            Down => (pos.0, pos.1 + 1),
        }
    }
}

/// Occupied cells, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    pub fn new(pos: Coords) -> Self {
        Snake { body: VecDeque::from(vec![pos]) }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Coords> {
        self.body.iter()
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Whether moving the head into `pos` runs into the body. When the tail
    /// is about to move away its cell counts as free.
    pub fn bites(&self, pos: Coords, tail_moves: bool) -> bool {
        let keep = if tail_moves { self.body.len() - 1 } else { self.body.len() };
        self.body.iter().take(keep).any(|seg| *seg == pos)
    }

    /// Pushes a new head. Unless growing, the tail is dropped and returned.
    pub fn advance(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
impl From<Vec<Coords>> for Snake {
    fn from(body: Vec<Coords>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body: body.into() }
    }
}
