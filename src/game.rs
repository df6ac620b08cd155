use rand::rngs::StdRng;
use tracing::debug;

use crate::config::{POINTS_PER_FOOD, START_CELL};
use crate::food::{place_food, FoodPlacement};
use crate::grid::Grid;
use crate::snake::{Direction, Snake};
use crate::Coords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused, over, or still waiting for the first direction.
    Idle,
    Moved,
    Ate,
    Crashed,
}

/// What an Enter press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Paused,
    Resumed,
    Restarted,
}

pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Coords,
    heading: Option<Direction>,
    queued: Option<Direction>,
    score: u32,
    high_score: u32,
    status: Status,
    placement: FoodPlacement,
    rng: StdRng,
}

impl GameState {
    pub fn new(grid: Grid, high_score: u32, placement: FoodPlacement, rng: StdRng) -> Self {
        let mut game = GameState {
            grid,
            snake: Snake::new(START_CELL),
            food: START_CELL,
            heading: None,
            queued: None,
            score: 0,
            high_score,
            status: Status::Running,
            placement,
            rng,
        };
        game.food = game.spawn_food();
        game
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    /// The direction the next tick will move in.
    pub fn direction(&self) -> Option<Direction> {
        self.queued.or(self.heading)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != Status::Running {
            return TickOutcome::Idle;
        }

        if let Some(dir) = self.queued.take() {
            self.heading = Some(dir);
        }
        let Some(heading) = self.heading else {
            return TickOutcome::Idle;
        };

        let new_head = heading.step(self.snake.head());
        let ate = new_head == self.food;

        if ate {
            self.score += POINTS_PER_FOOD;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
        }

        if !self.grid.contains(new_head) || self.snake.bites(new_head, !ate) {
            debug!(?new_head, score = self.score, "snake crashed");
            self.status = Status::GameOver;
            if ate {
                self.food = self.spawn_food();
            }
            return TickOutcome::Crashed;
        }

        self.snake.advance(new_head, ate);

        if ate {
            self.food = self.spawn_food();
            debug!(score = self.score, food = ?self.food, "food eaten");
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Queues a direction for the next tick. Reversing onto the body is
    /// refused, as is steering a finished game. A turn may neither undo the
    /// last move nor the turn already queued.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if self.status == Status::GameOver {
            return false;
        }
        let reverses = |current: Option<Direction>| current.map(Direction::opposite) == Some(dir);
        if reverses(self.heading) || reverses(self.queued) {
            return false;
        }

        self.queued = Some(dir);
        true
    }

    pub fn enter(&mut self) -> Transition {
        match self.status {
            Status::GameOver => {
                self.reset();
                Transition::Restarted
            }
            Status::Running => {
                self.status = Status::Paused;
                Transition::Paused
            }
            Status::Paused => {
                self.status = Status::Running;
                Transition::Resumed
            }
        }
    }

    /// Starts a new game. The high score is kept.
    pub fn reset(&mut self) {
        self.snake = Snake::new(START_CELL);
        self.score = 0;
        self.heading = None;
        self.queued = None;
        self.status = Status::Running;
        self.food = self.spawn_food();
    }

    /// Changes the playable area. Snake and score are left alone, only the
    /// food moves.
    pub fn resize(&mut self, grid: Grid) {
        self.grid = grid;
        self.food = self.spawn_food();
    }

    fn spawn_food(&mut self) -> Coords {
        place_food(&mut self.rng, self.grid, &self.snake, self.placement)
    }

    #[cfg(test)]
    pub(crate) fn set_board_for_test(&mut self, body: Vec<Coords>, heading: Option<Direction>, food: Coords) {
        self.snake = Snake::from(body);
        self.heading = heading;
        self.queued = None;
        self.food = food;
    }
}
