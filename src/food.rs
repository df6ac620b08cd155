use clap::ValueEnum;
use rand::{seq::SliceRandom, Rng};

use crate::grid::Grid;
use crate::snake::Snake;
use crate::Coords;

/// Where new food is allowed to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FoodPlacement {
    /// Any cell of the grid, including cells under the snake.
    Anywhere,
    /// Only cells the snake does not occupy.
    FreeCell,
}

pub fn place_food<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake, placement: FoodPlacement) -> Coords {
    match placement {
        FoodPlacement::Anywhere => grid.random_cell(rng),
        FoodPlacement::FreeCell => {
            let choices: Vec<Coords> = grid.cells().filter(|pos| !snake.occupies(*pos)).collect();
            // A full board has nowhere left; the food goes under the snake.
            match choices.choose(rng) {
                Some(pos) => *pos,
                None => grid.random_cell(rng),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn free_cell_never_lands_on_the_snake() {
        let grid = Grid::new(3, 1);
        let snake = Snake::from(vec![(0, 0), (1, 0)]);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            assert_eq!(place_food(&mut rng, grid, &snake, FoodPlacement::FreeCell), (2, 0));
        }
    }

    #[test]
    fn full_board_falls_back_to_any_cell() {
        let grid = Grid::new(2, 1);
        let snake = Snake::from(vec![(0, 0), (1, 0)]);
        let mut rng = StdRng::seed_from_u64(5);

        let food = place_food(&mut rng, grid, &snake, FoodPlacement::FreeCell);
        assert!(grid.contains(food));
    }

    #[test]
    fn anywhere_covers_the_whole_grid() {
        let grid = Grid::new(2, 2);
        let snake = Snake::new((0, 0));
        let mut rng = StdRng::seed_from_u64(1);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(place_food(&mut rng, grid, &snake, FoodPlacement::Anywhere));
        }
        assert_eq!(seen.len(), 4);
    }
}
