use crossterm::style::Color;

use crate::game::{GameState, Status};
use crate::grid::Grid;
use crate::Coords;

pub const HEAD_COLOR: Color = Color::Rgb { r: 0x00, g: 0xff, b: 0x00 };
pub const BODY_COLOR: Color = Color::Rgb { r: 0x00, g: 0x80, b: 0x00 };
pub const FOOD_COLOR: Color = Color::Rgb { r: 0xff, g: 0x00, b: 0x00 };
pub const MESSAGE_COLOR: Color = Color::Red;

const BLOCK_CHAR: char = '█';
const STATUS_ROW: u16 = 0;
const BORDER_TOP: u16 = 1;
// Rows taken by the status line and both horizontal borders.
const RESERVED_ROWS: u16 = 3;

const PAUSE_MESSAGE: [&str; 2] = ["Paused", "Press ENTER to resume"];
const GAME_OVER_MESSAGE: [&str; 2] = ["Game Over", "Press ENTER to start a new game"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Color,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };

    pub fn new(ch: char, color: Color) -> Self {
        Glyph { ch, color }
    }
}

/// Where the board sits on the terminal, and how big it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    term_width: u16,
    term_height: u16,
    cell_width: u16,
    grid: Grid,
}

impl Layout {
    pub fn fit(term_width: u16, term_height: u16, cell_width: u16) -> Self {
        let grid = Grid::fit(
            term_width.saturating_sub(2),
            term_height.saturating_sub(RESERVED_ROWS),
            cell_width,
            1,
        );
        Layout { term_width, term_height, cell_width, grid }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn term_size(&self) -> (u16, u16) {
        (self.term_width, self.term_height)
    }

    /// Terminal position of the top-left column of a cell.
    fn cell_origin(&self, pos: Coords) -> Option<(u16, u16)> {
        if !self.grid.contains(pos) {
            return None;
        }
        let x = 1 + pos.0 as u16 * self.cell_width;
        let y = BORDER_TOP + 1 + pos.1 as u16;
        Some((x, y))
    }

    fn board_width(&self) -> u16 {
        self.grid.width() as u16 * self.cell_width
    }

    fn board_height(&self) -> u16 {
        self.grid.height() as u16
    }
}

/// An off-screen copy of the terminal. Writes outside of it are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Frame { width, height, glyphs: vec![Glyph::BLANK; width as usize * height as usize] }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x, y).map(|i| self.glyphs[i])
    }

    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color) {
        for dy in 0..h {
            for dx in 0..w {
                self.put(x.saturating_add(dx), y.saturating_add(dy), Glyph::new(BLOCK_CHAR, color));
            }
        }
    }

    /// Writes `text` starting at column `x` and returns the column after it.
    pub fn print(&mut self, x: u16, y: u16, text: &str, color: Color) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            self.put(col, y, Glyph::new(ch, color));
            col = col.saturating_add(1);
        }
        col
    }

    pub fn print_centered(&mut self, center_x: u16, y: u16, text: &str, color: Color) {
        let half = (text.chars().count() / 2) as u16;
        self.print(center_x.saturating_sub(half), y, text, color);
    }

    #[cfg(test)]
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width).filter_map(|x| self.glyph(x, y)).map(|g| g.ch).collect()
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.width as usize * y as usize + x as usize)
        } else {
            None
        }
    }
}

pub fn draw(game: &GameState, layout: &Layout) -> Frame {
    let (w, h) = layout.term_size();
    let mut frame = Frame::new(w, h);

    draw_status(&mut frame, game);
    draw_borders(&mut frame, layout);

    for (i, pos) in game.snake().segments().enumerate() {
        let color = if i == 0 { HEAD_COLOR } else { BODY_COLOR };
        draw_cell(&mut frame, layout, *pos, color);
    }
    draw_cell(&mut frame, layout, game.food(), FOOD_COLOR);

    match game.status() {
        Status::Paused => draw_message(&mut frame, layout, PAUSE_MESSAGE),
        Status::GameOver => draw_message(&mut frame, layout, GAME_OVER_MESSAGE),
        Status::Running => {}
    }

    frame
}

fn draw_cell(frame: &mut Frame, layout: &Layout, pos: Coords, color: Color) {
    if let Some((x, y)) = layout.cell_origin(pos) {
        frame.fill_rect(x, y, layout.cell_width, 1, color);
    }
}

fn draw_status(frame: &mut Frame, game: &GameState) {
    let x = frame.print(0, STATUS_ROW, "Score: ", Color::Reset);
    let x = frame.print(x, STATUS_ROW, &game.score().to_string(), HEAD_COLOR);
    let x = frame.print(x, STATUS_ROW, " | Best: ", Color::Reset);
    frame.print(x, STATUS_ROW, &game.high_score().to_string(), FOOD_COLOR);
}

fn draw_borders(frame: &mut Frame, layout: &Layout) {
    let end_x = layout.board_width() + 1;
    let end_y = BORDER_TOP + layout.board_height() + 1;

    for x in 0..=end_x {
        let ch = if x == 0 || x == end_x { '+' } else { '-' };
        frame.put(x, BORDER_TOP, Glyph::new(ch, Color::Reset));
        frame.put(x, end_y, Glyph::new(ch, Color::Reset));
    }

    for y in BORDER_TOP + 1..end_y {
        frame.put(0, y, Glyph::new('|', Color::Reset));
        frame.put(end_x, y, Glyph::new('|', Color::Reset));
    }
}

fn draw_message(frame: &mut Frame, layout: &Layout, lines: [&str; 2]) {
    let center_x = 1 + layout.board_width() / 2;
    let center_y = BORDER_TOP + 1 + layout.board_height() / 2;

    frame.print_centered(center_x, center_y.saturating_sub(1), lines[0], MESSAGE_COLOR);
    frame.print_centered(center_x, center_y + 1, lines[1], MESSAGE_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::FoodPlacement;
    use crate::snake::Direction;
    use rand::{rngs::StdRng, SeedableRng};

    // 20x10 cells of two columns, plus borders and the status line.
    fn layout() -> Layout {
        Layout::fit(42, 13, 2)
    }

    fn game(layout: &Layout) -> GameState {
        let mut game = GameState::new(layout.grid(), 500, FoodPlacement::Anywhere, StdRng::seed_from_u64(9));
        game.set_board_for_test(vec![(3, 2), (2, 2)], Some(Direction::Right), (7, 4));
        game
    }

    #[test]
    fn layout_fits_whole_cells() {
        let layout = Layout::fit(43, 13, 2);
        assert_eq!(layout.grid(), Grid::new(20, 10));
        assert_eq!(layout.term_size(), (43, 13));
    }

    #[test]
    fn draws_snake_and_food_blocks() {
        let layout = layout();
        let frame = draw(&game(&layout), &layout);

        // Cell (3, 2) covers columns 7..9 on row 4.
        assert_eq!(frame.glyph(7, 4), Some(Glyph::new(BLOCK_CHAR, HEAD_COLOR)));
        assert_eq!(frame.glyph(8, 4), Some(Glyph::new(BLOCK_CHAR, HEAD_COLOR)));
        assert_eq!(frame.glyph(5, 4), Some(Glyph::new(BLOCK_CHAR, BODY_COLOR)));
        assert_eq!(frame.glyph(6, 4), Some(Glyph::new(BLOCK_CHAR, BODY_COLOR)));
        assert_eq!(frame.glyph(9, 4), Some(Glyph::BLANK));
        assert_eq!(frame.glyph(15, 6), Some(Glyph::new(BLOCK_CHAR, FOOD_COLOR)));
    }

    #[test]
    fn status_line_and_borders() {
        let layout = layout();
        let frame = draw(&game(&layout), &layout);

        assert!(frame.row_text(0).starts_with("Score: 0 | Best: 500"));
        assert_eq!(frame.row_text(1), format!("+{}+", "-".repeat(40)));
        assert_eq!(frame.row_text(12), format!("+{}+", "-".repeat(40)));
        assert_eq!(frame.glyph(0, 5).map(|g| g.ch), Some('|'));
        assert_eq!(frame.glyph(41, 5).map(|g| g.ch), Some('|'));
    }

    #[test]
    fn running_game_has_no_message() {
        let layout = layout();
        let frame = draw(&game(&layout), &layout);
        for y in 2..12 {
            assert!(!frame.row_text(y).contains("ENTER"));
        }
    }

    #[test]
    fn pause_and_game_over_messages() {
        let layout = layout();
        let mut game = game(&layout);

        game.enter();
        let frame = draw(&game, &layout);
        assert!(frame.row_text(6).contains("Paused"));
        assert!(frame.row_text(8).contains("Press ENTER to resume"));

        game.enter();
        game.set_board_for_test(vec![(0, 0)], Some(Direction::Up), (7, 4));
        game.tick();
        let frame = draw(&game, &layout);
        assert!(frame.row_text(6).contains("Game Over"));
        assert!(frame.row_text(8).contains("Press ENTER to start a new game"));
        let title_x = (0..frame.width()).find(|x| frame.glyph(*x, 6).map(|g| g.ch) == Some('G')).unwrap();
        assert_eq!(frame.glyph(title_x, 6).map(|g| g.color), Some(MESSAGE_COLOR));
    }

    #[test]
    fn cells_outside_the_grid_are_not_drawn() {
        let layout = Layout::fit(12, 6, 2);
        let mut game = GameState::new(layout.grid(), 0, FoodPlacement::Anywhere, StdRng::seed_from_u64(2));
        game.set_board_for_test(vec![(9, 9)], None, (0, 0));

        let frame = draw(&game, &layout);
        assert_eq!(frame.width(), 12);
        assert_eq!(frame.height(), 6);
        let blocks = (0..6)
            .flat_map(|y| frame.row_text(y).chars().collect::<Vec<_>>())
            .filter(|ch| *ch == BLOCK_CHAR)
            .count();
        // Only the food, two columns wide.
        assert_eq!(blocks, 2);
    }

    #[test]
    fn writes_off_the_frame_are_dropped() {
        let mut frame = Frame::new(3, 2);
        frame.fill_rect(2, 1, 4, 4, HEAD_COLOR);
        assert_eq!(frame.glyph(2, 1), Some(Glyph::new(BLOCK_CHAR, HEAD_COLOR)));
        assert_eq!(frame.glyph(3, 1), None);
        assert_eq!(frame.row_text(0), "   ");
    }
}
