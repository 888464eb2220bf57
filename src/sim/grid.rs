//! The playfield grid
//!
//! A fixed matrix of cells covering the arena interior. Cells are allocated
//! once per match and mutated in place; a level reset clears their flags but
//! never reallocates. Iteration order is column-major throughout so capture
//! conversion sweeps the field left to right.

use crate::consts::*;

use super::rect::Rect;
use super::timer::Timer;

/// Arena geometry derived from the configured window resolution. All layout
/// constants are expressed at 800x600 and scaled uniformly; the 4:3 aspect
/// constraint on `-res` makes the scale unambiguous.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub cell_dim: f32,
    pub ball_radius: f32,
}

impl Arena {
    pub fn new(width: u32, height: u32) -> Self {
        let scale = width as f32 / BASE_WIDTH;
        Self {
            width: width as f32,
            height: height as f32,
            x_offset: GRID_X_OFFSET * scale,
            y_offset: GRID_Y_OFFSET * scale,
            cell_dim: GRID_DIM * scale,
            ball_radius: BALL_RADIUS * scale,
        }
    }

    /// Playfield bounds (the region balls and walls live in)
    #[inline]
    pub fn left(&self) -> f32 {
        self.x_offset
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.width - self.x_offset
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y_offset
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.height - self.y_offset
    }

    pub fn cols(&self) -> usize {
        ((self.right() - self.left()) / self.cell_dim) as usize
    }

    pub fn rows(&self) -> usize {
        ((self.bottom() - self.top()) / self.cell_dim) as usize
    }

    /// Pixel rectangle of a cell
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            self.left() + col as f32 * self.cell_dim,
            self.top() + row as f32 * self.cell_dim,
            self.cell_dim,
            self.cell_dim,
        )
    }

    /// Map a pixel position to grid coordinates, if inside the playfield
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if x < self.left() || x >= self.right() || y < self.top() || y >= self.bottom() {
            return None;
        }
        let col = ((x - self.left()) / self.cell_dim) as usize;
        let row = ((y - self.top()) / self.cell_dim) as usize;
        if col < self.cols() && row < self.rows() {
            Some((col, row))
        } else {
            None
        }
    }
}

/// The two colour halves of a growth event. Forward cells (seed included)
/// build Black, backward cells build White; capture conversion always
/// produces Black floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Black,
    #[default]
    White,
}

/// One grid square; unit of wall growth and capture
#[derive(Debug, Clone)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    pub rect: Rect,
    pub side: Side,
    pub active: bool,
    pub built: bool,
    pub filled: bool,
    pub complete: bool,
    /// Build stagger timer, started when the cell joins a growth walk
    pub delay: Timer,
    /// Hops from the seed cell of the growth walk that claimed this cell
    pub distance: u32,
}

impl Cell {
    fn new(col: usize, row: usize, rect: Rect) -> Self {
        Self {
            col,
            row,
            rect,
            side: Side::White,
            active: false,
            built: false,
            filled: false,
            complete: false,
            delay: Timer::default(),
            distance: 0,
        }
    }

    pub fn reset(&mut self) {
        self.side = Side::White;
        self.active = false;
        self.built = false;
        self.filled = false;
        self.complete = false;
        self.delay = Timer::default();
        self.distance = 0;
    }
}

/// Column-major cell matrix
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(arena: &Arena) -> Self {
        let (cols, rows) = (arena.cols(), arena.rows());
        let mut cells = Vec::with_capacity(cols * rows);
        for col in 0..cols {
            for row in 0..rows {
                cells.push(Cell::new(col, row, arena.cell_rect(col, row)));
            }
        }
        Self { cols, rows, cells }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.cols * self.rows
    }

    pub fn in_bounds(&self, col: i64, row: i64) -> bool {
        col >= 0 && (col as usize) < self.cols && row >= 0 && (row as usize) < self.rows
    }

    pub fn at(&self, col: usize, row: usize) -> &Cell {
        &self.cells[col * self.rows + row]
    }

    pub fn at_mut(&mut self, col: usize, row: usize) -> &mut Cell {
        &mut self.cells[col * self.rows + row]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    pub fn built_count(&self) -> usize {
        self.cells.iter().filter(|c| c.built).count()
    }

    /// Captured share of the field, recomputed from cell state every call
    pub fn built_percentage(&self) -> f32 {
        self.built_count() as f32 / self.total() as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_resolution_dimensions() {
        let arena = Arena::new(800, 600);
        assert_eq!(arena.cols(), 28);
        assert_eq!(arena.rows(), 16);
        let grid = Grid::new(&arena);
        assert_eq!(grid.total(), 448);
    }

    #[test]
    fn test_scaled_resolution_keeps_dimensions() {
        let arena = Arena::new(1600, 1200);
        assert_eq!(arena.cols(), 28);
        assert_eq!(arena.rows(), 16);
        assert_eq!(arena.cell_dim, 50.0);
        assert_eq!(arena.ball_radius, 40.0);
    }

    #[test]
    fn test_cell_rect_matches_cell_at() {
        let arena = Arena::new(800, 600);
        let rect = arena.cell_rect(3, 7);
        assert_eq!(rect, Rect::new(125.0, 275.0, 25.0, 25.0));
        assert_eq!(arena.cell_at(rect.x + 1.0, rect.y + 1.0), Some((3, 7)));
    }

    #[test]
    fn test_cell_at_outside_playfield() {
        let arena = Arena::new(800, 600);
        assert_eq!(arena.cell_at(10.0, 300.0), None);
        assert_eq!(arena.cell_at(400.0, 50.0), None);
        assert_eq!(arena.cell_at(799.0, 599.0), None);
    }

    #[test]
    fn test_reset_clears_flags() {
        let arena = Arena::new(800, 600);
        let mut grid = Grid::new(&arena);
        {
            let cell = grid.at_mut(4, 4);
            cell.built = true;
            cell.filled = true;
            cell.side = Side::Black;
            cell.distance = 7;
        }
        grid.reset_all();
        let cell = grid.at(4, 4);
        assert!(!cell.built && !cell.filled);
        assert_eq!(cell.side, Side::White);
        assert_eq!(cell.distance, 0);
    }

    proptest! {
        // Built and unbuilt cells always partition the field.
        #[test]
        fn prop_built_plus_unbuilt_is_total(pattern in proptest::collection::vec(any::<bool>(), 448)) {
            let arena = Arena::new(800, 600);
            let mut grid = Grid::new(&arena);
            for (cell, built) in grid.cells_mut().zip(pattern.iter()) {
                cell.built = *built;
            }
            let built = grid.built_count();
            let unbuilt = grid.cells().filter(|c| !c.built).count();
            prop_assert_eq!(built + unbuilt, grid.total());
            let pct = grid.built_percentage();
            prop_assert!((0.0..=100.0).contains(&pct));
        }
    }
}
