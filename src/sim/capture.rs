//! Enclosure detection and territory capture
//!
//! Once per frame, after builds are promoted, every unbuilt cell is probed
//! with a flood fill over not-yet-built cells. A region is capturable only if
//! the fill never leaves the grid and never touches a ball footprint; on
//! success the whole region is marked filled. Filled cells convert to
//! permanent floor as soon as no wall is mid-growth, so a shrinking playfield
//! never races an in-flight wall.

use super::ball::Ball;
use super::grid::{Arena, Grid, Side};
use super::growth::WallSegment;

/// True if any ball's footprint covers grid coordinate `(col, row)`. The
/// footprint is a square window around the ball's grid-projected center,
/// sized by the cell/radius ratio.
fn ball_covers(balls: &[Ball], arena: &Arena, col: i64, row: i64) -> bool {
    balls.iter().any(|ball| {
        let grid_x = ((ball.pos.x + ball.radius / 2.0) - arena.x_offset) / arena.cell_dim;
        let grid_y = ((ball.pos.y + ball.radius / 2.0) - arena.y_offset) / arena.cell_dim;
        let grid_offset = arena.cell_dim / ball.radius;
        let (c, r) = (col as f32, row as f32);
        c <= grid_x + grid_offset
            && c >= grid_x - grid_offset
            && r <= grid_y + grid_offset
            && r >= grid_y - grid_offset
    })
}

/// Worklist flood fill from `seed` over unbuilt cells.
///
/// Fails (returns `None`) if the region reaches outside the grid or touches a
/// ball footprint - including footprints overlapping the region's built rim.
/// Succeeds with the visited region otherwise.
fn try_fill(
    grid: &Grid,
    balls: &[Ball],
    arena: &Arena,
    seed: (usize, usize),
) -> Option<Vec<(usize, usize)>> {
    let mut visited = vec![false; grid.total()];
    let mut region = Vec::new();
    let mut stack = vec![(seed.0 as i64, seed.1 as i64)];

    while let Some((col, row)) = stack.pop() {
        if !grid.in_bounds(col, row) {
            return None;
        }
        if ball_covers(balls, arena, col, row) {
            return None;
        }
        let (c, r) = (col as usize, row as usize);
        let idx = c * grid.rows() + r;
        if grid.at(c, r).built || visited[idx] {
            continue;
        }
        visited[idx] = true;
        region.push((c, r));
        stack.push((col - 1, row));
        stack.push((col + 1, row));
        stack.push((col, row - 1));
        stack.push((col, row + 1));
    }

    Some(region)
}

/// Re-evaluate enclosed regions and convert ripe ones to permanent floor.
///
/// The fill pass marks every capturable region `filled`; the promotion pass
/// then converts `filled && !complete` cells into wall segments, but only
/// while neither growth side is building.
pub fn recompute(
    grid: &mut Grid,
    balls: &[Ball],
    walls: &mut Vec<WallSegment>,
    growth_building: bool,
    arena: &Arena,
) {
    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            if grid.at(col, row).built || grid.at(col, row).filled {
                continue;
            }
            if let Some(region) = try_fill(grid, balls, arena, (col, row)) {
                for (c, r) in region {
                    grid.at_mut(c, r).filled = true;
                }
            }
        }
    }

    if growth_building {
        return;
    }
    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            let cell = grid.at_mut(col, row);
            if cell.filled && !cell.complete {
                walls.push(WallSegment {
                    rect: cell.rect,
                    side: Side::Black,
                });
                cell.active = true;
                cell.built = true;
                cell.complete = true;
            }
        }
    }
}
