//! Wall growth and the build schedule
//!
//! A growth event starts from a clicked seed cell and walks the grid in the
//! two directions orthogonal to the chosen orientation, claiming cells until
//! it reaches the grid edge or an existing wall. Claimed cells build into
//! permanent segments over time, staggered by their distance from the seed,
//! which produces the zipper-like build animation. While any of a side's
//! cells are pending or freshly built, that side is vulnerable: a ball
//! touching it costs a life and cancels the side.

use crate::consts::*;

use super::grid::{Grid, Side};
use super::rect::Rect;

/// Axis a new wall grows along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// A permanent wall piece; its rect always matches exactly one cell's rect
#[derive(Debug, Clone, Copy)]
pub struct WallSegment {
    pub rect: Rect,
    pub side: Side,
}

/// One colour half of a growth event: cells waiting to build, plus the
/// freshly built cells that still count as vulnerable
#[derive(Debug, Clone, Default)]
pub struct SideLane {
    pub pending: Vec<(usize, usize)>,
    pub buffer: Vec<(usize, usize)>,
    pub building: bool,
}

impl SideLane {
    /// Cancel this side (ball hit): drop unbuilt cells, forget fresh ones.
    /// Segments already promoted stay in the wall list.
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.buffer.clear();
        self.building = false;
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.pending.is_empty() || !self.buffer.is_empty()
    }
}

/// A single in-flight growth event. At most one exists at a time, carried as
/// `Option<GrowthEvent>` on the match state.
#[derive(Debug, Clone, Default)]
pub struct GrowthEvent {
    pub black: SideLane,
    pub white: SideLane,
}

impl GrowthEvent {
    pub fn lane(&self, side: Side) -> &SideLane {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }

    pub fn lane_mut(&mut self, side: Side) -> &mut SideLane {
        match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }

    /// Both queues drained; the event can be retired
    pub fn finished(&self) -> bool {
        self.black.pending.is_empty() && self.white.pending.is_empty()
    }

    pub fn any_building(&self) -> bool {
        self.black.building || self.white.building
    }

    /// Rects of a side's fresh (life-costing) wall cells
    pub fn buffer_rects(&self, side: Side, grid: &Grid) -> Vec<Rect> {
        self.lane(side)
            .buffer
            .iter()
            .map(|&(c, r)| grid.at(c, r).rect)
            .collect()
    }

    /// Freeze/resume the build stagger timers of every pending cell
    pub fn pause_delays(&self, grid: &mut Grid, now: u64) {
        for &(c, r) in self.black.pending.iter().chain(self.white.pending.iter()) {
            grid.at_mut(c, r).delay.pause(now);
        }
    }

    pub fn resume_delays(&self, grid: &mut Grid, now: u64) {
        for &(c, r) in self.black.pending.iter().chain(self.white.pending.iter()) {
            grid.at_mut(c, r).delay.unpause(now);
        }
    }
}

fn collides_with_walls(rect: Rect, walls: &[WallSegment]) -> bool {
    walls.iter().any(|w| w.rect.intersects(&rect))
}

/// Start a growth event from `seed`.
///
/// Walks outward in both directions orthogonal to `orientation`: forward
/// cells (and the seed) claim Black, backward cells White. Each claimed cell
/// records its hop distance and starts its stagger timer. The walk stops at
/// the grid edge or at the first cell overlapping a permanent wall.
///
/// Returns `None` without touching the grid when the seed itself is built or
/// collides - a silent no-op, not an error. The caller enforces the
/// one-event-at-a-time precondition by only calling this with no event live.
pub fn start_growth(
    grid: &mut Grid,
    walls: &[WallSegment],
    seed: (usize, usize),
    orientation: Orientation,
    now: u64,
) -> Option<GrowthEvent> {
    let (seed_col, seed_row) = seed;
    {
        let cell = grid.at(seed_col, seed_row);
        if cell.built || collides_with_walls(cell.rect, walls) {
            return None;
        }
    }

    let cell = grid.at_mut(seed_col, seed_row);
    cell.active = true;
    cell.side = Side::Black;
    cell.distance = 0;
    cell.delay.start(now);

    let (dc, dr) = match orientation {
        Orientation::Vertical => (0i64, 1i64),
        Orientation::Horizontal => (1i64, 0i64),
    };

    let mut event = GrowthEvent::default();
    for (dir, side) in [(1i64, Side::Black), (-1i64, Side::White)] {
        let mut run = Vec::new();
        let (mut col, mut row) = (seed_col as i64, seed_row as i64);
        let mut distance = 0u32;
        loop {
            col += dc * dir;
            row += dr * dir;
            distance += 1;
            if !grid.in_bounds(col, row) {
                break;
            }
            let cell = grid.at_mut(col as usize, row as usize);
            if collides_with_walls(cell.rect, walls) {
                break;
            }
            cell.active = true;
            cell.side = side;
            cell.distance = distance;
            cell.delay.start(now);
            run.push((col as usize, row as usize));
        }
        // Farthest cells queue first; readiness is distance-timed either way
        event.lane_mut(side).pending.extend(run.into_iter().rev());
    }
    event.black.pending.push(seed);

    Some(event)
}

/// Promote every pending cell whose stagger delay has elapsed.
///
/// A cell is ready once its timer exceeds `distance * BUILD_SPEED *
/// BUILD_SPEED_MODIFIER` milliseconds. Promotion marks the grid cell built,
/// moves the cell into the side's buffer and materializes a permanent
/// segment. A side whose queue empties retires its buffer: the segments stay,
/// but they stop being life-costing.
pub fn build_step(event: &mut GrowthEvent, grid: &mut Grid, walls: &mut Vec<WallSegment>, now: u64) {
    for side in [Side::Black, Side::White] {
        let lane = event.lane_mut(side);
        let mut kept = Vec::with_capacity(lane.pending.len());
        for &(col, row) in &lane.pending {
            let cell = grid.at_mut(col, row);
            let ready =
                cell.delay.ticks(now) as f32 > BUILD_SPEED * BUILD_SPEED_MODIFIER * cell.distance as f32;
            if ready {
                cell.built = true;
                lane.buffer.push((col, row));
                walls.push(WallSegment {
                    rect: cell.rect,
                    side,
                });
                lane.building = true;
            } else {
                kept.push((col, row));
            }
        }
        lane.pending = kept;
        if lane.pending.is_empty() {
            lane.building = false;
            lane.buffer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Arena;
    use proptest::prelude::*;

    fn fresh_grid() -> Grid {
        Grid::new(&Arena::new(800, 600))
    }

    #[test]
    fn test_vertical_growth_spans_column() {
        let mut grid = fresh_grid();
        let event = start_growth(&mut grid, &[], (13, 8), Orientation::Vertical, 0).unwrap();
        // Forward walk reaches the bottom edge, backward walk the top edge;
        // every cell of the column is claimed exactly once.
        assert_eq!(event.black.pending.len(), grid.rows() - 8);
        assert_eq!(event.white.pending.len(), 8);
        let total = event.black.pending.len() + event.white.pending.len();
        assert_eq!(total, grid.rows());
        // Seed is Black with distance 0 and queued last on its side.
        assert_eq!(*event.black.pending.last().unwrap(), (13, 8));
        assert_eq!(grid.at(13, 8).distance, 0);
        assert_eq!(grid.at(13, 8).side, Side::Black);
    }

    #[test]
    fn test_sides_are_disjoint_with_hop_distances() {
        let mut grid = fresh_grid();
        let event = start_growth(&mut grid, &[], (5, 10), Orientation::Horizontal, 0).unwrap();
        for &(c, r) in &event.black.pending {
            assert!(!event.white.pending.contains(&(c, r)));
            assert_eq!(grid.at(c, r).side, Side::Black);
        }
        for &(c, r) in &event.white.pending {
            assert_eq!(grid.at(c, r).side, Side::White);
        }
        // Hop distance grows away from the seed on both sides.
        assert_eq!(grid.at(6, 10).distance, 1);
        assert_eq!(grid.at(7, 10).distance, 2);
        assert_eq!(grid.at(4, 10).distance, 1);
        assert_eq!(grid.at(3, 10).distance, 2);
    }

    #[test]
    fn test_walk_stops_at_existing_wall() {
        let mut grid = fresh_grid();
        let blocker = WallSegment {
            rect: grid.at(13, 12).rect,
            side: Side::Black,
        };
        let event =
            start_growth(&mut grid, &[blocker], (13, 8), Orientation::Vertical, 0).unwrap();
        // Forward walk claims rows 9..=11 only.
        assert_eq!(event.black.pending.len(), 3 + 1);
        assert!(!grid.at(13, 12).active);
        assert!(!grid.at(13, 13).active);
    }

    #[test]
    fn test_colliding_seed_is_a_noop() {
        let mut grid = fresh_grid();
        let blocker = WallSegment {
            rect: grid.at(13, 8).rect,
            side: Side::Black,
        };
        assert!(start_growth(&mut grid, &[blocker], (13, 8), Orientation::Vertical, 0).is_none());
        assert!(!grid.at(13, 8).active);
    }

    #[test]
    fn test_build_step_promotes_by_distance() {
        let mut grid = fresh_grid();
        let mut event = start_growth(&mut grid, &[], (13, 8), Orientation::Vertical, 0).unwrap();
        let mut walls = Vec::new();

        // Only the seed (distance 0) is ready just after the click.
        build_step(&mut event, &mut grid, &mut walls, 1);
        assert_eq!(walls.len(), 1);
        assert!(grid.at(13, 8).built);
        assert!(event.black.building);
        assert_eq!(event.black.buffer.len(), 1);

        // 200ms per hop: distance-1 cells on both sides become ready.
        build_step(&mut event, &mut grid, &mut walls, 201);
        assert_eq!(walls.len(), 3);
        assert!(grid.at(13, 9).built);
        assert!(grid.at(13, 7).built);

        // Run to completion: every column cell built, buffers retired.
        build_step(&mut event, &mut grid, &mut walls, 10_000);
        assert!(event.finished());
        assert!(!event.any_building());
        assert!(event.black.buffer.is_empty() && event.white.buffer.is_empty());
        assert_eq!(walls.len(), grid.rows());
    }

    #[test]
    fn test_cancelled_side_keeps_built_segments() {
        let mut grid = fresh_grid();
        let mut event =
            start_growth(&mut grid, &[], (13, 8), Orientation::Vertical, 0).unwrap();
        let mut walls = Vec::new();
        build_step(&mut event, &mut grid, &mut walls, 201);
        let built = walls.len();
        assert!(built > 0);

        event.black.cancel();
        assert!(!event.black.is_vulnerable());
        assert_eq!(walls.len(), built);
        assert!(grid.at(13, 8).built);
    }

    proptest! {
        #[test]
        fn prop_growth_claims_full_cross_section(
            col in 0usize..28, row in 0usize..16, vertical in any::<bool>()
        ) {
            let mut grid = fresh_grid();
            let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
            let event = start_growth(&mut grid, &[], (col, row), orientation, 0).unwrap();
            let span = if vertical { grid.rows() } else { grid.cols() };
            prop_assert_eq!(event.black.pending.len() + event.white.pending.len(), span);
            for cell in event.black.pending.iter() {
                prop_assert!(!event.white.pending.contains(cell));
            }
        }
    }
}
