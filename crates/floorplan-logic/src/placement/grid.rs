//! Grid placement: rooms snap to cells of a rows×cols grid over the house.

use super::{PlacementStrategy, PlanState};
use crate::constants::placement::MAX_GRID_SIDE;
use crate::geometry::{is_free, validate_layout, HouseBounds, Rect};
use crate::layout::{PlacedRoom, Strategy};
use crate::requirements::FloorPlanRequest;
use crate::rooms::GridHint;

/// A hint clamped onto a concrete grid. All cells `row..row + row_span`,
/// `col..col + col_span` lie inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub row: u32,
    pub col: u32,
    pub row_span: u32,
    pub col_span: u32,
}

/// Grid over the house bounds. Column and row edges are computed from the
/// bounds directly so the last edge lands exactly on the house wall.
///
/// Each side is clamped to `1..=MAX_GRID_SIDE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
    bounds: HouseBounds,
}

impl Grid {
    pub fn new(bounds: HouseBounds, rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.clamp(1, MAX_GRID_SIDE),
            cols: cols.clamp(1, MAX_GRID_SIDE),
            bounds,
        }
    }

    /// The request's grid, or the smallest square grid with a cell per room.
    pub fn for_request(request: &FloorPlanRequest) -> Self {
        match request.grid {
            Some(g) => Self::new(request.bounds, g.rows, g.cols),
            None => {
                let side = (request.rooms.len() as f64).sqrt().ceil() as u32;
                Self::new(request.bounds, side, side)
            }
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Clamp a hint so origin and span stay on the grid. Spans below one
    /// become one.
    pub fn clamp(&self, hint: &GridHint) -> CellSpan {
        let row = hint.row.clamp(0, self.rows as i64 - 1);
        let col = hint.col.clamp(0, self.cols as i64 - 1);
        let row_span = hint.row_span.clamp(1, self.rows as i64 - row);
        let col_span = hint.col_span.clamp(1, self.cols as i64 - col);
        CellSpan {
            row: row as u32,
            col: col as u32,
            row_span: row_span as u32,
            col_span: col_span as u32,
        }
    }

    fn x_edge(&self, col: u32) -> f64 {
        if col >= self.cols {
            self.bounds.width
        } else {
            self.bounds.width * col as f64 / self.cols as f64
        }
    }

    fn y_edge(&self, row: u32) -> f64 {
        if row >= self.rows {
            self.bounds.depth
        } else {
            self.bounds.depth * row as f64 / self.rows as f64
        }
    }

    /// Rectangle covered by a span, before any margin.
    pub fn span_rect(&self, span: &CellSpan) -> Rect {
        let x0 = self.x_edge(span.col);
        let x1 = self.x_edge(span.col + span.col_span);
        let y0 = self.y_edge(span.row);
        let y1 = self.y_edge(span.row + span.row_span);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    fn cell_index(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }
}

/// Occupancy over a grid, filled in request order.
#[derive(Debug, Clone)]
struct Occupancy {
    grid: Grid,
    taken: Vec<bool>,
}

impl Occupancy {
    fn new(grid: Grid) -> Self {
        Self {
            grid,
            taken: vec![false; grid.cell_count()],
        }
    }

    fn mark(&mut self, span: &CellSpan) {
        for r in span.row..span.row + span.row_span {
            for c in span.col..span.col + span.col_span {
                let idx = self.grid.cell_index(r, c);
                self.taken[idx] = true;
            }
        }
    }

    /// Next free single cell in row-major order.
    fn next_free(&mut self) -> Option<CellSpan> {
        let idx = self.taken.iter().position(|t| !t)?;
        let span = CellSpan {
            row: (idx / self.grid.cols as usize) as u32,
            col: (idx % self.grid.cols as usize) as u32,
            row_span: 1,
            col_span: 1,
        };
        self.mark(&span);
        Some(span)
    }
}

/// Places rooms by grid hint or by the next free cell.
///
/// In grid mode (no coordinates anywhere, or coordinates rejected) every
/// pending room takes part; otherwise only rooms with a hint do. Unhinted
/// rooms left without a cell stay pending. After placement the grid set is
/// re-checked and any room that collides with an earlier one is evicted.
#[derive(Debug, Default, Clone, Copy)]
pub struct GridPlacer;

impl GridPlacer {
    pub fn grid_mode(state: &PlanState<'_>) -> bool {
        state.explicit_rejected
            || state
                .request
                .rooms
                .iter()
                .all(|r| r.explicit_position.is_none())
    }
}

impl PlacementStrategy for GridPlacer {
    fn kind(&self) -> Strategy {
        Strategy::Grid
    }

    fn apply(&mut self, state: &mut PlanState<'_>) {
        let grid_mode = Self::grid_mode(state);
        let participants: Vec<usize> = state
            .pending()
            .into_iter()
            .filter(|&i| grid_mode || state.request.rooms[i].grid_hint.is_some())
            .collect();
        if participants.is_empty() {
            return;
        }

        let grid = Grid::for_request(state.request);
        let margin = state.config.grid_margin_ft;
        log::info!(
            "grid placement on {}x{} grid for {} rooms",
            grid.rows,
            grid.cols,
            participants.len()
        );

        // Hinted rooms claim their cells before unhinted rooms take free ones.
        let mut occupancy = Occupancy::new(grid);
        let hinted: Vec<Option<CellSpan>> = participants
            .iter()
            .map(|&i| state.request.rooms[i].grid_hint.map(|h| grid.clamp(&h)))
            .collect();
        for span in hinted.iter().flatten() {
            occupancy.mark(span);
        }

        let mut assigned: Vec<(usize, Rect)> = Vec::with_capacity(participants.len());
        for (&i, hint) in participants.iter().zip(hinted) {
            let span = match hint.or_else(|| occupancy.next_free()) {
                Some(span) => span,
                None => {
                    log::debug!("{}: no free grid cell", state.request.rooms[i].name);
                    continue;
                }
            };
            let rect = state.request.bounds.clip(&grid.span_rect(&span).inset(margin));
            assigned.push((i, rect));
        }

        let rooms: Vec<PlacedRoom> = assigned
            .iter()
            .map(|(i, rect)| PlacedRoom::from_requirement(&state.request.rooms[*i], *rect, Strategy::Grid))
            .collect();
        let violations = validate_layout(&state.request.bounds, &rooms);
        for v in &violations {
            log::warn!("grid placement conflict: {v}");
        }

        // Earlier rooms keep their cells; later colliders go to the next strategy.
        let mut kept = state.placed_rects();
        for (i, rect) in assigned {
            if is_free(&state.request.bounds, &rect, &kept) {
                kept.push(rect);
                state.place(i, rect, Strategy::Grid);
            } else {
                log::debug!("{} evicted from grid", state.request.rooms[i].name);
            }
        }
    }
}
