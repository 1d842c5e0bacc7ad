//! Brick grid and the pattern checks the brick goals are built on.
use serde::{Deserialize, Serialize};

use crate::constants::{GRID_CELLS, GRID_CENTER, GRID_SIDE, HEART_OFFSETS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("brick grid must have 144 cells, found {0}")]
pub struct GridShapeError(pub usize);

/// Fixed 12×12 board of optional brick colors, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<String>>", into = "Vec<Option<String>>")]
pub struct BrickGrid {
    cells: Vec<Option<String>>,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self {
            cells: vec![None; GRID_CELLS],
        }
    }
}

impl TryFrom<Vec<Option<String>>> for BrickGrid {
    type Error = GridShapeError;

    fn try_from(cells: Vec<Option<String>>) -> Result<Self, Self::Error> {
        if cells.len() == GRID_CELLS {
            Ok(Self { cells })
        } else {
            Err(GridShapeError(cells.len()))
        }
    }
}

impl From<BrickGrid> for Vec<Option<String>> {
    fn from(grid: BrickGrid) -> Self {
        grid.cells
    }
}

impl BrickGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn index(row: usize, col: usize) -> usize {
        row * GRID_SIDE + col
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        if row >= GRID_SIDE || col >= GRID_SIDE {
            return None;
        }
        self.get(Self::index(row, col))
    }

    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some()
    }

    /// Paint `index` with `color`. Returns `true` when the cell was empty.
    pub fn place(&mut self, index: usize, color: &str) -> bool {
        let Some(slot) = self.cells.get_mut(index) else {
            return false;
        };
        let was_empty = slot.is_none();
        *slot = Some(color.to_string());
        was_empty
    }

    /// Empty `index`. Returns `true` when a brick was removed.
    pub fn erase(&mut self, index: usize) -> bool {
        self.cells
            .get_mut(index)
            .and_then(Option::take)
            .is_some()
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Filled cells per column, counted anywhere in the column rather than
    /// as a contiguous stack.
    #[must_use]
    pub fn column_heights(&self) -> [u32; GRID_SIDE] {
        let mut heights = [0u32; GRID_SIDE];
        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.is_some() {
                heights[idx % GRID_SIDE] += 1;
            }
        }
        heights
    }

    #[must_use]
    pub fn tallest_column(&self) -> u32 {
        self.column_heights().into_iter().max().unwrap_or(0)
    }

    /// True when every heart offset around the center cell holds a brick.
    #[must_use]
    pub fn matches_heart(&self) -> bool {
        let (center_row, center_col) = GRID_CENTER;
        HEART_OFFSETS.iter().all(|&(d_row, d_col)| {
            match (
                center_row.checked_add_signed(d_row),
                center_col.checked_add_signed(d_col),
            ) {
                (Some(row), Some(col)) => self.is_filled(row, col),
                _ => false,
            }
        })
    }

    /// True when some row holds `min_run` or more consecutive bricks of any
    /// color.
    #[must_use]
    pub fn matches_horizontal_run(&self, min_run: usize) -> bool {
        self.cells.chunks(GRID_SIDE).any(|row| {
            let mut run = 0;
            row.iter().any(|cell| {
                run = if cell.is_some() { run + 1 } else { 0 };
                run >= min_run
            })
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn heart_grid() -> BrickGrid {
        let mut grid = BrickGrid::new();
        for (d_row, d_col) in HEART_OFFSETS {
            let row = GRID_CENTER.0.checked_add_signed(d_row).unwrap();
            let col = GRID_CENTER.1.checked_add_signed(d_col).unwrap();
            grid.place(BrickGrid::index(row, col), "#ff4fd8");
        }
        grid
    }

    #[test]
    fn tower_in_one_column_counts_scattered_rows() {
        let mut grid = BrickGrid::new();
        for row in [0, 1, 3, 4, 6, 8, 10, 11] {
            grid.place(BrickGrid::index(row, 3), "#60a5fa");
        }
        let heights = grid.column_heights();
        assert_eq!(heights[3], 8);
        assert_eq!(heights.iter().sum::<u32>(), 8);
        assert_eq!(grid.tallest_column(), 8);
    }

    #[test]
    fn empty_grid_has_no_patterns() {
        let grid = BrickGrid::new();
        assert_eq!(grid.tallest_column(), 0);
        assert!(!grid.matches_heart());
        assert!(!grid.matches_horizontal_run(5));
        assert!(grid.is_empty());
    }

    #[test]
    fn heart_requires_every_offset() {
        let grid = heart_grid();
        assert_eq!(grid.filled_count(), 9);
        assert!(grid.matches_heart());

        for (d_row, d_col) in HEART_OFFSETS {
            let mut broken = grid.clone();
            let row = GRID_CENTER.0.checked_add_signed(d_row).unwrap();
            let col = GRID_CENTER.1.checked_add_signed(d_col).unwrap();
            assert!(broken.erase(BrickGrid::index(row, col)));
            assert!(!broken.matches_heart(), "missing ({row},{col}) still matched");
        }
    }

    #[test]
    fn horizontal_run_resets_on_gaps() {
        let mut grid = BrickGrid::new();
        for col in 0..5 {
            grid.place(BrickGrid::index(2, col), "#fbbf24");
        }
        assert!(grid.matches_horizontal_run(5));

        let mut gapped = BrickGrid::new();
        for col in [0, 1, 2, 3, 5] {
            gapped.place(BrickGrid::index(2, col), "#fbbf24");
        }
        assert!(!gapped.matches_horizontal_run(5));
    }

    #[test]
    fn run_does_not_wrap_between_rows() {
        let mut grid = BrickGrid::new();
        for col in 9..12 {
            grid.place(BrickGrid::index(0, col), "#34d399");
        }
        for col in 0..2 {
            grid.place(BrickGrid::index(1, col), "#34d399");
        }
        assert!(!grid.matches_horizontal_run(5));
    }

    #[test]
    fn place_and_erase_report_transitions() {
        let mut grid = BrickGrid::new();
        assert!(grid.place(5, "#ffffff"));
        assert!(!grid.place(5, "#f97316"));
        assert_eq!(grid.get(5), Some("#f97316"));
        assert!(grid.erase(5));
        assert!(!grid.erase(5));
        assert!(!grid.place(GRID_CELLS, "#ffffff"));
    }

    #[test]
    fn rejects_wrong_sized_blob() {
        let short = serde_json::json!([null, "#fff"]);
        let err = serde_json::from_value::<BrickGrid>(short).unwrap_err();
        assert!(err.to_string().contains("144"));

        let grid = heart_grid();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(GRID_CELLS));
    }
}
