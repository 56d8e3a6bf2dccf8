use crate::color::Color;

/// Default cell colors: a warm-to-cool sweep that reads well on dark terminals.
pub fn default_palette() -> Vec<Color> {
    [
        "#ef4444", "#f97316", "#f59e0b", "#eab308", "#84cc16", "#22c55e",
        "#14b8a6", "#06b6d4", "#3b82f6", "#6366f1", "#8b5cf6", "#d946ef",
    ]
    .iter()
    .filter_map(|hex| Color::from_hex(hex))
    .collect()
}

/// A rectangular grid of colored cells driven by the logical frame counter.
///
/// Cells hold no state. Each one derives its color from the counter at the
/// moment it is observed, so the grid advances exactly one step per logical
/// frame no matter how often it is drawn.
///
/// # Example
/// ```rust,ignore
/// let grid = CellGrid::new(8, 8);
/// let c = grid.cell_color(2, 3, snapshot.frame_counter);
/// ```
#[derive(Debug, Clone)]
pub struct CellGrid {
    rows: u16,
    columns: u16,
    palette: Vec<Color>,
}

impl CellGrid {
    pub const MAX_SIDE: u16 = 32;

    pub fn new(rows: u16, columns: u16) -> Self {
        Self {
            rows: rows.clamp(1, Self::MAX_SIDE),
            columns: columns.clamp(1, Self::MAX_SIDE),
            palette: default_palette(),
        }
    }

    /// Replaces the palette. An empty palette is ignored.
    pub fn palette(mut self, palette: Vec<Color>) -> Self {
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    pub fn rows(&self) -> u16 { self.rows }
    pub fn columns(&self) -> u16 { self.columns }

    /// Color of the cell at (`row`, `col`) for logical frame `frame`.
    ///
    /// Cells on the same anti-diagonal share a color, so the pattern sweeps
    /// diagonally by one cell per frame.
    pub fn cell_color(&self, row: u16, col: u16, frame: u64) -> Color {
        let len = self.palette.len() as u64;
        let offset = (u64::from(row) + u64::from(col)) % len;
        let idx = (frame % len + offset) % len;
        self.palette[idx as usize]
    }

    /// All cell colors, row-major.
    pub fn colors(&self, frame: u64) -> Vec<Vec<Color>> {
        (0..self.rows)
            .map(|r| (0..self.columns).map(|c| self.cell_color(r, c, frame)).collect())
            .collect()
    }
}

impl Default for CellGrid {
    fn default() -> Self { Self::new(8, 8) }
}
