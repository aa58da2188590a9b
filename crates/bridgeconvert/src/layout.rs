use bridgecore::Position;
use serde::{Deserialize, Serialize};

/// Grid used to place nodes that come without a position.
///
/// Columns advance with every node index and rows cycle, so two indices
/// never share a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub base_x: f64,
    pub base_y: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub rows: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_x: 100.0,
            base_y: 100.0,
            spacing_x: 350.0,
            spacing_y: 200.0,
            rows: 3,
        }
    }
}

impl LayoutConfig {
    pub fn with_origin(mut self, base_x: f64, base_y: f64) -> Self {
        self.base_x = base_x;
        self.base_y = base_y;
        self
    }

    pub fn with_spacing(mut self, spacing_x: f64, spacing_y: f64) -> Self {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Default position of the node at `index` in the document's node array
    pub fn assign(&self, index: usize) -> Position {
        let row = index % self.rows.max(1);
        Position {
            x: self.base_x + index as f64 * self.spacing_x,
            y: self.base_y + row as f64 * self.spacing_y,
        }
    }
}

/// [`LayoutConfig::assign`] with the default grid
pub fn assign(index: usize) -> Position {
    LayoutConfig::default().assign(index)
}
