//! Grid layout math handed to the renderer.
//!
//! Cells are sized so the grid exactly fills the container once padding and
//! inter-cell spacing are taken out. The core computes this once per level
//! and otherwise never touches pixels.

use serde::{Deserialize, Serialize};

/// Width/height pair in container units (pixels for most hosts).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Inner padding of the grid container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    /// Same padding on every side.
    #[must_use]
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

/// Gap between neighbouring cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub x: f32,
    pub y: f32,
}

/// Container geometry for the card grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub container: Size,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub spacing: Spacing,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            container: Size::new(800.0, 600.0),
            padding: Padding::uniform(10.0),
            spacing: Spacing { x: 8.0, y: 8.0 },
        }
    }
}

impl GridLayout {
    /// Create a layout with no padding or spacing.
    #[must_use]
    pub fn new(container: Size) -> Self {
        Self {
            container,
            padding: Padding::default(),
            spacing: Spacing::default(),
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, x: f32, y: f32) -> Self {
        self.spacing = Spacing { x, y };
        self
    }

    /// Size of one cell for a `rows` x `columns` grid.
    ///
    /// Never negative: a container too small for its padding yields zero.
    #[must_use]
    pub fn cell_size(&self, rows: u32, columns: u32) -> Size {
        let rows = rows.max(1) as f32;
        let columns = columns.max(1) as f32;

        let total_width = self.container.width
            - self.padding.left
            - self.padding.right
            - self.spacing.x * (columns - 1.0);
        let total_height = self.container.height
            - self.padding.top
            - self.padding.bottom
            - self.spacing.y * (rows - 1.0);

        Size::new((total_width / columns).max(0.0), (total_height / rows).max(0.0))
    }

    /// Top-left corner of grid slot `index`, relative to the container.
    ///
    /// Slots fill row by row, `columns` per row.
    #[must_use]
    pub fn cell_origin(&self, index: usize, columns: u32, cell: Size) -> (f32, f32) {
        let columns = columns.max(1) as usize;
        let row = (index / columns) as f32;
        let col = (index % columns) as f32;
        (
            self.padding.left + col * (cell.width + self.spacing.x),
            self.padding.top + row * (cell.height + self.spacing.y),
        )
    }
}

/// Everything a renderer needs to lay out a freshly generated board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub rows: u32,
    pub columns: u32,
    pub cell: Size,
    /// Grid slot left empty when the cell count is odd.
    pub hidden_slot: Option<usize>,
}
