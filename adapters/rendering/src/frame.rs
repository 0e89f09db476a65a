use dungeon_radar_core::RENDER_DEPTH;

/// Rectangular grid of single-glyph cells rebuilt every tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Frame {
    /// Creates a frame of the provided size filled with spaces.
    #[must_use]
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    /// Number of columns in the frame.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows in the frame.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Glyph stored at the provided cell, if it lies inside the frame.
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<char> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column).copied()
    }

    /// Writes a glyph, silently dropping writes that fall outside the frame.
    pub fn set(&mut self, column: i32, row: i32, glyph: char) {
        let (Ok(column), Ok(row)) = (usize::try_from(column), usize::try_from(row)) else {
            return;
        };
        if column >= self.width || row >= self.height {
            return;
        }
        self.cells[row * self.width + column] = glyph;
    }

    /// Iterates over the frame rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().collect())
    }

    /// Counts how many cells hold the provided glyph.
    #[must_use]
    pub fn count(&self, glyph: char) -> usize {
        self.cells.iter().filter(|&&cell| cell == glyph).count()
    }

    /// Reports whether the provided column holds the glyph in any row.
    #[must_use]
    pub fn column_contains(&self, column: usize, glyph: char) -> bool {
        (0..self.height).any(|row| self.get(column, row) == Some(glyph))
    }
}

/// Per-column distance to the nearest wall, shared by the wall and sprite passes.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    distances: Vec<f32>,
}

impl DepthBuffer {
    /// Creates a buffer where every column sees nothing closer than the render depth.
    #[must_use]
    pub fn cleared(width: usize) -> Self {
        Self {
            distances: vec![RENDER_DEPTH; width],
        }
    }

    /// Creates a buffer from explicit per-column distances.
    #[must_use]
    pub fn from_distances(distances: Vec<f32>) -> Self {
        Self { distances }
    }

    /// Distance recorded for the column; columns past the end read as the render depth.
    #[must_use]
    pub fn get(&self, column: usize) -> f32 {
        self.distances.get(column).copied().unwrap_or(RENDER_DEPTH)
    }

    pub(crate) fn set(&mut self, column: usize, distance: f32) {
        if let Some(slot) = self.distances.get_mut(column) {
            *slot = distance;
        }
    }

    /// Number of columns covered by the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Reports whether the buffer covers no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
