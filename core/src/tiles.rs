use glam::Vec2;

use crate::{CellCoord, Tile};

/// Dense grid of [`Tile`] values describing the dungeon layout.
///
/// Lookups are total: any coordinate outside the grid reads as
/// [`Tile::Wall`], so rays and entities can never escape the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Creates a map of the provided dimensions with every cell set to `tile`.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, tile: Tile) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![tile; capacity],
        }
    }

    /// Builds a map from text rows where `#` marks a wall and any other glyph floor.
    ///
    /// Short rows are padded with walls up to the length of the longest row.
    #[must_use]
    pub fn from_ascii<S: AsRef<str>>(rows: &[S]) -> Self {
        let columns = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut map = Self::filled(
            u32::try_from(columns).unwrap_or(0),
            u32::try_from(rows.len()).unwrap_or(0),
            Tile::Wall,
        );
        for (row, line) in rows.iter().enumerate() {
            for (column, glyph) in line.as_ref().chars().enumerate() {
                if glyph != '#' {
                    map.set(CellCoord::new(column as u32, row as u32), Tile::Floor);
                }
            }
        }
        map
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile stored at the provided cell; cells outside the grid are walls.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Tile {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(Tile::Wall)
    }

    /// Overwrites the tile at the provided cell. Cells outside the grid are ignored.
    pub fn set(&mut self, cell: CellCoord, tile: Tile) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = tile;
            }
        }
    }

    /// Tile under a continuous world position, truncated to its cell.
    #[must_use]
    pub fn tile_at(&self, point: Vec2) -> Tile {
        CellCoord::containing(point).map_or(Tile::Wall, |cell| self.tile(cell))
    }

    /// Reports whether every cell of the `(2 * radius + 1)²` block around the
    /// point is floor.
    #[must_use]
    pub fn is_open(&self, point: Vec2, radius: u32) -> bool {
        let radius = i64::from(radius);
        (-radius..=radius).all(|dy| {
            (-radius..=radius).all(|dx| {
                self.tile_at(point + Vec2::new(dx as f32, dy as f32))
                    .is_floor()
            })
        })
    }

    /// Closest floor position to `point`.
    ///
    /// Returns the point unchanged when it already lies on floor. Otherwise
    /// rings of growing radius up to `max_radius` are scanned row by row and
    /// the center of the first floor cell is returned. When no ring contains
    /// floor the point is returned unchanged.
    #[must_use]
    pub fn nearest_open(&self, point: Vec2, max_radius: u32) -> Vec2 {
        if self.tile_at(point).is_floor() || !point.is_finite() {
            return point;
        }

        let origin_column = point.x.trunc() as i64;
        let origin_row = point.y.trunc() as i64;
        for radius in 1..=i64::from(max_radius) {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs().max(dy.abs()) != radius {
                        continue;
                    }
                    let column = u32::try_from(origin_column + dx);
                    let row = u32::try_from(origin_row + dy);
                    let (Ok(column), Ok(row)) = (column, row) else {
                        continue;
                    };
                    let cell = CellCoord::new(column, row);
                    if self.tile(cell).is_floor() {
                        return cell.center();
                    }
                }
            }
        }

        point
    }

    /// Counts the walls among the four edge-adjacent neighbours of a cell.
    #[must_use]
    pub fn wall_neighbours(&self, cell: CellCoord) -> usize {
        let column = cell.column();
        let row = cell.row();
        let neighbours = [
            column.checked_sub(1).map(|left| CellCoord::new(left, row)),
            column.checked_add(1).map(|right| CellCoord::new(right, row)),
            row.checked_sub(1).map(|up| CellCoord::new(column, up)),
            row.checked_add(1).map(|down| CellCoord::new(column, down)),
        ];
        neighbours
            .into_iter()
            .filter(|neighbour| neighbour.map_or(true, |cell| self.tile(cell) == Tile::Wall))
            .count()
    }

    /// Forces the outermost ring of cells to [`Tile::Wall`].
    pub fn enforce_border(&mut self) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }
        let last_column = self.columns - 1;
        let last_row = self.rows - 1;
        for column in 0..self.columns {
            self.set(CellCoord::new(column, 0), Tile::Wall);
            self.set(CellCoord::new(column, last_row), Tile::Wall);
        }
        for row in 0..self.rows {
            self.set(CellCoord::new(0, row), Tile::Wall);
            self.set(CellCoord::new(last_column, row), Tile::Wall);
        }
    }

    /// Iterates every cell and its tile in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *tile)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
