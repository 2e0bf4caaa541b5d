//! Pixel rectangles and the tile grids covering them.

use super::bbox::BoundingBox;
use super::types::{CoordError, PixelPoint, TileCoord, TILE_SIZE};
use super::{clamp_tile_coordinate, pixel_to_tile, tile_to_pixel, validate_zoom};

/// A rectangle in whole-map pixel space at a fixed zoom.
///
/// `right` and `bottom` are exclusive, so `width() == right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Translates the rectangle so that `origin` becomes `(0, 0)`.
    pub fn relative_to(&self, origin: PixelPoint) -> PixelRect {
        PixelRect {
            left: self.left - origin.x,
            top: self.top - origin.y,
            right: self.right - origin.x,
            bottom: self.bottom - origin.y,
        }
    }
}

/// The rectangle of tiles `[min_col..=max_col] × [min_row..=max_row]` at one
/// zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileGrid {
    min_col: u32,
    min_row: u32,
    max_col: u32,
    max_row: u32,
    zoom: u8,
}

impl TileGrid {
    /// Creates a grid from inclusive tile bounds.
    pub fn new(
        zoom: u8,
        min_col: u32,
        min_row: u32,
        max_col: u32,
        max_row: u32,
    ) -> Result<Self, CoordError> {
        validate_zoom(zoom)?;
        let last = (1_u32 << zoom) - 1;
        if min_col > max_col || min_row > max_row {
            return Err(CoordError::InvalidTileRange(format!(
                "cols {}..={} rows {}..={} is empty",
                min_col, max_col, min_row, max_row
            )));
        }
        if max_col > last || max_row > last {
            return Err(CoordError::InvalidTileRange(format!(
                "tile ({}, {}) lies outside zoom {} (max index {})",
                max_col, max_row, zoom, last
            )));
        }
        Ok(Self {
            min_col,
            min_row,
            max_col,
            max_row,
            zoom,
        })
    }

    /// Smallest grid whose tiles contain every pixel of `bbox` at `zoom`.
    ///
    /// The rect's right and bottom edges are exclusive, so a box ending on a
    /// tile boundary does not pull in the next column or row.
    pub fn covering(bbox: &BoundingBox, zoom: u8) -> Self {
        let rect = bbox.pixel_rect(zoom);
        let (min_col, min_row) = pixel_to_tile(PixelPoint::new(rect.left, rect.top));
        let last = PixelPoint::new(
            rect.right.saturating_sub(1).max(rect.left),
            rect.bottom.saturating_sub(1).max(rect.top),
        );
        let (max_col, max_row) = pixel_to_tile(last);

        Self {
            min_col: clamp_tile_coordinate(min_col as i64, zoom),
            min_row: clamp_tile_coordinate(min_row as i64, zoom),
            max_col: clamp_tile_coordinate(max_col as i64, zoom),
            max_row: clamp_tile_coordinate(max_row as i64, zoom),
            zoom,
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn min_col(&self) -> u32 {
        self.min_col
    }

    pub fn min_row(&self) -> u32 {
        self.min_row
    }

    pub fn max_col(&self) -> u32 {
        self.max_col
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Number of tile columns.
    pub fn columns(&self) -> u32 {
        self.max_col - self.min_col + 1
    }

    /// Number of tile rows.
    pub fn rows(&self) -> u32 {
        self.max_row - self.min_row + 1
    }

    pub fn tile_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Canvas width in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.columns() * TILE_SIZE
    }

    /// Canvas height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.rows() * TILE_SIZE
    }

    /// Whole-map pixel position of the grid's upper-left corner.
    pub fn origin(&self) -> PixelPoint {
        tile_to_pixel(self.min_col, self.min_row)
    }

    /// Canvas offset at which `tile` is placed.
    pub fn offset_of(&self, tile: &TileCoord) -> PixelPoint {
        PixelPoint {
            x: (tile.col - self.min_col) * TILE_SIZE,
            y: (tile.row - self.min_row) * TILE_SIZE,
        }
    }

    pub fn contains(&self, tile: &TileCoord) -> bool {
        tile.zoom == self.zoom
            && (self.min_col..=self.max_col).contains(&tile.col)
            && (self.min_row..=self.max_row).contains(&tile.row)
    }

    /// Iterates over all tiles in row-major order.
    pub fn tiles(&self) -> TileGridIterator {
        TileGridIterator {
            grid: *self,
            current: 0,
        }
    }
}

impl IntoIterator for &TileGrid {
    type Item = TileCoord;
    type IntoIter = TileGridIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

/// Iterator over all tiles in a grid.
///
/// Yields row 0 columns left to right, then row 1, and so on.
#[derive(Debug, Clone)]
pub struct TileGridIterator {
    grid: TileGrid,
    current: usize,
}

impl Iterator for TileGridIterator {
    type Item = TileCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.grid.tile_count() {
            return None;
        }

        let columns = self.grid.columns() as usize;
        let row = self.grid.min_row + (self.current / columns) as u32;
        let col = self.grid.min_col + (self.current % columns) as u32;

        self.current += 1;

        Some(TileCoord {
            row,
            col,
            zoom: self.grid.zoom,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.tile_count() - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileGridIterator {}
