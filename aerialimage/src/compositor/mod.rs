//! Canvas compositing and cropping.
//!
//! Fetched tiles are pasted into a [`Canvas`] covering the whole
//! [`TileGrid`], then the canvas is cropped to the exact pixel rectangle of
//! the requested bounding box.

use crate::coord::{BoundingBox, TileCoord, TileGrid};
use crate::error::RetrievalError;
use crate::fetch::TileSet;
use image::{imageops, RgbImage};
use tracing::debug;

/// Pixel buffer covering every tile of a grid.
///
/// Tile `(col, row)` occupies the 256×256 block at
/// `((col - min_col) * 256, (row - min_row) * 256)`.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    grid: TileGrid,
}

impl Canvas {
    /// Allocates a black canvas sized for `grid`.
    pub fn new(grid: &TileGrid) -> Self {
        Self {
            image: RgbImage::new(grid.pixel_width(), grid.pixel_height()),
            grid: *grid,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Copies `tile_image` into the block belonging to `tile`.
    ///
    /// Pasting the same tile twice leaves the canvas unchanged.
    pub fn paste(&mut self, tile: &TileCoord, tile_image: &RgbImage) {
        let offset = self.grid.offset_of(tile);
        imageops::replace(
            &mut self.image,
            tile_image,
            offset.x as i64,
            offset.y as i64,
        );
    }
}

/// Stitches every tile of `grid` into a new canvas.
///
/// Placement depends only on each tile's address, so the iteration order of
/// `tiles` has no effect on the result. Entries outside the grid are ignored.
///
/// # Errors
///
/// [`RetrievalError::IncompleteTileSet`] naming the first grid address (in
/// row-major order) with no entry in `tiles`.
pub fn composite(tiles: &TileSet, grid: &TileGrid) -> Result<Canvas, RetrievalError> {
    if let Some(missing) = grid.tiles().find(|tile| !tiles.contains_key(tile)) {
        return Err(RetrievalError::IncompleteTileSet { missing });
    }

    let mut canvas = Canvas::new(grid);
    for tile in grid {
        if let Some(tile_image) = tiles.get(&tile) {
            canvas.paste(&tile, tile_image);
        }
    }

    debug!(
        width = canvas.width(),
        height = canvas.height(),
        tiles = grid.tile_count(),
        "Composited canvas"
    );

    Ok(canvas)
}

/// Extracts the pixel rectangle of `bbox` at `zoom` from `canvas`.
///
/// The output is exactly as wide and tall as the box's pixel-space extent at
/// `zoom`.
///
/// # Errors
///
/// [`RetrievalError::InvalidInput`] when the box has no pixel extent at
/// `zoom`, or when `grid` does not cover it.
pub fn crop(
    canvas: &Canvas,
    bbox: &BoundingBox,
    zoom: u8,
    grid: &TileGrid,
) -> Result<RgbImage, RetrievalError> {
    if grid.zoom() != zoom {
        return Err(RetrievalError::InvalidInput(format!(
            "grid is at zoom {} but crop requested zoom {}",
            grid.zoom(),
            zoom
        )));
    }

    let rect = bbox.pixel_rect(zoom);
    if rect.is_empty() {
        return Err(RetrievalError::InvalidInput(format!(
            "bounding box is {}x{} pixels at zoom {}",
            rect.width(),
            rect.height(),
            zoom
        )));
    }

    let origin = grid.origin();
    if rect.left < origin.x || rect.top < origin.y {
        return Err(RetrievalError::InvalidInput(
            "tile grid does not cover the bounding box".to_string(),
        ));
    }

    let local = rect.relative_to(origin);
    if local.right > canvas.width() || local.bottom > canvas.height() {
        return Err(RetrievalError::InvalidInput(
            "tile grid does not cover the bounding box".to_string(),
        ));
    }

    debug!(
        left = local.left,
        top = local.top,
        width = local.width(),
        height = local.height(),
        "Cropping canvas"
    );

    Ok(imageops::crop_imm(
        canvas.image(),
        local.left,
        local.top,
        local.width(),
        local.height(),
    )
    .to_image())
}
