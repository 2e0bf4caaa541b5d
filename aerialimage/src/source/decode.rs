//! Tile image decoding.

use super::types::SourceError;
use crate::coord::TILE_SIZE;
use image::RgbImage;

/// Decodes an encoded tile (JPEG, PNG) into an RGB buffer.
///
/// Fails unless the decoded image is exactly one tile in size.
pub fn decode_tile(bytes: &[u8]) -> Result<RgbImage, SourceError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| SourceError::DecodeError(format!("image decode error: {}", e)))?
        .to_rgb8();

    if image.width() != TILE_SIZE || image.height() != TILE_SIZE {
        return Err(SourceError::InvalidResponse(format!(
            "expected {}x{} tile, got {}x{}",
            TILE_SIZE,
            TILE_SIZE,
            image.width(),
            image.height()
        )));
    }

    Ok(image)
}

/// Decodes a tile on the blocking thread pool.
pub async fn decode_tile_blocking(bytes: Vec<u8>) -> Result<RgbImage, SourceError> {
    tokio::task::spawn_blocking(move || decode_tile(&bytes))
        .await
        .map_err(|e| SourceError::DecodeError(format!("decode task failed: {}", e)))?
}
