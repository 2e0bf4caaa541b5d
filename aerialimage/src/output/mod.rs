//! Writing retrieved images to disk.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default JPEG quality for written images.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur while writing an image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// File name used for an image retrieved at `zoom`.
///
/// ```
/// assert_eq!(aerialimage::output::output_file_name(19), "aerialImage_19.jpeg");
/// ```
pub fn output_file_name(zoom: u8) -> String {
    format!("aerialImage_{}.jpeg", zoom)
}

/// Persists a retrieved image.
pub trait ImageWriter {
    /// Writes `image` retrieved at `zoom` and returns where it was stored.
    fn write(&self, image: &RgbImage, zoom: u8) -> Result<PathBuf, OutputError>;
}

/// Writes JPEG files named `aerialImage_{zoom}.jpeg` into a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct JpegFileWriter {
    directory: PathBuf,
    quality: u8,
}

impl JpegFileWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Sets the JPEG quality (clamped to 1..=100).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Full path the image for `zoom` is written to.
    pub fn path_for(&self, zoom: u8) -> PathBuf {
        self.directory.join(output_file_name(zoom))
    }
}

impl ImageWriter for JpegFileWriter {
    fn write(&self, image: &RgbImage, zoom: u8) -> Result<PathBuf, OutputError> {
        fs::create_dir_all(&self.directory).map_err(|source| OutputError::CreateDirectory {
            path: self.directory.clone(),
            source,
        })?;

        let path = self.path_for(zoom);

        // A failed encode must not leave a file behind.
        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, self.quality)
            .encode_image(image)
            .map_err(|source| OutputError::Encode {
                path: path.clone(),
                source,
            })?;

        let mut file = File::create(&path).map_err(|source| OutputError::CreateFile {
            path: path.clone(),
            source,
        })?;
        if let Err(source) = file.write_all(&encoded) {
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(OutputError::Write { path, source });
        }

        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Image saved"
        );

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(1), "aerialImage_1.jpeg");
        assert_eq!(output_file_name(23), "aerialImage_23.jpeg");
    }

    #[test]
    fn test_write_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let directory = temp_dir.path().join("nested").join("out");
        let writer = JpegFileWriter::new(&directory);

        let image = RgbImage::from_pixel(40, 30, Rgb([10, 200, 30]));
        let path = writer.write(&image, 17).unwrap();

        assert_eq!(path, directory.join("aerialImage_17.jpeg"));
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JpegFileWriter::new(temp_dir.path()).with_quality(75);

        writer.write(&RgbImage::new(10, 10), 12).unwrap();
        let path = writer.write(&RgbImage::new(20, 5), 12).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 5));
    }

    #[test]
    fn test_quality_clamped() {
        assert_eq!(JpegFileWriter::new("out").with_quality(0).quality(), 1);
        assert_eq!(JpegFileWriter::new("out").with_quality(255).quality(), 100);
    }

    #[test]
    fn test_encode_failure_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JpegFileWriter::new(temp_dir.path());

        // JPEG dimensions are limited to 65535 pixels.
        let err = writer.write(&RgbImage::new(70_000, 1), 17).unwrap_err();

        assert!(matches!(err, OutputError::Encode { .. }));
        assert!(!writer.path_for(17).exists());
    }

    #[test]
    fn test_failed_encode_keeps_previous_image() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JpegFileWriter::new(temp_dir.path());
        let path = writer.write(&RgbImage::new(8, 8), 17).unwrap();

        assert!(writer.write(&RgbImage::new(70_000, 1), 17).is_err());

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let writer = JpegFileWriter::new(&blocker);
        let err = writer.write(&RgbImage::new(4, 4), 3).unwrap_err();
        assert!(matches!(err, OutputError::CreateDirectory { .. }));
    }
}
