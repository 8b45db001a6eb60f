// Reading and writing image files, plus finding them on disk.
//
// The image crate does the actual decoding and encoding; this module only
// converts between its buffers and PixelBuffer.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use pixel_rotate::PixelBuffer;

use crate::error::PipelineError;

/// Decodes the image at `path` into 8-bit RGBA, whatever its stored format.
pub fn decode(path: &Path) -> Result<PixelBuffer, PipelineError> {
    let image_bytes = fs::read(path).map_err(PipelineError::Open)?;

    let image = image::load_from_memory(&image_bytes)
        .map_err(PipelineError::Decode)?
        .to_rgba8();
    let (width, height) = image.dimensions();

    let buffer = PixelBuffer::from_rgba_bytes(width as usize, height as usize, image.as_raw())?;
    Ok(buffer)
}

/// Encodes `buffer` over the file at `path`.
///
/// The output format follows the extension of `path`. The data is written to
/// a temporary file next to the target and renamed over it once complete, so
/// a failed write leaves the previous file in place.
pub fn encode(path: &Path, buffer: &PixelBuffer) -> Result<(), PipelineError> {
    let format = ImageFormat::from_path(path).map_err(PipelineError::Encode)?;
    let image = to_dynamic_image(buffer, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".rotate-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(PipelineError::Open)?;

    // keep the permissions of the file being replaced
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(PipelineError::Open)?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image
            .write_to(&mut writer, format)
            .map_err(PipelineError::Encode)?;
        writer
            .flush()
            .map_err(|e| PipelineError::Encode(ImageError::IoError(e)))?;
    }

    tmp.persist(path).map_err(|e| PipelineError::Open(e.error))?;
    Ok(())
}

fn to_dynamic_image(buffer: &PixelBuffer, format: ImageFormat) -> Result<DynamicImage, PipelineError> {
    let (width, height) = buffer.dimensions();
    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(dimension_error());
    };

    let image = RgbaImage::from_raw(width, height, buffer.to_rgba_bytes()?)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(dimension_error)?;

    // formats without an alpha channel get plain RGB
    match format {
        ImageFormat::Jpeg => Ok(DynamicImage::ImageRgb8(image.to_rgb8())),
        _ => Ok(image),
    }
}

fn dimension_error() -> PipelineError {
    PipelineError::Encode(ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    )))
}

/// Lists the files directly inside `root` whose extension is `extension`.
///
/// The match is exact and case sensitive, and subdirectories are not
/// searched. Paths come back sorted. Entries that cannot be read are
/// logged and skipped; only an unreadable `root` is an error.
pub fn list_images(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut image_paths = Vec::new();

    for entry in fs::read_dir(root)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                continue;
            }
        };
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            image_paths.push(path);
        }
    }

    image_paths.sort();
    Ok(image_paths)
}
