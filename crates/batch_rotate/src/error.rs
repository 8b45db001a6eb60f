// Errors that can end the processing of a single file.

use std::io;

use image::ImageError;
use pixel_rotate::BufferError;
use thiserror::Error;

/// Why one file could not be rotated. None of these stop the batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The file could not be read, or its replacement could not be written.
    #[error("cannot open file: {0}")]
    Open(#[source] io::Error),

    #[error("cannot decode image: {0}")]
    Decode(#[source] ImageError),

    /// The pixel buffer could not be built, mostly for lack of memory.
    #[error("cannot build pixel buffer: {0}")]
    Allocation(#[from] BufferError),

    #[error("cannot encode image: {0}")]
    Encode(#[source] ImageError),
}
