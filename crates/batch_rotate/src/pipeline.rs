// Rotation of a single file: decode, rotate, encode back to the same path.

use std::path::Path;

use pixel_rotate::Rotation;

use crate::codec;
use crate::error::PipelineError;

/// Rotates the image stored at `path` and overwrites it with the result.
pub fn process(path: &Path, rotation: &Rotation) -> Result<(), PipelineError> {
    let image = codec::decode(path)?;
    let rotated = rotation.apply(&image)?;
    // the decoded buffer is no longer needed while encoding
    drop(image);
    codec::encode(path, &rotated)
}

/// Runs [`process`] and logs the outcome instead of returning the error.
///
/// Returns true if the file was rotated.
pub fn process_logged(path: &Path, rotation: &Rotation) -> bool {
    #[cfg(feature = "timing")]
    let time = std::time::Instant::now();

    let result = process(path, rotation);

    #[cfg(feature = "timing")]
    log::debug!(
        "{}: {:>2.3}s",
        path.display(),
        time.elapsed().as_secs_f32()
    );

    match result {
        Ok(()) => {
            log::info!("Rotated {}", path.display());
            true
        }
        Err(e) => {
            log::error!("Error processing file {}: {}", path.display(), e);
            false
        }
    }
}
