// Rotation of pixel buffers, either by an exact quarter turn or by an
// arbitrary angle with nearest-neighbor sampling.

use std::f64::consts::PI;
use std::fmt;

use crate::buffer::{BufferError, PixelBuffer, TRANSPARENT};

/// Angle used by the arbitrary rotation mode when none is configured.
pub const DEFAULT_ANGLE_DEGREES: f64 = 110.0;

/// Which rotation to apply to each image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Rotation {
    /// Exact clockwise quarter turn, see [`rotate90`].
    #[default]
    Quarter,
    /// Rotation by any angle in degrees, see [`rotate_arbitrary`].
    Arbitrary { degrees: f64 },
}

impl Rotation {
    pub fn apply(&self, src: &PixelBuffer) -> Result<PixelBuffer, BufferError> {
        match *self {
            Rotation::Quarter => rotate90(src),
            Rotation::Arbitrary { degrees } => rotate_arbitrary(src, degrees),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Quarter => write!(f, "quarter turn (90 degrees)"),
            Rotation::Arbitrary { degrees } => write!(f, "{degrees} degrees"),
        }
    }
}

/// Rotates the image a quarter turn clockwise.
///
/// The source pixel at `(x, y)` lands at `(height - 1 - y, x)` of a
/// `height x width` output. Every output pixel is written exactly once,
/// so four applications give back the original buffer.
pub fn rotate90(src: &PixelBuffer) -> Result<PixelBuffer, BufferError> {
    let (width, height) = src.dimensions();
    let mut rotated = PixelBuffer::filled(height, width, TRANSPARENT)?;

    for y in 0..height {
        for x in 0..width {
            rotated[(height - 1 - y, x)] = src[(x, y)];
        }
    }

    Ok(rotated)
}

/// Rotates the image by `degrees` into the bounding box of the rotated
/// rectangle.
///
/// __Arguments:__
///
/// + `src` - the image to rotate; it is not modified.
///
/// + `degrees` - the rotation angle. Any finite value is accepted; only its
///   sine and cosine are used. NaN and infinities give
///   [`BufferError::NonFiniteAngle`].
///
/// Each output pixel is mapped back into the source by the inverse
/// rotation about the two image centers and takes the source pixel it
/// lands on, or [`TRANSPARENT`] when it lands outside the source. All
/// real-to-integer conversions truncate toward zero, which is why an
/// exact right angle can sample one column or row off compared to
/// [`rotate90`].
pub fn rotate_arbitrary(src: &PixelBuffer, degrees: f64) -> Result<PixelBuffer, BufferError> {
    if !degrees.is_finite() {
        return Err(BufferError::NonFiniteAngle { degrees });
    }

    let angle_rad = degrees * PI / 180.0;
    let cos_theta = angle_rad.cos();
    let sin_theta = angle_rad.sin();

    let (width, height) = src.dimensions();
    let (w, h) = (width as f64, height as f64);

    // bounding box of the rotated rectangle, truncated; float residue on a
    // 1 pixel input may truncate a side to 0, which we round up
    let new_width = ((w * cos_theta).abs() + (h * sin_theta).abs()) as usize;
    let new_height = ((w * sin_theta).abs() + (h * cos_theta).abs()) as usize;
    let new_width = new_width.max(1);
    let new_height = new_height.max(1);

    let mut rotated = PixelBuffer::filled(new_width, new_height, TRANSPARENT)?;

    let cx = (width / 2) as i64;
    let cy = (height / 2) as i64;
    let new_cx = (new_width / 2) as i64;
    let new_cy = (new_height / 2) as i64;

    for y in 0..new_height {
        let yt = (y as i64 - new_cy) as f64;
        for x in 0..new_width {
            let xt = (x as i64 - new_cx) as f64;

            let orig_x = (cos_theta * xt + sin_theta * yt) as i64 + cx;
            let orig_y = (-sin_theta * xt + cos_theta * yt) as i64 + cy;

            if (0..width as i64).contains(&orig_x) && (0..height as i64).contains(&orig_y) {
                rotated[(x, y)] = src[(orig_x as usize, orig_y as usize)];
            }
        }
    }

    Ok(rotated)
}
