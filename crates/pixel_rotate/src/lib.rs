#[cfg(test)]
mod tests;

// Home of the pixel buffer type and the rotation routines.

pub mod buffer;
pub mod rotate;

pub use buffer::{BufferError, PixelBuffer, Rgba, TRANSPARENT};
pub use rotate::{DEFAULT_ANGLE_DEGREES, Rotation, rotate_arbitrary, rotate90};
