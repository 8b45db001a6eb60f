// This file is a place to try the rotation routines on a small test pattern.

use clap::Parser;
use pixel_rotate::{PixelBuffer, Rotation};

#[derive(Parser)]
#[command(about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 4)]
    width: usize,
    #[arg(long, default_value_t = 2)]
    height: usize,
    /// Rotate by this many degrees instead of a quarter turn.
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,
}

/// Rotates a numbered test pattern and prints the source and the result.
fn main() -> Result<(), String> {
    let args = Args::parse();

    let rotation = match args.angle {
        Some(degrees) if degrees.is_finite() => Rotation::Arbitrary { degrees },
        Some(degrees) => return Err(format!("Angle must be finite, got {degrees}")),
        None => Rotation::Quarter,
    };

    let src = test_pattern(args.width, args.height).map_err(|e| e.to_string())?;
    println!("Original ({}x{}):", src.width(), src.height());
    print_grid(&src);

    let rotated = rotation.apply(&src).map_err(|e| e.to_string())?;
    println!("\nRotated by {rotation} ({}x{}):", rotated.width(), rotated.height());
    print_grid(&rotated);

    Ok(())
}

fn test_pattern(width: usize, height: usize) -> Result<PixelBuffer, pixel_rotate::BufferError> {
    let mut pattern = PixelBuffer::filled(width, height, [0, 0, 0, 255])?;

    // pixel i carries i + 1 in its red channel so 0 marks the padding
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            pattern.put_pixel(x, y, [(i % 255 + 1) as u8, 0, 0, 255]);
        }
    }

    Ok(pattern)
}

fn print_grid(buffer: &PixelBuffer) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            print!("{:>4}", buffer[(x, y)][0]);
        }
        println!();
    }
}
