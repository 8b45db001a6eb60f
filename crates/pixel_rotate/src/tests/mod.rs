// unit tests

use super::*;

use proptest::prelude::*;

/// 4x2 image where every pixel has a distinct color.
fn test_buffer_4x2() -> PixelBuffer {
    let mut pixels = Vec::new();
    for y in 0..2u8 {
        for x in 0..4u8 {
            pixels.push([x * 10, y * 10, x + y, 255]);
        }
    }
    PixelBuffer::from_pixels(4, 2, pixels).unwrap()
}

/// Opaque image with the pixel index encoded in the red and green channels.
fn numbered_buffer(width: usize, height: usize) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|i| [(i % 256) as u8, (i / 256) as u8, 128, 255])
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

fn arb_buffer() -> impl Strategy<Value = PixelBuffer> {
    (1usize..12, 1usize..12)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), prop::collection::vec(any::<Rgba>(), w * h)))
        .prop_map(|(w, h, pixels)| PixelBuffer::from_pixels(w, h, pixels).unwrap())
}

// buffer

#[test]
fn zero_dimensions_are_rejected() {
    assert_eq!(
        PixelBuffer::filled(0, 3, TRANSPARENT),
        Err(BufferError::ZeroDimension {
            width: 0,
            height: 3
        })
    );
    assert!(PixelBuffer::from_pixels(2, 0, Vec::new()).is_err());
}

#[test]
fn pixel_count_must_match_dimensions() {
    let err = PixelBuffer::from_pixels(2, 2, vec![TRANSPARENT; 3]).unwrap_err();
    assert_eq!(
        err,
        BufferError::LengthMismatch {
            expected: 4,
            actual: 3
        }
    );

    let err = PixelBuffer::from_rgba_bytes(2, 2, &[0; 15]).unwrap_err();
    assert!(matches!(err, BufferError::LengthMismatch { expected: 4, .. }));
}

#[test]
fn oversized_buffer_is_an_allocation_error() {
    let err = PixelBuffer::filled(usize::MAX, 2, TRANSPARENT).unwrap_err();
    assert!(matches!(err, BufferError::Allocation { .. }));
}

#[test]
fn rgba_bytes_are_row_major() {
    let bytes: Vec<u8> = (0..24).collect();
    let buffer = PixelBuffer::from_rgba_bytes(3, 2, &bytes).unwrap();

    assert_eq!(buffer.pixel(0, 0), Some([0, 1, 2, 3]));
    assert_eq!(buffer.pixel(2, 0), Some([8, 9, 10, 11]));
    assert_eq!(buffer.pixel(0, 1), Some([12, 13, 14, 15]));
    assert_eq!(buffer.pixel(3, 0), None);
    assert_eq!(buffer.pixel(0, 2), None);

    assert_eq!(buffer.to_rgba_bytes().unwrap(), bytes);
}

#[test]
fn put_pixel_writes_at_column_and_row() {
    let mut buffer = PixelBuffer::filled(3, 2, TRANSPARENT).unwrap();
    buffer.put_pixel(2, 1, [1, 2, 3, 4]);

    assert_eq!(buffer.pixels()[5], [1, 2, 3, 4]);
    assert_eq!(buffer[(2, 1)], [1, 2, 3, 4]);
}

// quarter turn

#[test]
fn rotate90_swaps_dimensions() {
    let rotated = rotate90(&test_buffer_4x2()).unwrap();
    assert_eq!(rotated.dimensions(), (2, 4));
}

#[test]
fn rotate90_maps_corners() {
    let src = numbered_buffer(5, 3);
    let rotated = rotate90(&src).unwrap();
    let (w, h) = src.dimensions();

    // (0, 0) -> (h - 1, 0), (w - 1, 0) -> (h - 1, w - 1)
    assert_eq!(rotated[(h - 1, 0)], src[(0, 0)]);
    assert_eq!(rotated[(h - 1, w - 1)], src[(w - 1, 0)]);
    // bottom row ends up in the first column
    assert_eq!(rotated[(0, 0)], src[(0, h - 1)]);
    assert_eq!(rotated[(0, w - 1)], src[(w - 1, h - 1)]);
}

#[test]
fn rotate90_scenario_4x2() {
    let src = test_buffer_4x2();
    println!("Source:");
    print_buffer(&src);

    let rotated = rotate90(&src).unwrap();
    println!("\nRotated:");
    print_buffer(&rotated);

    assert_eq!(rotated.dimensions(), (2, 4));
    assert_eq!(rotated[(0, 0)], src[(0, 1)]);

    for y in 0..2 {
        for x in 0..4 {
            assert_eq!(rotated[(1 - y, x)], src[(x, y)]);
        }
    }
}

#[test]
fn rotate90_of_single_row() {
    let src = numbered_buffer(3, 1);
    let rotated = rotate90(&src).unwrap();

    assert_eq!(rotated.dimensions(), (1, 3));
    assert_eq!(rotated.pixels(), src.pixels());
}

proptest! {
    #[test]
    fn rotate90_four_times_is_identity(src in arb_buffer()) {
        let mut rotated = src.clone();
        for _ in 0..4 {
            rotated = rotate90(&rotated).unwrap();
        }
        prop_assert_eq!(rotated, src);
    }

    #[test]
    fn rotate90_swaps_dimensions_for_any_buffer(src in arb_buffer()) {
        let rotated = rotate90(&src).unwrap();
        prop_assert_eq!(rotated.width(), src.height());
        prop_assert_eq!(rotated.height(), src.width());
    }

    #[test]
    fn rotate_arbitrary_only_copies_or_clears(
        src in arb_buffer(),
        degrees in -720.0f64..720.0,
    ) {
        let rotated = rotate_arbitrary(&src, degrees).unwrap();
        let theta = degrees * std::f64::consts::PI / 180.0;
        let (w, h) = (src.width() as f64, src.height() as f64);
        let expected_width = ((w * theta.cos()).abs() + (h * theta.sin()).abs()) as usize;
        let expected_height = ((w * theta.sin()).abs() + (h * theta.cos()).abs()) as usize;

        prop_assert_eq!(rotated.width(), expected_width.max(1));
        prop_assert_eq!(rotated.height(), expected_height.max(1));
        for pixel in rotated.pixels() {
            prop_assert!(*pixel == TRANSPARENT || src.pixels().contains(pixel));
        }
    }
}

// arbitrary angle

#[test]
fn rotate_by_zero_reproduces_source() {
    for (w, h) in [(1, 1), (4, 2), (5, 3), (6, 7)] {
        let src = numbered_buffer(w, h);
        let rotated = rotate_arbitrary(&src, 0.0).unwrap();

        assert_eq!(rotated, src);
        assert!(!rotated.pixels().contains(&TRANSPARENT));
    }
}

#[test]
fn rotate_by_ninety_swaps_dimensions() {
    // Pixel offsets may differ from rotate90 by one row or column at exact
    // right angles because of truncation; only the box has to match.
    let src = test_buffer_4x2();
    let quarter = rotate90(&src).unwrap();

    assert_eq!(
        rotate_arbitrary(&src, 90.0).unwrap().dimensions(),
        quarter.dimensions()
    );
    assert_eq!(rotate_arbitrary(&src, -90.0).unwrap().dimensions(), (2, 4));
    assert_eq!(rotate_arbitrary(&src, 450.0).unwrap().dimensions(), (2, 4));
}

#[test]
fn rotate_by_forty_five_pads_with_transparent_pixels() {
    let src = PixelBuffer::filled(10, 4, [200, 100, 50, 255]).unwrap();
    let rotated = rotate_arbitrary(&src, 45.0).unwrap();

    // |10 cos 45| + |4 sin 45| = 9.899...
    assert_eq!(rotated.dimensions(), (9, 9));
    assert!(rotated.pixels().contains(&TRANSPARENT));
    assert!(rotated.pixels().contains(&[200, 100, 50, 255]));
}

#[test]
fn rotate_by_default_angle_grows_the_box() {
    let src = numbered_buffer(8, 4);
    let rotated = Rotation::Arbitrary {
        degrees: DEFAULT_ANGLE_DEGREES,
    }
    .apply(&src)
    .unwrap();

    // |8 cos 110| + |4 sin 110| = 6.495..., |8 sin 110| + |4 cos 110| = 8.885...
    assert_eq!(rotated.dimensions(), (6, 8));
}

#[test]
fn rotate_single_pixel_keeps_nonzero_box() {
    let src = PixelBuffer::filled(1, 1, [1, 2, 3, 4]).unwrap();
    for degrees in [0.0, 30.0, 90.0, 180.0, 270.0, -45.0] {
        let rotated = rotate_arbitrary(&src, degrees).unwrap();
        assert!(rotated.width() >= 1 && rotated.height() >= 1);
    }
}

#[test]
fn quarter_rotation_delegates_to_rotate90() {
    let src = test_buffer_4x2();
    assert_eq!(Rotation::default(), Rotation::Quarter);
    assert_eq!(Rotation::Quarter.apply(&src).unwrap(), rotate90(&src).unwrap());
}

#[test]
fn non_finite_angle_is_rejected() {
    let src = numbered_buffer(4, 2);
    for degrees in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = rotate_arbitrary(&src, degrees).unwrap_err();
        assert!(matches!(err, BufferError::NonFiniteAngle { .. }));
        assert!(Rotation::Arbitrary { degrees }.apply(&src).is_err());
    }
}

// Source index sampled by each destination pixel of a 7x3 image, row by
// row, -1 for transparent. Offsets are truncated toward zero before the
// source center is added, e.g. at 45 degrees (0, 0) has xt = yt = -3, so
// orig_x = trunc(-4.24) + 3 = -1, which is outside.
const SAMPLES_7X3_45: [[i32; 7]; 7] = [
    [-1, 7, 1, -1, -1, -1, -1],
    [7, 8, 8, 2, -1, -1, -1],
    [15, 8, 9, 10, 3, -1, -1],
    [-1, 16, 10, 10, 10, 4, -1],
    [-1, -1, 17, 10, 11, 12, 5],
    [-1, -1, -1, 18, 12, 12, 13],
    [-1, -1, -1, -1, 19, 13, -1],
];

const SAMPLES_7X3_110: [[i32; 5]; 7] = [
    [-1, 15, 15, 7, 7],
    [-1, 16, 9, 8, 1],
    [-1, 17, 10, 9, 2],
    [17, 10, 10, 10, 3],
    [18, 11, 10, 3, -1],
    [19, 12, 11, 4, -1],
    [13, 13, 5, 5, -1],
];

#[test]
fn rotate_by_forty_five_samples_with_truncation() {
    let src = numbered_buffer(7, 3);
    let rotated = rotate_arbitrary(&src, 45.0).unwrap();

    assert_eq!(rotated.dimensions(), (7, 7));
    assert_samples(&src, &rotated, &SAMPLES_7X3_45);
}

#[test]
fn rotate_by_default_angle_samples_with_truncation() {
    let src = numbered_buffer(7, 3);
    let rotated = rotate_arbitrary(&src, DEFAULT_ANGLE_DEGREES).unwrap();

    assert_eq!(rotated.dimensions(), (5, 7));
    assert_samples(&src, &rotated, &SAMPLES_7X3_110);
}

// test helper functions

fn assert_samples<const W: usize>(src: &PixelBuffer, rotated: &PixelBuffer, expected: &[[i32; W]]) {
    for (y, row) in expected.iter().enumerate() {
        for (x, &index) in row.iter().enumerate() {
            let want = if index < 0 {
                TRANSPARENT
            } else {
                src.pixels()[index as usize]
            };
            assert_eq!(rotated[(x, y)], want, "pixel ({x}, {y})");
        }
    }
}

fn print_buffer(buffer: &PixelBuffer) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let [r, g, b, a] = buffer[(x, y)];
            print!("({:>3},{:>3},{:>3},{:>3}) ", r, g, b, a);
        }
        println!();
    }
}
