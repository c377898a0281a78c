//! Glyph tables for the "PIXAR" lettering
//!
//! Coordinates are in scene units on the `z = 0` plane. Letters are 8 units
//! tall, sitting on `y = 0`, centred on `x = 0`.

/// Straight strokes as `[x0, y0, x1, y1]`.
///
/// The bowls of P and R are not here; see [`ARC_CENTERS`].
pub const LETTER_STROKES: [[f32; 4]; 15] = [
    // P: stem, bowl top and bottom bars
    [-13.0, 0.0, -13.0, 8.0],
    [-13.0, 4.0, -11.0, 4.0],
    [-13.0, 8.0, -11.0, 8.0],
    // I: foot serif, stem, head serif
    [-7.0, 0.0, -5.0, 0.0],
    [-6.0, 0.0, -6.0, 8.0],
    [-7.0, 8.0, -5.0, 8.0],
    // X: both diagonals
    [-3.0, 0.0, 1.0, 8.0],
    [-3.0, 8.0, 1.0, 0.0],
    // A: left leg, right leg, crossbar
    [3.0, 0.0, 5.0, 8.0],
    [5.0, 8.0, 7.0, 0.0],
    [4.0, 4.0, 6.0, 4.0],
    // R: stem, bowl bottom and top bars, leg
    [9.0, 0.0, 9.0, 8.0],
    [9.0, 4.0, 11.0, 4.0],
    [9.0, 8.0, 11.0, 8.0],
    [10.0, 4.0, 13.0, 0.0],
];

/// Centres of the half-circle bowls of P and R, as `[x, y]`.
pub const ARC_CENTERS: [[f32; 2]; 2] = [[-11.0, 6.0], [11.0, 6.0]];

/// Radius of the bowls; spans the 4-unit gap between the bowl bars.
pub const ARC_RADIUS: f32 = 2.0;
