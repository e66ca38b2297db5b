//! Geometry module - shape rotation and rotation centering
//!
//! Rotation has no wall kicks. Instead the rotated shape is shifted so its
//! rounded centroid lands where the old centroid was, which keeps a piece from
//! pivoting around its top-left corner.

use crate::shape::Shape;

/// Rotate a shape by 90°.
///
/// Clockwise reverses the row order and transposes; counter-clockwise
/// transposes and reverses the row order. The result is `cols x rows` and stays
/// tight.
pub fn rotate(shape: &Shape, clockwise: bool) -> Shape {
    let rows = shape.rows();
    let cols = shape.cols();
    let mut cells = Vec::with_capacity(rows * cols);

    for r in 0..cols {
        for c in 0..rows {
            let occupied = if clockwise {
                shape.get(rows - 1 - c, r)
            } else {
                shape.get(c, cols - 1 - r)
            };
            cells.push(occupied);
        }
    }

    Shape::from_parts(cols, rows, cells)
}

/// All four orientations, starting with the shape itself and turning clockwise.
pub fn orientations(shape: &Shape) -> [Shape; 4] {
    let quarter = rotate(shape, true);
    let half = rotate(&quarter, true);
    let three_quarters = rotate(&half, true);
    [shape.clone(), quarter, half, three_quarters]
}

/// Rounded centroid `(x, y)` of the occupied cells.
///
/// Each component is the mean rounded half-up (2.5 becomes 3).
pub fn center_point(shape: &Shape) -> (i32, i32) {
    let mut sum_x = 0u64;
    let mut sum_y = 0u64;
    let mut count = 0u64;
    for (x, y) in shape.occupied() {
        sum_x += x as u64;
        sum_y += y as u64;
        count += 1;
    }
    if count == 0 {
        return (0, 0);
    }
    (
        round_half_up(sum_x, count) as i32,
        round_half_up(sum_y, count) as i32,
    )
}

/// Offset to add to the piece position after rotating `old` into `rotated`.
pub fn fix_rotation_position(old: &Shape, rotated: &Shape) -> (i32, i32) {
    let (old_x, old_y) = center_point(old);
    let (new_x, new_y) = center_point(rotated);
    (old_x - new_x, old_y - new_y)
}

/// `floor(sum / count + 0.5)` for non-negative values, in integers.
fn round_half_up(sum: u64, count: u64) -> u64 {
    (2 * sum + count) / (2 * count)
}
