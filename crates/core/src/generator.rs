//! Generator module - random polyomino construction
//!
//! A shape is grown by a random walk on a working grid of `N` rows by
//! `ceil(N / 2)` columns, large enough to hold every polyomino of `N` cells in
//! at least one orientation. The walk may revisit cells; only newly entered
//! cells count towards `N`. The result is cropped to its bounding box.

use rand::Rng;

use crate::shape::Shape;

/// Grow a random polyomino of `size` cells.
///
/// `size` must be at least 1; 0 is treated as 1.
pub fn generate<R: Rng + ?Sized>(size: u8, rng: &mut R) -> Shape {
    let size = size.max(1) as usize;
    let rows = size;
    let cols = (size + 1) / 2;
    let mut grid = vec![false; rows * cols];

    let mut x = rng.gen_range(0..rows) as i32;
    let mut y = rng.gen_range(0..cols) as i32;
    grid[x as usize * cols + y as usize] = true;
    let mut filled = 1;

    while filled < size {
        let (nx, ny) = loop {
            let (nx, ny) = if rng.gen_bool(0.5) {
                (x + step(rng), y)
            } else {
                (x, y + step(rng))
            };
            if nx >= 0 && ny >= 0 && (nx as usize) < rows && (ny as usize) < cols {
                break (nx, ny);
            }
        };
        x = nx;
        y = ny;

        let cell = &mut grid[x as usize * cols + y as usize];
        if !*cell {
            *cell = true;
            filled += 1;
        }
    }

    // At least one cell is always set.
    Shape::crop_from(rows, cols, &grid).unwrap_or_else(|| Shape::from_parts(1, 1, vec![true]))
}

fn step<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    if rng.gen_bool(0.5) {
        1
    } else {
        -1
    }
}
