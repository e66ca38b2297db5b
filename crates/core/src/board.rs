//! Board module - the locked-cell grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! colour of a locked block. Storage is a flat row-major vector sized once at
//! session start.
//! Coordinates: (x, y) where x runs left to right and y runs top to bottom.

use crate::types::{Cell, Rgba};

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_valid(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || y < 0 || x as i32 >= self.width as i32 || y as i32 >= self.height as i32
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Remove a row and shift every row above it down by one.
    /// Returns the number of rows removed (1 or 0).
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= self.height as usize {
            return 0;
        }

        let width = self.width as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        for cell in &mut self.cells[..width] {
            *cell = None;
        }

        1
    }

    /// Remove full rows until none is left and return how many were removed.
    ///
    /// Each pass scans top to bottom and removes the first full row found, so
    /// rows completed by an earlier shift are picked up as well.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        while let Some(y) = (0..self.height as usize).find(|&y| self.is_row_full(y)) {
            cleared += self.clear_row(y) as u32;
        }
        cleared
    }

    /// Write `cells` as locked blocks of `color`.
    /// Returns false, writing nothing, if any cell is out of bounds or occupied.
    pub fn lock_cells(&mut self, cells: &[(i16, i16)], color: Rgba) -> bool {
        if !cells.iter().all(|&(x, y)| self.is_valid(x, y)) {
            return false;
        }
        for &(x, y) in cells {
            self.set(x, y, Some(color));
        }
        true
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
