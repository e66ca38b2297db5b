//! Shape module - polyomino occupancy matrices
//!
//! A [`Shape`] is a rectangular boolean matrix cropped to its minimal bounding
//! box. Rows run top to bottom, columns left to right. Shapes are immutable:
//! rotation and generation always build a new one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reasons a matrix cannot become a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// No rows, no columns, or no occupied cell.
    Empty,
    /// Rows have different lengths.
    Ragged,
    /// An outer row or column is entirely empty.
    NotTight,
}

impl ShapeError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeError::Empty => "shape has no occupied cell",
            ShapeError::Ragged => "shape rows have different lengths",
            ShapeError::NotTight => "shape has an empty border row or column",
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ShapeError {}

/// One polyomino in a fixed orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct Shape {
    rows: usize,
    cols: usize,
    /// Row-major occupancy (row * cols + col)
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from rows of `0`/`1` values.
    ///
    /// The matrix must be rectangular and already tight.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }

        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::Ragged);
            }
            cells.extend(row.iter().map(|&v| v != 0));
        }

        let shape = Self::from_parts(height, width, cells);
        if shape.cell_count() == 0 {
            return Err(ShapeError::Empty);
        }
        if !shape.is_tight() {
            return Err(ShapeError::NotTight);
        }
        Ok(shape)
    }

    /// Crop a working matrix to its minimal bounding box.
    ///
    /// Returns `None` when no cell is occupied.
    pub fn crop_from(rows: usize, cols: usize, cells: &[bool]) -> Option<Self> {
        debug_assert_eq!(cells.len(), rows * cols);
        let occupied = |r: usize, c: usize| cells[r * cols + c];

        let row_used = |r: usize| (0..cols).any(|c| occupied(r, c));
        let col_used = |c: usize| (0..rows).any(|r| occupied(r, c));

        let top = (0..rows).find(|&r| row_used(r))?;
        let bottom = (0..rows).rev().find(|&r| row_used(r))?;
        let left = (0..cols).find(|&c| col_used(c))?;
        let right = (0..cols).rev().find(|&c| col_used(c))?;

        let height = bottom - top + 1;
        let width = right - left + 1;
        let mut out = Vec::with_capacity(height * width);
        for r in top..=bottom {
            for c in left..=right {
                out.push(occupied(r, c));
            }
        }
        Some(Self::from_parts(height, width, out))
    }

    /// Assemble without validation; callers guarantee tightness.
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    /// Number of rows (bounding-box height)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (bounding-box width)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at (row, col) is occupied; false outside the box.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells as `(x, y)` = `(col, row)` offsets from the top-left.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(move |(i, _)| (i % self.cols, i / self.cols))
    }

    /// Whether this shape equals the given `0`/`1` rows exactly.
    pub fn matches_rows<R: AsRef<[u8]>>(&self, rows: &[R]) -> bool {
        rows.len() == self.rows
            && rows.iter().enumerate().all(|(r, row)| {
                let row = row.as_ref();
                row.len() == self.cols
                    && row
                        .iter()
                        .enumerate()
                        .all(|(c, &v)| (v != 0) == self.get(r, c))
            })
    }

    /// Rows of `0`/`1` values.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }

    fn is_tight(&self) -> bool {
        let last_row = self.rows - 1;
        let last_col = self.cols - 1;
        (0..self.cols).any(|c| self.get(0, c))
            && (0..self.cols).any(|c| self.get(last_row, c))
            && (0..self.rows).any(|r| self.get(r, 0))
            && (0..self.rows).any(|r| self.get(r, last_col))
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape.to_rows()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Shape::from_rows(&rows)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.cols).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_loose_matrices() {
        assert_eq!(Shape::from_rows::<[u8; 0]>(&[]), Err(ShapeError::Empty));
        assert_eq!(Shape::from_rows(&[[0, 0]]), Err(ShapeError::Empty));
        assert_eq!(
            Shape::from_rows(&[vec![1u8, 1], vec![1]]),
            Err(ShapeError::Ragged)
        );
        assert_eq!(
            Shape::from_rows(&[[1, 0], [1, 0]]),
            Err(ShapeError::NotTight)
        );
    }

    #[test]
    fn crop_removes_every_empty_border() {
        #[rustfmt::skip]
        let work = [
            false, false, false,
            false, true,  false,
            false, true,  true,
            false, false, false,
        ];
        let shape = Shape::crop_from(4, 3, &work).unwrap();
        assert_eq!(shape.rows(), 2);
        assert_eq!(shape.cols(), 2);
        assert!(shape.matches_rows(&[[1, 0], [1, 1]]));
        assert!(Shape::crop_from(2, 2, &[false; 4]).is_none());
    }

    #[test]
    fn occupied_yields_col_row_pairs() {
        let shape = Shape::from_rows(&[[0, 1], [1, 1]]).unwrap();
        let cells: Vec<_> = shape.occupied().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1)]);
        assert_eq!(shape.cell_count(), 3);
    }

    #[test]
    fn display_draws_hash_grid() {
        let shape = Shape::from_rows(&[[1, 1, 1], [0, 1, 0]]).unwrap();
        assert_eq!(shape.to_string(), "###\n.#.");
    }

    #[test]
    fn serializes_as_nested_rows() {
        let shape = Shape::from_rows(&[[1, 0], [1, 1]]).unwrap();
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, "[[1,0],[1,1]]");
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
        assert!(serde_json::from_str::<Shape>("[[0,0],[1,1]]").is_err());
    }
}
