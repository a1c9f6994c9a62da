use crate::error::GenError;

/// # Description
/// - a dense 2D array stored in row-major order
/// - the image, the kernel, the output and the im2col matrix are all `Matrix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    /// # Description
    /// - build a matrix from row-major data
    /// # Return
    /// - `GenError::Dimension` if a side is zero or the data length does not match
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, GenError> {
        if rows == 0 || cols == 0 {
            return Err(GenError::Dimension(format!(
                "matrix sides must be positive, got {}x{}",
                rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(GenError::Dimension(format!(
                "{}x{} matrix needs {} elements, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, GenError> {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Matrix::new(rows, cols, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// the natural row-major flatten
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// # Description
    /// - copy the `height`x`width` block whose top-left corner is (`top`, `left`)
    pub fn window(
        &self,
        top: usize,
        left: usize,
        height: usize,
        width: usize,
    ) -> Result<Matrix<T>, GenError> {
        if top + height > self.rows || left + width > self.cols {
            return Err(GenError::Dimension(format!(
                "window {}x{} at ({}, {}) exceeds {}x{} matrix",
                height, width, top, left, self.rows, self.cols
            )));
        }
        Matrix::from_fn(height, width, |r, c| self.get(top + r, left + c))
    }

    /// iterate the elements column by column (the transpose of `as_slice`)
    pub fn iter_column_major(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.cols).flat_map(move |c| (0..self.rows).map(move |r| self.get(r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_size() {
        assert!(Matrix::new(2, 2, vec![1u8, 2, 3, 4]).is_ok());
        assert!(matches!(
            Matrix::new(2, 2, vec![1u8, 2, 3]),
            Err(GenError::Dimension(_))
        ));
        assert!(matches!(
            Matrix::<u8>::new(0, 2, vec![]),
            Err(GenError::Dimension(_))
        ));
    }

    #[test]
    fn test_window_and_order() {
        let m = Matrix::from_fn(3, 4, |r, c| (r * 4 + c) as u8).unwrap();
        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.row(1), &[4, 5, 6, 7]);
        let w = m.window(1, 2, 2, 2).unwrap();
        assert_eq!(w.as_slice(), &[6, 7, 10, 11]);
        assert!(m.window(2, 2, 2, 2).is_err());

        let col_major: Vec<u8> = m.iter_column_major().collect();
        assert_eq!(col_major, vec![0, 4, 8, 1, 5, 9, 2, 6, 10, 3, 7, 11]);
    }
}
