//! # Description
//! - restructure the image so that every convolution window becomes one column
//! - the systolic array streams the matrix one column (window) at a time
//!
//! # Layout
//! - column `i * out_w + j` holds the window whose top-left pixel is (i, j)
//! - row `a * kernel_w + b` of a column holds pixel (i + a, j + b)
//!
//! the hardware reads this layout literally, so the two index formulas above
//! must never change.

use itertools::iproduct;
use log::debug;

use crate::{convolution::output_shape, error::GenError, matrix::Matrix};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Im2colMatrix {
    matrix: Matrix<u8>,
    out_h: usize,
    out_w: usize,
    kernel_h: usize,
    kernel_w: usize,
}

/// # Description
/// - build the im2col matrix of `image` for a `kernel_h`x`kernel_w` window
/// # Return
/// - a (kernel_h * kernel_w) x (out_h * out_w) matrix
/// - `GenError::InvalidKernelSize` if the window does not fit in the image
pub fn im2col(
    image: &Matrix<u8>,
    kernel_h: usize,
    kernel_w: usize,
) -> Result<Im2colMatrix, GenError> {
    let (out_h, out_w) = output_shape(image.shape(), (kernel_h, kernel_w))?;
    let rows = kernel_h * kernel_w;
    let cols = out_h * out_w;

    let mut data = vec![0u8; rows * cols];
    for (i, j) in iproduct!(0..out_h, 0..out_w) {
        let window = i * out_w + j;
        for (a, b) in iproduct!(0..kernel_h, 0..kernel_w) {
            data[(a * kernel_w + b) * cols + window] = image.get(i + a, j + b);
        }
    }
    debug!("im2col: {} windows of {} pixels", cols, rows);

    Ok(Im2colMatrix {
        matrix: Matrix::new(rows, cols, data)?,
        out_h,
        out_w,
        kernel_h,
        kernel_w,
    })
}

impl Im2colMatrix {
    pub fn matrix(&self) -> &Matrix<u8> {
        &self.matrix
    }
    /// (out_h, out_w)
    pub fn output_shape(&self) -> (usize, usize) {
        (self.out_h, self.out_w)
    }
    pub fn kernel_shape(&self) -> (usize, usize) {
        (self.kernel_h, self.kernel_w)
    }
    pub fn window_count(&self) -> usize {
        self.matrix.cols()
    }
    pub fn pixels_per_window(&self) -> usize {
        self.matrix.rows()
    }

    pub fn window_index(&self, i: usize, j: usize) -> usize {
        i * self.out_w + j
    }

    /// the pixels of window `c`, in row-major kernel order
    pub fn column(&self, c: usize) -> Vec<u8> {
        (0..self.matrix.rows()).map(|r| self.matrix.get(r, c)).collect()
    }

    /// # Description
    /// - the window at output position (i, j), reshaped to kernel_h x kernel_w
    pub fn window(&self, i: usize, j: usize) -> Result<Matrix<u8>, GenError> {
        if i >= self.out_h || j >= self.out_w {
            return Err(GenError::Dimension(format!(
                "window ({}, {}) outside {}x{} output",
                i, j, self.out_h, self.out_w
            )));
        }
        Matrix::new(
            self.kernel_h,
            self.kernel_w,
            self.column(self.window_index(i, j)),
        )
    }

    /// every window's pixels back to back, windows in increasing index
    pub fn column_major(&self) -> Vec<u8> {
        self.matrix.iter_column_major().collect()
    }
}

/// # Description
/// - reorder the im2col matrix into the byte stream the board DMA sends
/// - windows are grouped into bursts of `patches_per_burst`, inside a burst
///   the stream is kernel position major: all windows' pixel k, then pixel k + 1
/// - every burst keeps `patches_per_burst` lanes per kernel position, the
///   lanes of the last burst past the final window are zero
///
/// # Example
/// ```ignore
/// // 2 pixels per window, 3 windows, bursts of 2
/// // cols = [[a0 a1 a2], [b0 b1 b2]]
/// // -> a0 a1 b0 b1 | a2 0 b2 0
/// ```
pub fn reorder_for_dma(
    cols: &Im2colMatrix,
    patches_per_burst: usize,
) -> Result<Vec<u8>, GenError> {
    if patches_per_burst == 0 {
        return Err(GenError::Dimension(
            "patches per burst must be positive".into(),
        ));
    }
    let m = cols.matrix();
    let pixels = m.rows();
    let windows = m.cols();
    let bursts = (windows + patches_per_burst - 1) / patches_per_burst;
    let mut buffer = Vec::with_capacity(bursts * pixels * patches_per_burst);

    for burst in 0..bursts {
        let start = burst * patches_per_burst;
        for (k, p) in iproduct!(0..pixels, 0..patches_per_burst) {
            let window = start + p;
            buffer.push(if window < windows { m.get(k, window) } else { 0 });
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::InputGenerator;

    #[test]
    fn test_small_layout() {
        // 3x3 image, 2x2 window -> 4 windows of 4 pixels
        let image = Matrix::from_fn(3, 3, |r, c| (r * 3 + c) as u8).unwrap();
        let cols = im2col(&image, 2, 2).unwrap();
        assert_eq!(cols.matrix().shape(), (4, 4));
        assert_eq!(cols.output_shape(), (2, 2));
        assert_eq!(cols.column(0), vec![0, 1, 3, 4]);
        assert_eq!(cols.column(1), vec![1, 2, 4, 5]);
        assert_eq!(cols.column(2), vec![3, 4, 6, 7]);
        assert_eq!(cols.column(3), vec![4, 5, 7, 8]);
        // row 0 is the top-left pixel of every window
        assert_eq!(cols.matrix().row(0), &[0, 1, 3, 4]);
        assert_eq!(
            cols.column_major(),
            vec![0, 1, 3, 4, 1, 2, 4, 5, 3, 4, 6, 7, 4, 5, 7, 8]
        );
    }

    #[test]
    fn test_windows_match_image() {
        let mut gen = InputGenerator::new(3);
        let image = gen.generate_matrix(9, 7, 255).unwrap();
        let cols = im2col(&image, 3, 2).unwrap();
        let (out_h, out_w) = cols.output_shape();
        assert_eq!((out_h, out_w), (7, 6));
        assert_eq!(cols.window_count(), 42);
        assert_eq!(cols.pixels_per_window(), 6);
        for (i, j) in iproduct!(0..out_h, 0..out_w) {
            assert_eq!(cols.window(i, j).unwrap(), image.window(i, j, 3, 2).unwrap());
        }
        assert!(cols.window(out_h, 0).is_err());
    }

    #[test]
    fn test_full_size_window() {
        let image = Matrix::from_fn(2, 3, |r, c| (10 * r + c) as u8).unwrap();
        let cols = im2col(&image, 2, 3).unwrap();
        assert_eq!(cols.matrix().shape(), (6, 1));
        assert_eq!(cols.column(0), image.as_slice().to_vec());
    }

    #[test]
    fn test_window_too_large() {
        let image = Matrix::new(2, 2, vec![0u8; 4]).unwrap();
        assert!(matches!(
            im2col(&image, 3, 1),
            Err(GenError::InvalidKernelSize { .. })
        ));
        assert!(matches!(
            im2col(&image, 1, 3),
            Err(GenError::InvalidKernelSize { .. })
        ));
    }

    #[test]
    fn test_reorder_for_dma() {
        // 1x4 image, 1x2 window -> 3 windows: [0 1] [1 2] [2 3]
        let image = Matrix::new(1, 4, vec![0u8, 1, 2, 3]).unwrap();
        let cols = im2col(&image, 1, 2).unwrap();
        let stream = reorder_for_dma(&cols, 2).unwrap();
        // burst 0: pixel 0 of windows 0,1 then pixel 1 of windows 0,1
        // burst 1: window 2 in lane 0 of each kernel position, lane 1 empty
        assert_eq!(stream, vec![0, 1, 1, 2, 2, 0, 3, 0]);

        // a single partial burst still spans 8 lanes per kernel position
        let stream = reorder_for_dma(&cols, 8).unwrap();
        assert_eq!(
            stream,
            vec![0, 1, 2, 0, 0, 0, 0, 0, 1, 2, 3, 0, 0, 0, 0, 0]
        );

        // bursts of one window are the column-major order
        let stream = reorder_for_dma(&cols, 1).unwrap();
        assert_eq!(stream, cols.column_major());

        assert!(reorder_for_dma(&cols, 0).is_err());
    }

    #[test]
    fn test_reorder_for_dma_board_layout() {
        // 28x28 image, 3x3 window: 676 windows, the last burst of 8 holds 4
        let mut gen = InputGenerator::new(28);
        let image = gen.generate_matrix(28, 28, 255).unwrap();
        let cols = im2col(&image, 3, 3).unwrap();
        let m = cols.matrix();
        let (k_len, windows, lanes) = (9, 676, 8);

        let full = windows / lanes;
        let rem = windows % lanes;
        assert_eq!((full, rem), (84, 4));
        let mut expected = vec![0u8; (full + 1) * k_len * lanes];
        for (w, k, p) in iproduct!(0..full, 0..k_len, 0..lanes) {
            expected[w * k_len * lanes + k * lanes + p] = m.get(k, w * lanes + p);
        }
        let base = full * k_len * lanes;
        for (k, p) in iproduct!(0..k_len, 0..rem) {
            expected[base + k * lanes + p] = m.get(k, full * lanes + p);
        }

        let stream = reorder_for_dma(&cols, lanes).unwrap();
        assert_eq!(stream.len(), 6120);
        assert_eq!(stream, expected);
        // unused lanes of the tail burst are zero
        assert!(stream[base + rem..base + lanes].iter().all(|&v| v == 0));
    }
}
