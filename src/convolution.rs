use itertools::iproduct;
use log::debug;

use crate::{error::GenError, matrix::Matrix};

/// # Description
/// - the output shape of a valid (no padding, stride 1) convolution
/// # Return
/// - (out_h, out_w)
/// - `GenError::InvalidKernelSize` if the kernel is larger than the image on any axis
pub fn output_shape(
    image: (usize, usize),
    kernel: (usize, usize),
) -> Result<(usize, usize), GenError> {
    if kernel.0 == 0 || kernel.1 == 0 || kernel.0 > image.0 || kernel.1 > image.1 {
        return Err(GenError::InvalidKernelSize { image, kernel });
    }
    Ok((image.0 - kernel.0 + 1, image.1 - kernel.1 + 1))
}

/// # Description
/// - valid convolution of `image` with `kernel`, without flipping the kernel
/// - `out[i][j] = sum(image[i + a][j + b] * kernel[a][b])`
/// - the sums are held in u32, so the kernel area is limited to what
///   `area * 255 * 255` allows
///
/// # Example
/// ```
/// use conv_testgen::{convolution::convolve_valid, matrix::Matrix};
/// let image = Matrix::from_fn(4, 4, |r, c| (r * 4 + c) as u8).unwrap();
/// let kernel = Matrix::new(2, 2, vec![1u8; 4]).unwrap();
/// let out = convolve_valid(&image, &kernel).unwrap();
/// assert_eq!(out.shape(), (3, 3));
/// assert_eq!(out.get(0, 0), 0 + 1 + 4 + 5);
/// ```
pub fn convolve_valid(image: &Matrix<u8>, kernel: &Matrix<u8>) -> Result<Matrix<u32>, GenError> {
    let (out_h, out_w) = output_shape(image.shape(), kernel.shape())?;
    let (kh, kw) = kernel.shape();

    let worst_case = (kh as u64) * (kw as u64) * 255 * 255;
    if worst_case > u32::MAX as u64 {
        return Err(GenError::InvalidKernelSize {
            image: image.shape(),
            kernel: kernel.shape(),
        });
    }

    debug!(
        "convolving {:?} image with {:?} kernel into {}x{}",
        image.shape(),
        kernel.shape(),
        out_h,
        out_w
    );
    Matrix::from_fn(out_h, out_w, |i, j| {
        iproduct!(0..kh, 0..kw)
            .map(|(a, b)| image.get(i + a, j + b) as u32 * kernel.get(a, b) as u32)
            .sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_image_ones_kernel() {
        let image = Matrix::from_fn(4, 4, |r, c| (r * 4 + c) as u8).unwrap();
        let kernel = Matrix::new(2, 2, vec![1u8; 4]).unwrap();
        let out = convolve_valid(&image, &kernel).unwrap();
        assert_eq!(out.shape(), (3, 3));
        assert_eq!(
            out.get(0, 0),
            (image.get(0, 0) + image.get(0, 1) + image.get(1, 0) + image.get(1, 1)) as u32
        );
        // each 2x2 window of a sequential 4x4 image sums to 4*top_left + 10
        for (i, j) in iproduct!(0..3, 0..3) {
            assert_eq!(out.get(i, j), 4 * (i * 4 + j) as u32 + 10);
        }
    }

    #[test]
    fn test_no_kernel_flip() {
        // a kernel picking only its top-left element copies the image
        let image = Matrix::from_fn(3, 3, |r, c| (r * 3 + c + 1) as u8).unwrap();
        let kernel = Matrix::new(2, 2, vec![1u8, 0, 0, 0]).unwrap();
        let out = convolve_valid(&image, &kernel).unwrap();
        assert_eq!(out.as_slice(), &[1, 2, 4, 5]);
    }

    #[test]
    fn test_no_overflow() {
        let image = Matrix::new(8, 8, vec![255u8; 64]).unwrap();
        let kernel = Matrix::new(8, 8, vec![255u8; 64]).unwrap();
        let out = convolve_valid(&image, &kernel).unwrap();
        assert_eq!(out.as_slice(), &[64 * 255 * 255]);
    }

    #[test]
    fn test_full_size_kernel() {
        let image = Matrix::from_fn(5, 3, |r, c| (r + c) as u8).unwrap();
        let kernel = Matrix::new(5, 3, vec![2u8; 15]).unwrap();
        let out = convolve_valid(&image, &kernel).unwrap();
        assert_eq!(out.shape(), (1, 1));
        let expected: u32 = image.as_slice().iter().map(|&v| 2 * v as u32).sum();
        assert_eq!(out.get(0, 0), expected);
    }

    #[test]
    fn test_kernel_too_large() {
        let image = Matrix::new(3, 3, vec![0u8; 9]).unwrap();
        let kernel = Matrix::new(4, 1, vec![0u8; 4]).unwrap();
        assert!(matches!(
            convolve_valid(&image, &kernel),
            Err(GenError::InvalidKernelSize { .. })
        ));
        let kernel = Matrix::new(1, 4, vec![0u8; 4]).unwrap();
        assert!(matches!(
            convolve_valid(&image, &kernel),
            Err(GenError::InvalidKernelSize { .. })
        ));
    }

    #[test]
    fn test_kernel_area_beyond_u32() {
        // 258 * 258 * 255 * 255 > u32::MAX
        let image = Matrix::new(258, 258, vec![0u8; 258 * 258]).unwrap();
        let kernel = Matrix::new(258, 258, vec![0u8; 258 * 258]).unwrap();
        assert!(matches!(
            convolve_valid(&image, &kernel),
            Err(GenError::InvalidKernelSize { .. })
        ));
    }
}
