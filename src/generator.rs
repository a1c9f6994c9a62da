use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{error::GenError, matrix::Matrix, settings::Dimensions};

/// # Description
/// - produce the random image and kernel of a run
/// - the random source is owned here and explicitly seeded, so the same seed
///   always gives the same image and kernel
#[derive(Debug, Clone)]
pub struct InputGenerator {
    seed: u64,
    rng: StdRng,
}

impl InputGenerator {
    pub fn new(seed: u64) -> Self {
        InputGenerator {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// seed the generator from the os entropy source
    pub fn from_entropy() -> Self {
        let seed = rand::random::<u64>();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// # Description
    /// - draw a `rows`x`cols` matrix, every element uniform in [0, max_value)
    /// # Arguments
    /// - max_value: exclusive bound, 1..=256
    pub fn generate_matrix(
        &mut self,
        rows: usize,
        cols: usize,
        max_value: u16,
    ) -> Result<Matrix<u8>, GenError> {
        if max_value == 0 || max_value > 256 {
            return Err(GenError::Dimension(format!(
                "max value must be in 1..=256, got {}",
                max_value
            )));
        }
        if rows == 0 || cols == 0 {
            return Err(GenError::Dimension(format!(
                "cannot generate a {}x{} matrix",
                rows, cols
            )));
        }
        let step = Uniform::new(0u16, max_value);
        let values = step
            .sample_iter(&mut self.rng)
            .take(rows * cols)
            .map(|v| v as u8)
            .collect();
        Matrix::new(rows, cols, values)
    }

    /// # Description
    /// - generate the image then the kernel
    /// # Return
    /// - (image, kernel)
    /// - `GenError::Dimension` if a size is zero or the kernel is larger than the image
    pub fn generate(
        &mut self,
        dims: &Dimensions,
        max_value: u16,
    ) -> Result<(Matrix<u8>, Matrix<u8>), GenError> {
        dims.validate()?;
        let image = self.generate_matrix(dims.image_height, dims.image_width, max_value)?;
        let kernel = self.generate_matrix(dims.kernel_height, dims.kernel_width, max_value)?;
        debug!(
            "generated image {:?} and kernel {:?} with values in [0, {})",
            image.shape(),
            kernel.shape(),
            max_value
        );
        Ok((image, kernel))
    }
}
