use crate::{convolution::output_shape, error::GenError};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::string::String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub image_height: usize,
    pub image_width: usize,
    pub kernel_height: usize,
    pub kernel_width: usize,
    /// exclusive upper bound of every generated pixel and kernel weight
    pub max_pixel_value: u16,
    #[serde(default)]
    pub seed: Option<u64>,
    pub output_dir: String,
    pub output_paths: OutputPaths,
    #[serde(default)]
    pub dma: DmaSettings,
}

/// file names of the artifacts, relative to `output_dir`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPaths {
    pub image: String,
    pub kernel: String,
    pub result: String,
    #[serde(default)]
    pub image_im2col: Option<String>,
    #[serde(default)]
    pub image_mem: Option<String>,
    #[serde(default)]
    pub image_dma: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DmaSettings {
    pub patches_per_burst: usize,
}

impl Default for DmaSettings {
    fn default() -> Self {
        DmaSettings {
            patches_per_burst: 8,
        }
    }
}

/// # Description
/// - the image and kernel sizes of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub image_height: usize,
    pub image_width: usize,
    pub kernel_height: usize,
    pub kernel_width: usize,
}

impl Dimensions {
    pub fn new(
        image_height: usize,
        image_width: usize,
        kernel_height: usize,
        kernel_width: usize,
    ) -> Self {
        Dimensions {
            image_height,
            image_width,
            kernel_height,
            kernel_width,
        }
    }

    /// `GenError::Dimension` if a side is zero
    pub fn check_positive(&self) -> Result<(), GenError> {
        if self.image_height == 0
            || self.image_width == 0
            || self.kernel_height == 0
            || self.kernel_width == 0
        {
            return Err(GenError::Dimension(format!(
                "sizes must be positive, got image {}x{} and kernel {}x{}",
                self.image_height, self.image_width, self.kernel_height, self.kernel_width
            )));
        }
        Ok(())
    }

    /// # Description
    /// - all sides must be positive and the kernel must fit in the image
    /// # Return
    /// - `GenError::Dimension` otherwise
    pub fn validate(&self) -> Result<(), GenError> {
        self.check_positive()?;
        if self.kernel_height > self.image_height || self.kernel_width > self.image_width {
            return Err(GenError::Dimension(format!(
                "kernel {}x{} is larger than image {}x{}",
                self.kernel_height, self.kernel_width, self.image_height, self.image_width
            )));
        }
        Ok(())
    }

    /// (out_h, out_w) of the valid convolution
    pub fn output_shape(&self) -> (usize, usize) {
        (
            self.image_height - self.kernel_height + 1,
            self.image_width - self.kernel_width + 1,
        )
    }
}

impl Settings {
    /// # Description
    /// - read the settings from a list of config files
    /// - later files override the keys of earlier ones
    /// # Example
    /// ```ignore
    /// let settings = Settings::new(vec![
    ///     "configs/default.toml".into(),
    ///     "configs/optional_configs/low_bit_depth.toml".into(),
    /// ])?;
    /// ```
    pub fn new(config_path: Vec<String>) -> Result<Self, GenError> {
        let mut s = Config::builder();
        for i in config_path {
            s = s.add_source(File::with_name(&i));
        }
        let settings: Settings = s.build()?.try_deserialize()?;
        Ok(settings)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.image_height,
            self.image_width,
            self.kernel_height,
            self.kernel_width,
        )
    }

    /// # Description
    /// - zero sizes and a bad value range are `GenError::Dimension`
    /// - a kernel larger than the image is `GenError::InvalidKernelSize`,
    ///   the same error the convolution itself would raise
    pub fn validate(&self) -> Result<(), GenError> {
        let dims = self.dimensions();
        dims.check_positive()?;
        output_shape(
            (dims.image_height, dims.image_width),
            (dims.kernel_height, dims.kernel_width),
        )?;
        if self.max_pixel_value == 0 || self.max_pixel_value > 256 {
            return Err(GenError::Dimension(format!(
                "max_pixel_value must be in 1..=256, got {}",
                self.max_pixel_value
            )));
        }
        if self.dma.patches_per_burst == 0 {
            return Err(GenError::Dimension(
                "dma.patches_per_burst must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.output_dir).join(file_name)
    }
}
