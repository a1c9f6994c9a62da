//! # Description
//! - one generation run: inputs -> convolution -> im2col -> artifacts
//! - every artifact is staged first and committed together, a failing stage
//!   leaves no artifact behind

use log::info;
use std::fs;

use crate::{
    convolution::convolve_valid,
    error::GenError,
    gen_result::GenerationStatistics,
    generator::InputGenerator,
    im2col::im2col,
    serializer::{coe, mem, ArtifactBatch},
    settings::Settings,
};

#[derive(Debug)]
pub struct Pipeline {
    settings: Settings,
}

impl Pipeline {
    /// the settings are validated once here
    pub fn new(settings: Settings) -> Result<Self, GenError> {
        settings.validate()?;
        Ok(Pipeline { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// # Description
    /// - draw the image and kernel from `generator`, compute the output and the
    ///   im2col matrix, then write every configured artifact
    /// # Return
    /// - the statistics of the run, `generation_time` is left to the caller
    pub fn run(&self, generator: &mut InputGenerator) -> Result<GenerationStatistics, GenError> {
        let settings = &self.settings;
        let dims = settings.dimensions();
        let mut stat = GenerationStatistics::new(generator.seed());

        info!(
            "generating {}x{} image and {}x{} kernel, seed {}",
            dims.image_height,
            dims.image_width,
            dims.kernel_height,
            dims.kernel_width,
            generator.seed()
        );
        let (image, kernel) = generator.generate(&dims, settings.max_pixel_value)?;
        let output = convolve_valid(&image, &kernel)?;
        let cols = im2col(&image, dims.kernel_height, dims.kernel_width)?;
        info!(
            "output {:?}, im2col {:?}",
            output.shape(),
            cols.matrix().shape()
        );

        stat.image_shape = image.shape();
        stat.kernel_shape = kernel.shape();
        stat.output_shape = output.shape();
        stat.im2col_shape = cols.matrix().shape();

        fs::create_dir_all(&settings.output_dir)?;
        let paths = &settings.output_paths;
        let mut batch = ArtifactBatch::new();

        batch.stage(&settings.output_path(&paths.image), |w| {
            Ok(coe::write_coe(w, image.as_slice())?)
        })?;
        batch.stage(&settings.output_path(&paths.kernel), |w| {
            Ok(coe::write_coe(w, kernel.as_slice())?)
        })?;
        batch.stage(&settings.output_path(&paths.result), |w| {
            Ok(coe::write_coe(w, output.as_slice())?)
        })?;
        if let Some(name) = &paths.image_im2col {
            batch.stage(&settings.output_path(name), |w| {
                Ok(coe::write_im2col_coe(w, &cols)?)
            })?;
        }
        stat.mem_addresses = paths
            .image_mem
            .as_ref()
            .map(|name| {
                batch.stage(&settings.output_path(name), |w| {
                    mem::write_im2col_mem(w, &cols)
                })
            })
            .transpose()?;
        stat.dma_addresses = paths
            .image_dma
            .as_ref()
            .map(|name| {
                batch.stage(&settings.output_path(name), |w| {
                    mem::write_dma_mem(w, &cols, settings.dma.patches_per_burst)
                })
            })
            .transpose()?;

        let files = batch.commit()?;
        info!("wrote {} artifacts to {}", files.len(), settings.output_dir);
        stat.files = files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        Ok(stat)
    }
}
