use crate::settings::Settings;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct GenerationResult {
    pub settings: Option<Settings>,
    pub stats: Option<GenerationStatistics>,
}

impl GenerationResult {
    pub fn new() -> Self {
        GenerationResult {
            settings: None,
            stats: None,
        }
    }
}

impl Default for GenerationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// what one run produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationStatistics {
    pub seed: u64,
    pub image_shape: (usize, usize),
    pub kernel_shape: (usize, usize),
    pub output_shape: (usize, usize),
    /// (pixels per window, windows)
    pub im2col_shape: (usize, usize),
    pub mem_addresses: Option<usize>,
    pub dma_addresses: Option<usize>,
    pub files: Vec<String>,
    pub generation_time: String,
}

impl GenerationStatistics {
    pub fn new(seed: u64) -> Self {
        GenerationStatistics {
            seed,
            image_shape: (0, 0),
            kernel_shape: (0, 0),
            output_shape: (0, 0),
            im2col_shape: (0, 0),
            mem_addresses: None,
            dma_addresses: None,
            files: Vec::new(),
            generation_time: String::new(),
        }
    }
}

impl fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed:   {}", self.seed)?;
        writeln!(f, "image:  {}x{}", self.image_shape.0, self.image_shape.1)?;
        writeln!(f, "kernel: {}x{}", self.kernel_shape.0, self.kernel_shape.1)?;
        writeln!(f, "output: {}x{}", self.output_shape.0, self.output_shape.1)?;
        writeln!(
            f,
            "im2col: {}x{} ({} windows of {} pixels)",
            self.im2col_shape.0, self.im2col_shape.1, self.im2col_shape.1, self.im2col_shape.0
        )?;
        if let Some(addresses) = self.mem_addresses {
            writeln!(f, "mem addresses: {}", addresses)?;
        }
        if let Some(addresses) = self.dma_addresses {
            writeln!(f, "dma addresses: {}", addresses)?;
        }
        write!(f, "Generated {}", self.files.join(", "))
    }
}
