//! the crate conv_testgen generates test vectors for a convolution accelerator.
//! a random image and kernel are convolved in software, the image is also
//! rearranged into im2col order for the systolic array, and everything is
//! written as BRAM initialization files.
//!
//! - generator: the seeded random image and kernel.
//! - convolution: the valid 2D convolution, the reference result.
//! - im2col: the window-per-column layout and the dma burst order.
//! - serializer: the coe and mem encoders and the atomic artifact batch.
//! - pipeline: one full run driven by the settings.
//!

pub mod cmd_args;
pub mod convolution;
pub mod error;
pub mod gen_result;
pub mod generator;
pub mod im2col;
pub mod matrix;
pub mod pipeline;
pub mod serializer;
pub mod settings;

pub use error::GenError;
pub use gen_result::{GenerationResult, GenerationStatistics};
pub use generator::InputGenerator;
pub use matrix::Matrix;
pub use pipeline::Pipeline;
