use std::fmt;

/// # Description
/// - all the errors a generation run can raise
/// - none of them is recoverable, the run stops and no artifact is committed
#[derive(Debug)]
pub enum GenError {
    /// requested sizes are zero, inconsistent or out of range
    Dimension(String),
    /// the kernel does not fit in the image (or its sums do not fit in u32)
    InvalidKernelSize {
        image: (usize, usize),
        kernel: (usize, usize),
    },
    Io(std::io::Error),
    Config(config::ConfigError),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Dimension(msg) => write!(f, "dimension error: {}", msg),
            GenError::InvalidKernelSize { image, kernel } => write!(
                f,
                "invalid kernel size: kernel {}x{} cannot be applied to image {}x{}",
                kernel.0, kernel.1, image.0, image.1
            ),
            GenError::Io(e) => write!(f, "io error: {}", e),
            GenError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Io(e) => Some(e),
            GenError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenError {
    fn from(e: std::io::Error) -> Self {
        GenError::Io(e)
    }
}

impl From<config::ConfigError> for GenError {
    fn from(e: config::ConfigError) -> Self {
        GenError::Config(e)
    }
}
