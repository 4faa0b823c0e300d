/// Errors raised around the allocator: loading scenarios and running simulations
/// The allocation itself never fails

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllocatorError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("noise level must be a finite non-negative number, got {0}")]
    InvalidNoise(f64),

    #[error("invalid demand distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),
}
