//! Blue-noise point generation.

mod density;
mod poisson;

pub use density::DensityField;
pub use poisson::{generate, PoissonDiskSampler, SamplingDomain, DEFAULT_ATTEMPTS};
