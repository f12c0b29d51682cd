pub mod interpolate;
pub mod outline;
pub mod sampler;
