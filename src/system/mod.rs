pub mod platform;
pub mod sampler;
