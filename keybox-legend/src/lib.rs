pub mod context;
pub mod error;
pub mod handler;
pub mod sampler;
