pub mod contrast;
pub mod generator;
pub mod sampler;

pub use contrast::ContrastEngine;
pub use generator::Generator;
pub use sampler::PayloadSampler;
