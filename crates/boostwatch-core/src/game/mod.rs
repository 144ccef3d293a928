mod frame;
mod math;
mod sampler;

pub use frame::*;
pub use math::*;
pub use sampler::*;
