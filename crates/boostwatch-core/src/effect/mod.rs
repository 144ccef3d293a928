mod bridge;
mod material;
mod trigger;

pub use bridge::*;
pub use material::*;
pub use trigger::*;
