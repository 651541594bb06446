pub mod sampler;

pub use sampler::{linspace, tabulated};
