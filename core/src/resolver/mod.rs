mod normalize;
mod resolver;

pub use normalize::{normalize, split_raw_names};
pub use resolver::NameResolver;
