mod builder;
mod engine;
pub use builder::*;
pub use engine::*;
