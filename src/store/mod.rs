mod sample_store;
mod sample_window;
pub use sample_store::*;
pub use sample_window::*;
