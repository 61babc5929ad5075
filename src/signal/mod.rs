mod coalescer;
mod signal_hub;
pub use coalescer::*;
pub use signal_hub::*;
