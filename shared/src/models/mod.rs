//! Domain models for the AgriSense analysis core

mod crop;
mod health;
mod irrigation;
mod outbreak;
mod risk;
mod spectral;
mod statistics;
mod threat;
mod trend;
mod weather;

pub use crop::*;
pub use health::*;
pub use irrigation::*;
pub use outbreak::*;
pub use risk::*;
pub use spectral::*;
pub use statistics::*;
pub use threat::*;
pub use trend::*;
pub use weather::*;
