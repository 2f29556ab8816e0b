//! HTTP handlers for the AgriSense API

pub mod advisory;
pub mod catalog;
pub mod health;
pub mod outbreak;
pub mod vegetation;

pub use advisory::*;
pub use catalog::*;
pub use health::*;
pub use outbreak::*;
pub use vegetation::*;
