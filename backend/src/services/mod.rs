//! Analysis services for the AgriSense server

pub mod advisory;
pub mod catalog;
pub mod outbreak;
pub mod vegetation;
