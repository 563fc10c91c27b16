//! Single-image inference pipeline.

mod runner;

pub use runner::{Config, Pipeline, Report};
