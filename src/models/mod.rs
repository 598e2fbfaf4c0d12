//! Display models for CLI output

pub mod display;
