pub mod analysis;
pub mod config;
pub mod dataset;
pub mod display;
pub mod error;
pub mod report;
pub mod standards;
