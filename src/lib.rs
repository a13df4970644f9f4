pub mod cli;
pub mod config;
pub mod pricing;
pub mod utils;
