pub mod cli;
pub mod config;
pub mod conversion;
pub mod daemon;
pub mod domain;
pub mod error;
pub mod input;
pub mod platform;
pub mod utils;

#[cfg(test)]
mod tests;
