pub mod app;
pub mod args;

pub use app::{EXIT_ERROR, run};
pub use args::Cli;
