pub mod clipboard;
pub mod controller;

pub use controller::{Direction, Mode, RoundTripController};
