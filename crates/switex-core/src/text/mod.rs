pub mod convert;
pub mod detect;
pub mod mapping;
pub(crate) mod tables;
