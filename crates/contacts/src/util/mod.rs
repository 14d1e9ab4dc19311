pub mod input;
pub mod signal;
