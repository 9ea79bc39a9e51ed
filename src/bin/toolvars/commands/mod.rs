//! Command implementations

pub mod gate;
pub mod providers;
pub mod resolve;
