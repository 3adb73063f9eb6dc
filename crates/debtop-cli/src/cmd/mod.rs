//! Command implementations

pub mod top;
