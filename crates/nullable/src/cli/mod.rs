//! Command implementations for the nullable CLI.

pub mod config;
pub mod convert;
pub mod error;
pub mod literal;
pub mod output;
