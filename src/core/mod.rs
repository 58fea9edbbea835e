//! Core plugin logic — types, parsing, validation, planning, execution.

pub mod config;
pub mod executor;
pub mod parser;
pub mod planner;
pub mod types;
pub mod validate;
