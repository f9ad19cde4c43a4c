//! Foundation types for modshell.
//!
//! This crate holds what every other modshell crate shares: the error
//! taxonomy surfaced on the console and the interpreter configuration.

pub mod config;
pub mod error;
