//! Command-line interface for pomofocus.

pub mod args;
pub mod commands;
