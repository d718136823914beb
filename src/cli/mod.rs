//! CLI module - command-line interface and REPL

pub mod commands;
pub mod remote;
pub mod repl;

pub use repl::Repl;
