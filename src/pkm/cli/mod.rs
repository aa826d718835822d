//! # CLI Layer
//!
//! One possible UI client for pkm. This is the only place that knows about
//! terminal I/O, argument parsing and exit codes.
//!
//! - `setup`: clap definitions
//! - `commands`: dispatch from parsed arguments to `PkmApi`
//! - `print`: turning a `CmdResult` into terminal output

mod commands;
mod print;
mod setup;

pub use commands::run;
