//! Library half of the `gemma` binary: flag parsing, env overlay, run
//! orchestration and output. Split out so the whole run can be driven from
//! tests with a stub provider.
pub mod app;
pub mod cli;
pub mod config;
pub mod env;
pub mod output;
