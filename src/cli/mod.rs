//! Command-line facing workflow, kept independent of argument parsing.

pub mod orchestration;
