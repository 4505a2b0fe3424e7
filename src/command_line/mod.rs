//! Command-line front end: argument parsing, logging setup and reporting.
pub(crate) mod cli;
pub(crate) mod logging;
