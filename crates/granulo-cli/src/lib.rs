//! # granulo-cli
//!
//! Command-line front end for Granulo:
//! - `gradation` computes the percent-passing table from a file or flags
//! - `classify` runs the threshold SUCS/AASHTO classifier
//! - `serve` starts the HTTP API
//! - `config` inspects and edits the service configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;
pub mod input;

pub use error::{Error, Result};
