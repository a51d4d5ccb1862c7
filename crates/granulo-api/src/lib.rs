//! # granulo-api
//!
//! HTTP API server for Granulo.
//!
//! This crate provides the HTTP surface over `granulo-core`:
//! - `POST /calcular` threshold classification from Atterberg limits
//! - `POST /gradation` sieve-analysis table, mass balance and fines split
//! - `GET /sieves/standard` the default sieve stack
//! - `GET /health` liveness
//!
//! Every failure is answered with a structured JSON body naming the
//! offending field where there is one.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod payload;
pub mod routes;
pub mod server;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use routes::router;
pub use server::Server;
