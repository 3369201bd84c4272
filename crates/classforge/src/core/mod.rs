//! Core abstractions for diagram processing
//!
//! This module defines the traits every diagram type implements
//! (detector, parser, database, emitter) plus the shared configuration,
//! error and output types.

pub(crate) mod chumsky_utils;
mod database;
mod detector;
mod emitter;
mod error;
pub mod logging;
mod output;
mod parser;
mod types;

pub use database::*;
pub use detector::*;
pub use emitter::*;
pub use error::*;
pub use logging::*;
pub use output::*;
pub use parser::*;
pub use types::*;
