//! Plugin implementations for diagram types
//!
//! Each plugin implements the core traits for its specific diagram type.
//! The generator wires them into a single pipeline.

pub mod class;
pub mod generator;

pub use class::*;
pub use generator::*;
