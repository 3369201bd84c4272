//! Core emitter trait for generated source output
//!
//! This trait defines the interface for turning diagram data into
//! source code for a target language.

use anyhow::Result;

use super::Database;

/// Core trait for code emitters
///
/// This trait represents the output layer that serializes a parsed diagram
/// into source files. Each target language has its own emitter; output must
/// be deterministic for the same database.
///
/// # Example
/// ```
/// use classforge::core::{Emitter, Parser};
/// use classforge::plugins::class::{ClassDatabase, ClassParser, CSharpEmitter};
///
/// let mut db = ClassDatabase::new();
/// ClassParser::new().parse("class Player {\n}", &mut db).unwrap();
/// let sources = CSharpEmitter::new().emit(&db).unwrap();
/// assert_eq!(sources[0].file_name, "Player.cs");
/// ```
pub trait Emitter<D: Database>: Send + Sync {
    /// The output type of this emitter
    type Output;

    /// Emit source code for every node in the database
    fn emit(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this emitter
    fn name(&self) -> &'static str;

    /// Get the version of this emitter
    fn version(&self) -> &'static str;

    /// Get the target language
    fn language(&self) -> &'static str;
}
