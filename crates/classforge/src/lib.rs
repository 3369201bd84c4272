//! Classforge - Generate C# classes from Mermaid.js class diagrams
//!
//! A library for parsing Mermaid.js class diagram syntax, either raw or
//! embedded in a Markdown document, and emitting one C# source file per
//! class.
//!
//! # Quick Start
//!
//! ```rust
//! use classforge::generate;
//!
//! let input = "classDiagram\nclass Player {\n+int health\n+Jump()\n}";
//! let sources = generate(input).unwrap();
//! assert_eq!(sources[0].file_name, "Player.cs");
//! assert!(sources[0].contents.contains("public int health;"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use classforge::prelude::*;
//!
//! let input = "class Animal {\n}\nclass Dog {\n}\nDog --|> Animal";
//!
//! // Parse into a database
//! let parser = ClassParser::new();
//! let mut database = ClassDatabase::new();
//! parser.parse(input, &mut database).unwrap();
//!
//! // Access the parsed data
//! assert_eq!(database.node_count(), 2);
//! let dog = database.get_class("Dog").unwrap();
//! assert_eq!(dog.base_class_name.as_deref(), Some("Animal"));
//!
//! // Emit C# sources
//! let config = EmitConfig::default().with_namespace("Zoo");
//! let sources = CSharpEmitter::with_config(config).emit(&database).unwrap();
//! assert!(sources[1].contents.contains("public class Dog : Animal"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        write_sources, Database, Detector, EmitConfig, Emitter, GenerateError, GeneratedSource,
        Parser, TypeMap,
    };
    pub use crate::plugins::class::{
        AttributeModel, CSharpEmitter, ClassDatabase, ClassDetector, ClassModel, ClassParser,
        MethodModel, Multiplicity, Parameter, ParseStats,
    };
    pub use crate::plugins::generator::Generator;
}

/// Parse a class diagram body into class models
///
/// The body is the diagram text without any Markdown around it. A body
/// declaring no classes yields an empty database rather than an error.
///
/// # Example
/// ```rust
/// use classforge::parse;
///
/// let db = parse("class Order {\n+float total\n}").unwrap();
/// assert_eq!(db.classes()[0].attributes[0].name, "total");
/// ```
pub fn parse(body: &str) -> anyhow::Result<plugins::class::ClassDatabase> {
    use crate::core::Parser as _;
    use crate::plugins::class::{ClassDatabase, ClassParser};

    let mut database = ClassDatabase::new();
    ClassParser::new().parse(body, &mut database)?;
    Ok(database)
}

/// Generate C# sources from a Markdown document or raw class diagram
///
/// Uses the default output conventions (`UAct.Generated` namespace, tab
/// indentation). Fails if no class diagram is found or it declares no
/// classes.
///
/// # Example
/// ```rust
/// use classforge::generate;
///
/// let doc = "# Design\n```mermaid\nclassDiagram\nclass Item {\n}\n```\n";
/// let sources = generate(doc).unwrap();
/// assert!(sources[0].contents.contains("namespace UAct.Generated"));
/// ```
pub fn generate(input: &str) -> anyhow::Result<Vec<core::GeneratedSource>> {
    plugins::generator::Generator::new().generate(input)
}
