//! Generation pipeline for class diagrams
//!
//! The generator manages the flow of data through the class plugins:
//! Detector → Parser → Database → Emitter → Writer

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{
    write_sources, Database, Detector, EmitConfig, Emitter, GenerateError, GeneratedSource, Parser,
};
use crate::plugins::class::{ClassDatabase, ClassDetector, ClassParser, CSharpEmitter};

/// Pipeline that turns a document holding a class diagram into C# sources
///
/// Parse-level failures (no diagram, no classes) abort before anything is
/// emitted or written.
pub struct Generator {
    detector: ClassDetector,
    parser: ClassParser,
    emitter: CSharpEmitter,
}

impl Generator {
    /// Create a generator with the default output conventions
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    /// Create a generator for the given output conventions
    pub fn with_config(config: EmitConfig) -> Self {
        Self {
            detector: ClassDetector::new(),
            parser: ClassParser::with_types(config.types.clone()),
            emitter: CSharpEmitter::with_config(config),
        }
    }

    pub fn config(&self) -> &EmitConfig {
        self.emitter.config()
    }

    /// Find the diagram in `input` and parse it into a class database
    pub fn parse(&self, input: &str) -> Result<ClassDatabase> {
        let parse_span = span!(Level::INFO, "generator_parse", input_len = input.len());
        let _enter = parse_span.enter();

        let Some(body) = self.detector.extract(input) else {
            warn!("No class diagram found in input");
            return Err(GenerateError::NoDiagram.into());
        };
        debug!(body_len = body.len(), "Extracted diagram body");

        let mut database = ClassDatabase::with_types(self.parser.types().clone());
        self.parser.parse(&body, &mut database)?;

        if database.node_count() == 0 {
            warn!("Class diagram declares no classes");
            return Err(GenerateError::EmptyDiagram.into());
        }
        Ok(database)
    }

    /// Parse `input` and emit one source per class, in declaration order
    pub fn generate(&self, input: &str) -> Result<Vec<GeneratedSource>> {
        let generate_span = span!(Level::INFO, "generate", input_len = input.len());
        let _enter = generate_span.enter();

        let database = self.parse(input)?;
        let sources = self.emitter.emit(&database)?;

        info!(
            classes = database.class_count(),
            files = sources.len(),
            "Generation completed"
        );
        Ok(sources)
    }

    /// Generate sources and write them flat into `dir`
    pub fn generate_into(&self, input: &str, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let sources = self.generate(input)?;
        Ok(write_sources(dir, &sources)?)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
