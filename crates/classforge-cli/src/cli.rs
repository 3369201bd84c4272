//! Command-line interface for the classforge utility
//!
//! Provides a CLI to turn Mermaid.js class diagrams, raw or embedded in
//! Markdown design documents, into C# class files.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use classforge::core::logging::init_logging;
use classforge::plugins::class::{ClassDatabase, ClassModel, ParseStats};
use classforge::plugins::Generator;
use classforge::EmitConfig;
use tracing::{debug, info};

/// Classforge - Generate C# classes from Mermaid.js class diagrams
#[derive(Parser)]
#[command(name = "classforge")]
#[command(about = "A Rust utility to turn Mermaid.js class diagrams into C# classes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug-level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Cli {
    /// `--verbose` raises the level to at least debug
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            self.log_level.min(LogLevel::Debug)
        } else {
            self.log_level
        }
    }
}

/// Log level options, most verbose first
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one C# file per class
    Generate {
        /// Markdown document or diagram file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Destination directory
        #[arg(short, long)]
        output: PathBuf,

        /// Write straight into the destination instead of a folder named after the input
        #[arg(long)]
        flat: bool,

        /// Namespace for the generated classes
        #[arg(long)]
        namespace: Option<String>,

        /// JSON file with output conventions
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the generated sources without writing files
    Preview {
        /// Markdown document or diagram file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the preview (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace for the generated classes
        #[arg(long)]
        namespace: Option<String>,

        /// JSON file with output conventions
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the parsed class model
    Inspect {
        /// Markdown document or diagram file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check that the input holds a usable class diagram
    Validate {
        /// Markdown document or diagram file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Parsed model as printed by `inspect --json`
#[derive(Serialize)]
struct InspectReport<'a> {
    classes: &'a [ClassModel],
    stats: ParseStats,
}

/// Main CLI application
pub struct ClassforgeApp {
    config: EmitConfig,
}

impl ClassforgeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    /// Create a new application instance with base output conventions
    pub fn with_config(config: EmitConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("CLASSFORGE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.effective_log_level().as_str().to_string()));

        let log_format_str = std::env::var("CLASSFORGE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        debug!(version = env!("CARGO_PKG_VERSION"), "Classforge starting");

        match cli.command {
            Commands::Generate {
                input,
                output,
                flat,
                namespace,
                config,
            } => self.generate_command(input, output, flat, namespace, config),
            Commands::Preview {
                input,
                output,
                namespace,
                config,
            } => self.preview_command(input, output, namespace, config),
            Commands::Inspect { input, json } => self.inspect_command(input, json),
            Commands::Validate { input } => self.validate_command(input),
        }
    }

    /// Build a generator from the base config, a config file and flag overrides
    pub fn generator(
        &self,
        config_path: Option<&Path>,
        namespace: Option<String>,
    ) -> Result<Generator> {
        let mut config = match config_path {
            Some(path) => EmitConfig::from_json_file(path)?,
            None => self.config.clone(),
        };
        if let Some(namespace) = namespace {
            config = config.with_namespace(namespace);
        }
        Ok(Generator::with_config(config))
    }

    /// Handle the generate command
    pub fn generate_command(
        &self,
        input: Option<PathBuf>,
        output: PathBuf,
        flat: bool,
        namespace: Option<String>,
        config: Option<PathBuf>,
    ) -> Result<()> {
        let generator = self.generator(config.as_deref(), namespace)?;
        let destination = destination_dir(input.as_deref(), &output, flat);
        let content = self.read_input(input)?;

        debug!(bytes = content.len(), "Read input");

        let written = generator.generate_into(&content, &destination)?;

        for path in &written {
            println!("{}", path.display());
        }
        info!(
            files = written.len(),
            destination = %destination.display(),
            "Generated sources"
        );
        Ok(())
    }

    /// Handle the preview command
    fn preview_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        namespace: Option<String>,
        config: Option<PathBuf>,
    ) -> Result<()> {
        let generator = self.generator(config.as_deref(), namespace)?;
        let content = self.read_input(input)?;

        debug!(bytes = content.len(), "Read input");

        let sources = generator.generate(&content)?;
        let mut preview = String::new();
        for (index, source) in sources.iter().enumerate() {
            if index > 0 {
                preview.push('\n');
            }
            writeln!(preview, "// ==> {}", source.file_name)?;
            preview.push_str(&source.contents);
        }

        self.write_output(output, &preview)
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool) -> Result<()> {
        let content = self.read_input(input)?;

        debug!(bytes = content.len(), "Read input");

        let database = Generator::with_config(self.config.clone()).parse(&content)?;

        if json {
            let report = InspectReport {
                classes: database.classes(),
                stats: database.stats(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", describe(&database));
        }
        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>) -> Result<()> {
        let content = self.read_input(input)?;

        debug!(bytes = content.len(), "Read input");

        match Generator::with_config(self.config.clone()).parse(&content) {
            Ok(database) => {
                let stats = database.stats();
                println!("✓ Valid class diagram ({} classes)", database.class_count());
                if stats.dropped_relationships > 0 || stats.skipped_lines > 0 {
                    println!(
                        "  {} relationships dropped, {} lines skipped",
                        stats.dropped_relationships, stats.skipped_lines
                    );
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid class diagram: {}", e);
                Err(e)
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", content);
                if !content.is_empty() && !content.ends_with('\n') {
                    println!();
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ClassforgeApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Where generated files go: a folder named after the input file, unless
/// flat output was asked for or the input comes from stdin
pub fn destination_dir(input: Option<&Path>, output: &Path, flat: bool) -> PathBuf {
    let stem = input
        .filter(|path| path.to_string_lossy() != "-")
        .and_then(Path::file_stem);
    match stem {
        Some(stem) if !flat => output.join(stem),
        _ => output.to_path_buf(),
    }
}

/// Human-readable summary of a parsed diagram
fn describe(database: &ClassDatabase) -> String {
    let mut out = String::new();
    for class in database.classes() {
        match &class.base_class_name {
            Some(base) => out.push_str(&format!("{} : {}\n", class.name, base)),
            None => out.push_str(&format!("{}\n", class.name)),
        }
        for attribute in &class.attributes {
            match &attribute.initial_value {
                Some(value) => out.push_str(&format!(
                    "  {} {} = {}\n",
                    attribute.type_name, attribute.name, value
                )),
                None => out.push_str(&format!("  {} {}\n", attribute.type_name, attribute.name)),
            }
        }
        for method in &class.methods {
            let parameters: Vec<String> = method
                .parameters
                .iter()
                .map(|p| format!("{} {}", p.type_name, p.name))
                .collect();
            out.push_str(&format!(
                "  {} {}({})\n",
                method.return_type,
                method.name,
                parameters.join(", ")
            ));
        }
    }

    let stats = database.stats();
    out.push_str(&format!(
        "\n{} classes, {} relationships applied, {} dropped, {} lines skipped\n",
        database.class_count(),
        stats.applied_relationships,
        stats.dropped_relationships,
        stats.skipped_lines
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const DESIGN_DOC: &str = "# Combat\n\
        ```mermaid\n\
        classDiagram\n\
        class Unit {\n\
        +int hp = 10\n\
        +Attack(Unit target)\n\
        }\n\
        class Archer {\n\
        }\n\
        Archer --|> Unit\n\
        ```\n";

    #[test]
    fn test_cli_parsing_generate_command() {
        let args = vec![
            "classforge",
            "generate",
            "--input",
            "design.md",
            "--output",
            "Assets/Generated",
            "--namespace",
            "Game.Combat",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Generate {
                input,
                output,
                flat,
                namespace,
                config,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "design.md");
                assert_eq!(output.to_string_lossy(), "Assets/Generated");
                assert!(!flat);
                assert_eq!(namespace.as_deref(), Some("Game.Combat"));
                assert!(config.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_generate_requires_output() {
        let args = vec!["classforge", "generate", "--input", "design.md"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_inspect_command() {
        let args = vec!["classforge", "inspect", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Inspect { input, json } => {
                assert!(input.is_none());
                assert!(json);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let args = vec!["classforge", "validate", "-i", "-"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Validate { input } => {
                assert_eq!(input.unwrap().to_string_lossy(), "-");
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = vec![
            "classforge",
            "--verbose",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "validate",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let cli = Cli::try_parse_from(["classforge", "validate"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Warn);

        let cli = Cli::try_parse_from(["classforge", "-v", "validate"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Debug);

        let args = ["classforge", "-v", "--log-level", "trace", "validate"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Trace);
    }

    #[test]
    fn test_destination_dir() {
        let out = Path::new("out");
        assert_eq!(
            destination_dir(Some(Path::new("docs/combat.md")), out, false),
            PathBuf::from("out/combat")
        );
        assert_eq!(
            destination_dir(Some(Path::new("docs/combat.md")), out, true),
            PathBuf::from("out")
        );
        assert_eq!(destination_dir(Some(Path::new("-")), out, false), PathBuf::from("out"));
        assert_eq!(destination_dir(None, out, false), PathBuf::from("out"));
    }

    #[test]
    fn test_generate_command_writes_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("combat.md");
        fs::write(&input, DESIGN_DOC).unwrap();
        let output = dir.path().join("Generated");

        let app = ClassforgeApp::new();
        app.generate_command(Some(input), output.clone(), false, None, None)
            .unwrap();

        let unit = fs::read_to_string(output.join("combat").join("Unit.cs")).unwrap();
        assert!(unit.contains("public int hp = 10;"));
        assert!(unit.contains("public void Attack(Unit target)"));

        let archer = fs::read_to_string(output.join("combat").join("Archer.cs")).unwrap();
        assert!(archer.contains("public class Archer : Unit"));
    }

    #[test]
    fn test_generate_command_with_config_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("combat.md");
        fs::write(&input, DESIGN_DOC).unwrap();
        let config = dir.path().join("classforge.json");
        fs::write(&config, r#"{ "namespace": "Game.Combat", "indent": "    " }"#).unwrap();
        let output = dir.path().join("Generated");

        let app = ClassforgeApp::new();
        app.generate_command(Some(input), output.clone(), true, None, Some(config))
            .unwrap();

        let unit = fs::read_to_string(output.join("Unit.cs")).unwrap();
        assert!(unit.contains("namespace Game.Combat\n{\n    public class Unit\n"));
    }

    #[test]
    fn test_namespace_flag_overrides_config() {
        let app = ClassforgeApp::new();
        let generator = app.generator(None, Some("Override".to_string())).unwrap();
        assert_eq!(generator.config().namespace, "Override");
    }

    #[test]
    fn test_missing_config_file() {
        let app = ClassforgeApp::new();
        let result = app.generator(Some(Path::new("/nonexistent/classforge.json")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_command_without_diagram() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.md");
        fs::write(&input, "# Notes\n```mermaid\ngraph TD; A-->B\n```\n").unwrap();
        let output = dir.path().join("Generated");

        let app = ClassforgeApp::new();
        let result = app.generate_command(Some(input), output.clone(), false, None, None);

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_preview_command_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("combat.md");
        fs::write(&input, DESIGN_DOC).unwrap();
        let preview = dir.path().join("preview.txt");

        let app = ClassforgeApp::new();
        app.preview_command(Some(input), Some(preview.clone()), None, None)
            .unwrap();

        let content = fs::read_to_string(&preview).unwrap();
        assert!(content.starts_with("// ==> Unit.cs\n"));
        assert!(content.contains("\n// ==> Archer.cs\n"));
    }

    #[test]
    fn test_describe_database() {
        let database = Generator::new().parse(DESIGN_DOC).unwrap();
        let summary = describe(&database);
        assert!(summary.starts_with("Unit\n  int hp = 10\n  void Attack(Unit target)\n"));
        assert!(summary.contains("Archer : Unit\n"));
        assert!(summary.contains("2 classes, 1 relationships applied"));
    }

    #[test]
    fn test_inspect_report_json() {
        let database = Generator::new().parse(DESIGN_DOC).unwrap();
        let report = InspectReport {
            classes: database.classes(),
            stats: database.stats(),
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["classes"][1]["base_class_name"], "Unit");
        assert_eq!(json["stats"]["applied_relationships"], 1);
    }

    #[test]
    fn test_read_input_from_file() {
        let app = ClassforgeApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("design.md");
        fs::write(&file_path, DESIGN_DOC).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, DESIGN_DOC);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = ClassforgeApp::new();
        let err = app
            .read_input(Some(PathBuf::from("/nonexistent/design.md")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
