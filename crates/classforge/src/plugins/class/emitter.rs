//! C# emitter for class diagrams
//!
//! Writes one Unity-style C# source file per class: header comment, using
//! lines, namespace block, public fields and public method stubs.

use std::fmt::Write as _;

use anyhow::Result;
use tracing::{debug, info, span, Level};

use super::database::{AttributeModel, ClassDatabase, ClassModel, MethodModel};
use crate::core::{Database, EmitConfig, Emitter, GeneratedSource, GenerateError, TypeMap};

/// Default value returned by a generated method stub
///
/// Custom types are default-constructed; a type name containing whitespace
/// cannot be constructed and gets `null`.
pub fn default_value_for(type_name: &str, types: &TypeMap) -> String {
    if type_name.is_empty() {
        return "null".to_string();
    }
    if types.is_collection(type_name) {
        return format!("new {}()", type_name);
    }
    match type_name {
        "string" => "\"\"".to_string(),
        "int" | "float" | "double" => "0".to_string(),
        "bool" => "false".to_string(),
        other if other.contains(char::is_whitespace) => "null".to_string(),
        other => format!("new {}()", other),
    }
}

/// C# class emitter
pub struct CSharpEmitter {
    config: EmitConfig,
}

impl CSharpEmitter {
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    pub fn with_config(config: EmitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Emit the source file for a single class
    pub fn emit_class(&self, class: &ClassModel) -> Result<GeneratedSource> {
        let mut out = String::with_capacity(2000);
        self.write_class(&mut out, class)
            .map_err(|e| GenerateError::emit_error(format!("class {}: {}", class.name, e)))?;

        Ok(GeneratedSource {
            class_name: class.name.clone(),
            file_name: self.config.file_name_for(&class.name),
            contents: out,
        })
    }

    fn write_class(&self, out: &mut String, class: &ClassModel) -> std::fmt::Result {
        let indent = self.config.indent.as_str();

        writeln!(out, "{}", self.config.header)?;
        for using in &self.config.usings {
            writeln!(out, "using {};", using)?;
        }
        if class.uses_collection_type {
            writeln!(out, "using {};", self.config.collection_using)?;
        }
        writeln!(out)?;
        writeln!(out, "namespace {}", self.config.namespace)?;
        writeln!(out, "{{")?;

        match &class.base_class_name {
            Some(base) => writeln!(out, "{indent}public class {} : {}", class.name, base)?,
            None => writeln!(out, "{indent}public class {}", class.name)?,
        }
        writeln!(out, "{indent}{{")?;

        for attribute in &class.attributes {
            self.write_attribute(out, attribute)?;
        }
        if !class.attributes.is_empty() && !class.methods.is_empty() {
            writeln!(out)?;
        }
        for method in &class.methods {
            self.write_method(out, method)?;
        }

        writeln!(out, "{indent}}}")?;
        writeln!(out, "}}")
    }

    fn write_attribute(&self, out: &mut String, attribute: &AttributeModel) -> std::fmt::Result {
        let indent = self.config.indent.repeat(2);
        match &attribute.initial_value {
            Some(value) => writeln!(
                out,
                "{indent}public {} {} = {};",
                attribute.type_name, attribute.name, value
            ),
            None => writeln!(out, "{indent}public {} {};", attribute.type_name, attribute.name),
        }
    }

    fn write_method(&self, out: &mut String, method: &MethodModel) -> std::fmt::Result {
        let indent = self.config.indent.repeat(2);
        let body_indent = self.config.indent.repeat(3);
        let parameters = method
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            out,
            "{indent}public {} {}({})",
            method.return_type, method.name, parameters
        )?;
        writeln!(out, "{indent}{{")?;
        writeln!(out, "{body_indent}// Method implementation goes here")?;
        if !method.returns_void() {
            let value = default_value_for(&method.return_type, &self.config.types);
            writeln!(out, "{body_indent}return {};", value)?;
        }
        writeln!(out, "{indent}}}")
    }
}

impl Default for CSharpEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter<ClassDatabase> for CSharpEmitter {
    type Output = Vec<GeneratedSource>;

    fn emit(&self, database: &ClassDatabase) -> Result<Self::Output> {
        let emit_span = span!(Level::INFO, "emit_csharp", classes = database.node_count());
        let _enter = emit_span.enter();

        let sources = database
            .nodes()
            .map(|class| -> Result<GeneratedSource> {
                let source = self.emit_class(class)?;
                debug!(class = %class.name, bytes = source.contents.len(), "Emitted class");
                Ok(source)
            })
            .collect::<Result<Vec<_>>>()?;

        info!(files = sources.len(), "Emission completed");
        Ok(sources)
    }

    fn name(&self) -> &'static str {
        "csharp"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn language(&self) -> &'static str {
        "C#"
    }
}
