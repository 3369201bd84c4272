//! Core type definitions for code generation
//!
//! This module contains the configuration values shared by the parser and the
//! emitters: the type-alias table and the output conventions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::GenerateError;

/// Diagram type names mapped to target-language type names
///
/// Lookups are case-insensitive; anything not in the table is treated as a
/// custom type and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeMap {
    aliases: BTreeMap<String, String>,
    collection_type: String,
}

impl TypeMap {
    /// Create the standard alias table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an alias
    pub fn with_alias(mut self, from: impl AsRef<str>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.as_ref().to_lowercase(), to.into());
        self
    }

    /// Set the generic collection type used for many-sided associations
    pub fn with_collection_type(mut self, collection_type: impl Into<String>) -> Self {
        self.collection_type = collection_type.into();
        self
    }

    /// Map a diagram type token to its target-language name
    pub fn resolve(&self, token: &str) -> String {
        self.aliases
            .get(&token.to_lowercase())
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }

    /// The parametrized collection type wrapping `element`, e.g. `List<Order>`
    pub fn collection_of(&self, element: &str) -> String {
        format!("{}<{}>", self.collection_type, element)
    }

    /// Whether `type_name` is an instance of the collection type
    pub fn is_collection(&self, type_name: &str) -> bool {
        type_name
            .strip_prefix(self.collection_type.as_str())
            .is_some_and(|rest| rest.starts_with('<'))
    }

    pub fn collection_type(&self) -> &str {
        &self.collection_type
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        let aliases = [
            ("string", "string"),
            ("int", "int"),
            ("float", "float"),
            ("double", "double"),
            ("bool", "bool"),
            ("boolean", "bool"),
            ("void", "void"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            aliases,
            collection_type: "List".to_string(),
        }
    }
}

/// Output conventions for generated source files
///
/// Every field has a default matching the Unity C# layout, so a JSON config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Comment written as the first line of every file
    pub header: String,
    /// Namespaces imported by every file
    pub usings: Vec<String>,
    /// Namespace imported only by classes holding a collection field
    pub collection_using: String,
    /// Namespace wrapping every generated class
    pub namespace: String,
    /// One level of indentation
    pub indent: String,
    /// File extension, without the dot
    pub extension: String,
    /// Type aliases and the collection type
    pub types: TypeMap,
}

impl EmitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_types(mut self, types: TypeMap) -> Self {
        self.types = types;
        self
    }

    /// File name for a generated class, e.g. `Player.cs`
    pub fn file_name_for(&self, class_name: &str) -> String {
        format!("{}.{}", class_name, self.extension)
    }

    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self, GenerateError> {
        serde_json::from_str(json).map_err(|e| GenerateError::config_error(e.to_string()))
    }

    /// Load a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|e| GenerateError::io_error(path, e))?;
        Self::from_json_str(&json)
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            header: "// This file is auto-generated from mermaid class diagram".to_string(),
            usings: vec!["UnityEngine".to_string()],
            collection_using: "System.Collections.Generic".to_string(),
            namespace: "UAct.Generated".to_string(),
            indent: "\t".to_string(),
            extension: "cs".to_string(),
            types: TypeMap::default(),
        }
    }
}

impl fmt::Display for EmitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "namespace {} (*.{})", self.namespace, self.extension)
    }
}
