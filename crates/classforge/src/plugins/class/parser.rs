//! Class diagram parser
//!
//! Parses class diagram syntax into the database in two passes: the first
//! declares every class, the second fills in members and applies
//! relationships. Relationship lines may therefore name classes declared
//! further down the diagram.
//!
//! Lines that fit no known shape are skipped, never fatal.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::database::{AttributeModel, ClassDatabase, MethodModel, Parameter, Relationship};
use super::endpoint::{parse_endpoint, Side};
use crate::core::{Database, Parser, TypeMap};

/// The generic edge marker; anything containing it is a relationship
const EDGE_MARKER: &str = "--";

/// Inheritance markers, and whether the base class is written first
const INHERITANCE_MARKERS: [(&str, bool); 4] = [
    ("<|--", true),
    ("<|..", true),
    ("--|>", false),
    ("..|>", false),
];

const VISIBILITY_MARKERS: &[char] = &['+', '-', '#', '~'];

const LINE_BREAKS: &[char] = &['\n', '\r'];

/// Shape of a single trimmed diagram line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Header,
    Declaration { name: &'a str, closed: bool },
    Close,
    Body(&'a str),
}

/// Names that would not survive as a flat `<Name>.cs` file are rejected
fn is_usable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c == '/' || c == '\\') && !name.contains("..")
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() || line.starts_with("%%") {
        return Line::Blank;
    }
    if line.eq_ignore_ascii_case("classdiagram") || line.eq_ignore_ascii_case("classdiagram-v2") {
        return Line::Header;
    }
    if line == "}" {
        return Line::Close;
    }

    if let Some(rest) = line.strip_prefix("class ") {
        if !line.contains(EDGE_MARKER) {
            match rest.split_once('{') {
                Some((name, body)) => {
                    let name = name.trim();
                    if is_usable_name(name) {
                        return Line::Declaration {
                            name,
                            closed: body.trim_end().ends_with('}'),
                        };
                    }
                }
                None => {
                    let name = rest.trim();
                    if is_usable_name(name) && !name.contains(char::is_whitespace) {
                        return Line::Declaration { name, closed: true };
                    }
                }
            }
        }
    }

    Line::Body(line)
}

fn strip_visibility(line: &str) -> &str {
    line.trim_matches(VISIBILITY_MARKERS).trim()
}

/// A method has a parameter list before any `=`; parentheses inside an
/// initializer belong to an attribute
fn is_method(line: &str) -> bool {
    let Some(open) = line.find('(') else {
        return false;
    };
    if line.find('=').is_some_and(|eq| eq < open) {
        return false;
    }
    line.rfind(')').is_some_and(|close| close > open)
}

fn inheritance_marker(line: &str) -> Option<(&'static str, bool)> {
    INHERITANCE_MARKERS
        .into_iter()
        .find(|(marker, _)| line.contains(marker))
}

/// Split a relationship line around exactly one `marker`, dropping any
/// `: label` after the right endpoint
fn split_relationship<'a>(line: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let (left, right) = line.split_once(marker)?;
    if right.contains(marker) {
        return None;
    }
    let right = right.split_once(':').map_or(right, |(endpoint, _label)| endpoint);
    Some((left, right))
}

/// Class diagram parser
pub struct ClassParser {
    types: TypeMap,
}

impl ClassParser {
    /// Create a parser using the standard type aliases
    pub fn new() -> Self {
        Self::with_types(TypeMap::default())
    }

    /// Create a parser using a custom type-alias table
    pub fn with_types(types: TypeMap) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &TypeMap {
        &self.types
    }

    /// Parse an attribute line like `- int age = 30`
    pub fn parse_attribute(&self, line: &str) -> Option<AttributeModel> {
        let clean = strip_visibility(line);

        let (declaration, initial_value) = match clean.split_once('=') {
            Some((declaration, value)) => (
                declaration.trim(),
                Some(value.trim_matches(|c| matches!(c, ';' | ' ' | '"' | '\''))),
            ),
            None => (clean, None),
        };

        let parts: Vec<&str> = declaration
            .split(|c: char| c.is_whitespace() || c == ';')
            .filter(|part| !part.is_empty())
            .collect();

        let attribute = match parts.as_slice() {
            [] => return None,
            [name] => AttributeModel::new(self.types.resolve("string"), *name),
            [type_name, name, ..] => AttributeModel::new(self.types.resolve(type_name), *name),
        };

        Some(match initial_value {
            Some(value) => attribute.with_initial_value(value),
            None => attribute,
        })
    }

    /// Parse a method line like `+ int Add(int a, int b)`
    ///
    /// Only a leading return type is recognised; `GetName() string` is a
    /// `void` method named `GetName`.
    pub fn parse_method(&self, line: &str) -> MethodModel {
        let clean = strip_visibility(line);

        let (open, close) = match (clean.find('('), clean.rfind(')')) {
            (Some(open), Some(close)) if open > 0 && close > open => (open, close),
            _ => return MethodModel::new(clean),
        };

        let head: Vec<&str> = clean[..open].split_whitespace().collect();
        let mut method = match head.as_slice() {
            [] => return MethodModel::new(clean),
            [name] => MethodModel::new(*name),
            [return_type, name, ..] => {
                MethodModel::new(*name).with_return_type(self.types.resolve(return_type))
            }
        };

        let arguments = clean[open + 1..close].trim();
        for argument in arguments.split(',').filter(|a| !a.trim().is_empty()) {
            match argument.split_whitespace().collect::<Vec<_>>().as_slice() {
                [type_name, name] => {
                    let parameter = Parameter::new(self.types.resolve(type_name), *name);
                    method = method.with_parameter(parameter);
                }
                _ => debug!(method = %method.name, argument, "Skipped malformed parameter"),
            }
        }

        method
    }

    /// Parse an inheritance line like `Dog --|> Animal` or `Animal <|-- Dog`
    pub fn parse_inheritance(&self, line: &str) -> Option<Relationship> {
        let (marker, base_first) = inheritance_marker(line)?;
        let (left, right) = split_relationship(line, marker)?;
        let left = parse_endpoint(left, Side::Left)?.name;
        let right = parse_endpoint(right, Side::Right)?.name;

        let (derived, base) = if base_first { (right, left) } else { (left, right) };
        Some(Relationship::Inheritance { derived, base })
    }

    /// Parse an association line like `Customer "1" -- "*" Order`
    pub fn parse_association(&self, line: &str) -> Option<Relationship> {
        let (left, right) = split_relationship(line, EDGE_MARKER)?;
        let left = parse_endpoint(left, Side::Left)?;
        let right = parse_endpoint(right, Side::Right)?;

        Some(Relationship::Association {
            multiplicity_a: left.multiplicity_or_one(),
            multiplicity_b: right.multiplicity_or_one(),
            class_a: left.name,
            class_b: right.name,
        })
    }

    fn apply_relationship(&self, database: &mut ClassDatabase, line: &str) {
        let relationship = if inheritance_marker(line).is_some() {
            self.parse_inheritance(line)
        } else {
            self.parse_association(line)
        };

        match relationship {
            Some(relationship) => {
                database.apply_edge(relationship);
            }
            None => {
                debug!(line, "Skipped unparsable relationship");
                database.record_skipped_line();
            }
        }
    }

    fn apply_member(&self, database: &mut ClassDatabase, class_name: &str, line: &str) {
        if line.contains(EDGE_MARKER) {
            debug!(class = class_name, line, "Skipped relationship inside class body");
            database.record_skipped_line();
            return;
        }

        if is_method(line) {
            let method = self.parse_method(line);
            trace!(class = class_name, method = %method.name, "Parsed method");
            if let Some(class) = database.get_class_mut(class_name) {
                class.add_method(method);
            }
        } else if let Some(attribute) = self.parse_attribute(line) {
            trace!(class = class_name, attribute = %attribute.name, "Parsed attribute");
            if let Some(class) = database.get_class_mut(class_name) {
                class.add_attribute(attribute);
            }
        } else {
            database.record_skipped_line();
        }
    }
}

impl Default for ClassParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ClassDatabase> for ClassParser {
    fn parse(&self, input: &str, database: &mut ClassDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_class_diagram", input_len = input.len());
        let _enter = parse_span.enter();

        let lines: Vec<Line<'_>> = input
            .split(LINE_BREAKS)
            .map(|line| classify(line.trim()))
            .collect();

        // Pass 1: every class name is known before any relationship resolves.
        let declare_span = span!(Level::DEBUG, "declare_classes");
        let _declare_enter = declare_span.enter();
        for line in &lines {
            if let Line::Declaration { name, .. } = line {
                database.declare_class(name);
            }
        }
        debug!(class_count = database.class_count(), "Declared classes");
        drop(_declare_enter);

        // Pass 2: members and relationships.
        let member_span = span!(Level::DEBUG, "parse_members");
        let _member_enter = member_span.enter();
        let mut current: Option<&str> = None;
        for line in &lines {
            match *line {
                Line::Blank | Line::Header => {}
                Line::Declaration { name, closed } => {
                    current = if closed { None } else { Some(name) };
                }
                Line::Close => current = None,
                Line::Body(text) => match current {
                    Some(class_name) => self.apply_member(database, class_name, text),
                    None if text.contains(EDGE_MARKER) || inheritance_marker(text).is_some() => {
                        self.apply_relationship(database, text)
                    }
                    None => {
                        trace!(line = text, "Skipped top-level line");
                        database.record_skipped_line();
                    }
                },
            }
        }
        drop(_member_enter);

        let stats = database.stats();
        info!(
            classes = database.class_count(),
            relationships = stats.applied_relationships,
            dropped_relationships = stats.dropped_relationships,
            skipped_lines = stats.skipped_lines,
            "Parsing completed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "class"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.split(LINE_BREAKS).any(|line| {
            matches!(classify(line.trim()), Line::Declaration { .. })
        })
    }
}
