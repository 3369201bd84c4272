//! Class diagram detector
//!
//! Identifies class diagram syntax and finds the diagram body, either inside
//! a fenced ```` ```mermaid ```` block of a Markdown document or as a raw
//! diagram file.

use crate::core::Detector;

const FENCE: &str = "```";
const MERMAID_FENCE: &str = "```mermaid";
const HEADERS: [&str; 2] = ["classDiagram-v2", "classDiagram"];

/// Remove a leading `classDiagram` keyword, if present
fn strip_header(text: &str) -> Option<&str> {
    HEADERS.iter().find_map(|header| {
        let head = text.get(..header.len())?;
        let rest = &text[header.len()..];
        let at_boundary = rest.chars().next().map_or(true, char::is_whitespace);
        (head.eq_ignore_ascii_case(header) && at_boundary).then_some(rest)
    })
}

/// Body of the first fenced mermaid block that holds a class diagram
fn fenced_class_diagram(markdown: &str) -> Option<&str> {
    let mut rest = markdown;
    while let Some(start) = rest.find(MERMAID_FENCE) {
        let after = &rest[start + MERMAID_FENCE.len()..];
        let end = after.find(FENCE)?;
        if let Some(body) = strip_header(after[..end].trim_start()) {
            return Some(body.trim());
        }
        rest = &after[end + FENCE.len()..];
    }
    None
}

/// Detector for class diagram syntax
pub struct ClassDetector;

impl ClassDetector {
    pub fn new() -> Self {
        Self
    }

    /// Whether the input is a Markdown document rather than a diagram file
    pub fn is_markdown(&self, input: &str) -> bool {
        input.contains(FENCE)
    }
}

impl Default for ClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ClassDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        if self.is_markdown(input) {
            return if fenced_class_diagram(input).is_some() {
                1.0
            } else {
                0.0
            };
        }

        if strip_header(input.trim_start()).is_some() {
            return 1.0;
        }

        let has_class_def = input
            .lines()
            .any(|line| line.trim_start().starts_with("class ") && line.contains('{'));
        if has_class_def {
            return 0.8;
        }

        let has_inheritance = ["<|--", "--|>", "..|>", "<|.."]
            .iter()
            .any(|marker| input.contains(marker));
        if has_inheritance {
            return 0.6;
        }

        0.0
    }

    fn extract(&self, input: &str) -> Option<String> {
        let body = if self.is_markdown(input) {
            fenced_class_diagram(input)?
        } else {
            let trimmed = input.trim();
            strip_header(trimmed).unwrap_or(trimmed).trim()
        };

        (!body.is_empty()).then(|| body.to_string())
    }

    fn diagram_type(&self) -> &'static str {
        "class"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["classDiagram", "class ", "<|--", "--|>"]
    }
}
