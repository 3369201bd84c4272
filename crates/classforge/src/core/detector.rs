//! Core detector trait for diagram type identification
//!
//! This trait defines the interface for detecting diagram types
//! from markup language patterns.

/// Core trait for diagram type detectors
///
/// This trait represents the detection layer that identifies diagram types
/// from markup patterns, and finds the diagram body inside a larger
/// document.
///
/// # Example
/// ```
/// use classforge::core::Detector;
/// use classforge::plugins::class::ClassDetector;
///
/// let detector = ClassDetector::new();
/// assert!(detector.detect("classDiagram\n    class Animal {\n    }"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this diagram type
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Locate the diagram body inside the input, if there is one
    fn extract(&self, input: &str) -> Option<String>;

    /// Get the diagram type name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
