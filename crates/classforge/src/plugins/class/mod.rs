//! Class diagram plugin
//!
//! Implements class diagram detection, parsing and C# emission.

mod database;
mod detector;
mod emitter;
mod endpoint;
mod parser;

pub use database::{
    AttributeModel, ClassDatabase, ClassModel, MethodModel, Multiplicity, Parameter, ParseStats,
    Relationship,
};
pub use detector::ClassDetector;
pub use emitter::{default_value_for, CSharpEmitter};
pub use endpoint::{parse_endpoint, Endpoint, Side};
pub use parser::ClassParser;
