//! Class diagram database
//!
//! Stores the class models built from a class diagram. Relationships are
//! applied to the classes as they arrive and are not kept.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{Database, TypeMap};

/// A field declared on a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeModel {
    pub type_name: String,
    pub name: String,
    /// Literal text emitted as the field initializer
    pub initial_value: Option<String>,
}

impl AttributeModel {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            initial_value: None,
        }
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.initial_value = if value.is_empty() { None } else { Some(value) };
        self
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub type_name: String,
    pub name: String,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// A method declared on a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodModel {
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl MethodModel {
    /// Create a method returning `void`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            return_type: "void".to_string(),
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }
}

/// A class in the diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassModel {
    pub name: String,
    pub base_class_name: Option<String>,
    pub attributes: Vec<AttributeModel>,
    pub methods: Vec<MethodModel>,
    /// Set once a collection-typed attribute is added
    pub uses_collection_type: bool,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_class_name: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            uses_collection_type: false,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_class_name = Some(base.into());
        self
    }

    pub fn add_attribute(&mut self, attribute: AttributeModel) {
        self.attributes.push(attribute);
    }

    /// Add an attribute whose type is a parametrized collection
    pub fn add_collection_attribute(&mut self, attribute: AttributeModel) {
        self.attributes.push(attribute);
        self.uses_collection_type = true;
    }

    pub fn add_method(&mut self, method: MethodModel) {
        self.methods.push(method);
    }
}

/// Cardinality written at one end of an association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplicity(String);

impl Multiplicity {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The multiplicity assumed when an endpoint has none
    pub fn one() -> Self {
        Self("1".to_string())
    }

    /// `*`, ranges such as `0..1` or `1..*`, `0`, `n` and `N` all mean "many"
    pub fn is_many(&self) -> bool {
        let text = self.0.as_str();
        text.contains('*') || text.contains("..") || matches!(text, "0" | "n" | "N")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::one()
    }
}

/// A relationship between two declared classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    /// `derived` extends `base`
    Inheritance { derived: String, base: String },
    /// `class_a` refers to `class_b`
    Association {
        class_a: String,
        class_b: String,
        multiplicity_a: Multiplicity,
        multiplicity_b: Multiplicity,
    },
}

/// Counters describing how much of a diagram was understood
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub applied_relationships: usize,
    pub dropped_relationships: usize,
    pub skipped_lines: usize,
    pub merged_declarations: usize,
}

/// Class diagram database
#[derive(Debug, Clone)]
pub struct ClassDatabase {
    classes: Vec<ClassModel>,
    /// Supplies the collection type for many-sided associations
    types: TypeMap,
    stats: ParseStats,
}

impl ClassDatabase {
    pub fn new() -> Self {
        Self::with_types(TypeMap::default())
    }

    /// Create a database whose many-sided associations use the collection
    /// type of `types`
    pub fn with_types(types: TypeMap) -> Self {
        Self {
            classes: Vec::new(),
            types,
            stats: ParseStats::default(),
        }
    }

    pub fn types(&self) -> &TypeMap {
        &self.types
    }

    /// Declare a class. Returns `false` if the name was already declared
    pub fn declare_class(&mut self, name: &str) -> bool {
        if self.contains(name) {
            warn!(class = name, "Duplicate class declaration merged into the first one");
            self.stats.merged_declarations += 1;
            return false;
        }
        self.classes.push(ClassModel::new(name));
        true
    }

    pub fn classes(&self) -> &[ClassModel] {
        &self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_class(name).is_some()
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassModel> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn get_class_mut(&mut self, name: &str) -> Option<&mut ClassModel> {
        self.classes.iter_mut().find(|c| c.name == name)
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    pub(crate) fn record_skipped_line(&mut self) {
        self.stats.skipped_lines += 1;
    }

    fn resolve(&mut self, relationship: Relationship) -> bool {
        match relationship {
            Relationship::Inheritance { derived, base } => {
                if !self.contains(&base) {
                    return false;
                }
                match self.get_class_mut(&derived) {
                    Some(class) => {
                        class.base_class_name = Some(base);
                        true
                    }
                    None => false,
                }
            }
            Relationship::Association {
                class_a,
                class_b,
                multiplicity_a,
                multiplicity_b,
            } => {
                if !self.contains(&class_b) {
                    return false;
                }
                let collection = self.types.collection_of(&class_b);
                let Some(class) = self.get_class_mut(&class_a) else {
                    return false;
                };

                // Only side A receives a field, even when both sides are many.
                if multiplicity_b.is_many() {
                    let name = format!("{}s", class_b);
                    class.add_collection_attribute(AttributeModel::new(collection, name));
                } else if !multiplicity_a.is_many() {
                    class.add_attribute(AttributeModel::new(class_b.clone(), class_b));
                }
                true
            }
        }
    }
}

impl Default for ClassDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Database for ClassDatabase {
    type Node = ClassModel;
    type Edge = Relationship;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        match self.get_class_mut(&node.name) {
            Some(existing) => {
                warn!(class = %node.name, "Duplicate class merged into the first declaration");
                existing.attributes.extend(node.attributes);
                existing.methods.extend(node.methods);
                existing.uses_collection_type |= node.uses_collection_type;
                if existing.base_class_name.is_none() {
                    existing.base_class_name = node.base_class_name;
                }
                self.stats.merged_declarations += 1;
            }
            None => self.classes.push(node),
        }
        Ok(())
    }

    fn apply_edge(&mut self, edge: Self::Edge) -> bool {
        let applied = self.resolve(edge.clone());
        if applied {
            self.stats.applied_relationships += 1;
        } else {
            debug!(?edge, "Dropped relationship with an undeclared endpoint");
            self.stats.dropped_relationships += 1;
        }
        applied
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.get_class(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn clear(&mut self) {
        self.classes.clear();
        self.stats = ParseStats::default();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn association(a: &str, b: &str, ma: &str, mb: &str) -> Relationship {
        Relationship::Association {
            class_a: a.to_string(),
            class_b: b.to_string(),
            multiplicity_a: Multiplicity::new(ma),
            multiplicity_b: Multiplicity::new(mb),
        }
    }

    fn database_with(names: &[&str]) -> ClassDatabase {
        let mut db = ClassDatabase::new();
        for name in names {
            db.declare_class(name);
        }
        db
    }

    #[test]
    fn test_create_empty_class() {
        let class = ClassModel::new("Animal");
        assert_eq!(class.name, "Animal");
        assert!(class.base_class_name.is_none());
        assert!(class.attributes.is_empty());
        assert!(class.methods.is_empty());
        assert!(!class.uses_collection_type);
    }

    #[test]
    fn test_empty_initial_value_is_absent() {
        let attr = AttributeModel::new("int", "age").with_initial_value("");
        assert!(attr.initial_value.is_none());

        let attr = AttributeModel::new("int", "age").with_initial_value("30");
        assert_eq!(attr.initial_value.as_deref(), Some("30"));
    }

    #[test]
    fn test_method_defaults_to_void() {
        let method = MethodModel::new("Jump");
        assert!(method.returns_void());
        assert!(!method.with_return_type("int").returns_void());
    }

    #[test]
    fn test_multiplicity_classification() {
        for many in ["*", "0..1", "1..*", "0", "n", "N"] {
            assert!(Multiplicity::new(many).is_many(), "{many} should be many");
        }
        for one in ["1", "2", "10"] {
            assert!(!Multiplicity::new(one).is_many(), "{one} should be one");
        }
        assert!(!Multiplicity::default().is_many());
    }

    #[test]
    fn test_declare_class_twice() {
        let mut db = ClassDatabase::new();
        assert!(db.declare_class("Player"));
        assert!(!db.declare_class("Player"));
        assert_eq!(db.class_count(), 1);
        assert_eq!(db.stats().merged_declarations, 1);
    }

    #[test]
    fn test_add_node_merges_members() {
        let mut db = ClassDatabase::new();
        let mut first = ClassModel::new("Player");
        first.add_attribute(AttributeModel::new("int", "hp"));
        let mut second = ClassModel::new("Player");
        second.add_attribute(AttributeModel::new("string", "name"));
        second.add_method(MethodModel::new("Jump"));

        db.add_node(first).unwrap();
        db.add_node(second).unwrap();

        let player = db.get_node("Player").unwrap();
        assert_eq!(db.node_count(), 1);
        assert_eq!(player.attributes.len(), 2);
        assert_eq!(player.attributes[1].name, "name");
        assert_eq!(player.methods.len(), 1);
    }

    #[test]
    fn test_inheritance_sets_base() {
        let mut db = database_with(&["Animal", "Dog"]);
        let applied = db.apply_edge(Relationship::Inheritance {
            derived: "Dog".to_string(),
            base: "Animal".to_string(),
        });

        assert!(applied);
        assert_eq!(
            db.get_class("Dog").unwrap().base_class_name.as_deref(),
            Some("Animal")
        );
        assert!(db.get_class("Animal").unwrap().base_class_name.is_none());
    }

    #[test]
    fn test_inheritance_to_unknown_class_is_dropped() {
        let mut db = database_with(&["Dog"]);
        let applied = db.apply_edge(Relationship::Inheritance {
            derived: "Dog".to_string(),
            base: "Animal".to_string(),
        });

        assert!(!applied);
        assert!(db.get_class("Dog").unwrap().base_class_name.is_none());
        assert_eq!(db.stats().dropped_relationships, 1);
    }

    #[test]
    fn test_one_to_many_adds_collection() {
        let mut db = database_with(&["Customer", "Order"]);
        assert!(db.apply_edge(association("Customer", "Order", "1", "*")));

        let customer = db.get_class("Customer").unwrap();
        assert_eq!(
            customer.attributes,
            vec![AttributeModel::new("List<Order>", "Orders")]
        );
        assert!(customer.uses_collection_type);
        assert!(db.get_class("Order").unwrap().attributes.is_empty());
    }

    #[test]
    fn test_one_to_one_adds_scalar() {
        let mut db = database_with(&["Person", "Heart"]);
        assert!(db.apply_edge(association("Person", "Heart", "1", "1")));

        let person = db.get_class("Person").unwrap();
        assert_eq!(person.attributes, vec![AttributeModel::new("Heart", "Heart")]);
        assert!(!person.uses_collection_type);
    }

    #[test]
    fn test_many_to_one_adds_nothing() {
        let mut db = database_with(&["Order", "Customer"]);
        assert!(db.apply_edge(association("Order", "Customer", "*", "1")));

        assert!(db.get_class("Order").unwrap().attributes.is_empty());
        assert!(db.get_class("Customer").unwrap().attributes.is_empty());
        assert_eq!(db.stats().applied_relationships, 1);
    }

    #[test]
    fn test_many_to_many_only_updates_first_side() {
        let mut db = database_with(&["Student", "Course"]);
        assert!(db.apply_edge(association("Student", "Course", "*", "*")));

        assert_eq!(db.get_class("Student").unwrap().attributes.len(), 1);
        assert!(db.get_class("Course").unwrap().attributes.is_empty());
    }

    #[test]
    fn test_custom_collection_type() {
        let mut db = ClassDatabase::with_types(TypeMap::new().with_collection_type("HashSet"));
        db.declare_class("Team");
        db.declare_class("Member");
        db.apply_edge(association("Team", "Member", "1", "n"));

        assert_eq!(
            db.get_class("Team").unwrap().attributes[0].type_name,
            "HashSet<Member>"
        );
    }

    #[test]
    fn test_clear() {
        let mut db = database_with(&["A", "B"]);
        db.record_skipped_line();
        db.clear();
        assert_eq!(db.node_count(), 0);
        assert_eq!(db.stats(), ParseStats::default());
    }
}
