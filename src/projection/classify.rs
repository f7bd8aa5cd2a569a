// Vertex classification
//
// A vertex's tag set is reduced to exactly one class up front; every
// later phase matches on the class instead of re-inspecting tags.

use crate::graph::{TypeTag, Vertex};

/// The single handling path chosen for a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexClass {
    System,
    Person,
    Container,
    Component,
    Other,
}

/// Classify a vertex by its declared tags
///
/// Precedence is System > Person > Container > Component, so a vertex
/// carrying several tags still lands on one path. Vertices with no
/// recognized tag classify as Other and produce no element.
pub fn classify(vertex: &Vertex) -> VertexClass {
    if vertex.has_type(TypeTag::System) {
        VertexClass::System
    } else if vertex.has_type(TypeTag::Person) {
        VertexClass::Person
    } else if vertex.has_type(TypeTag::Container) {
        VertexClass::Container
    } else if vertex.has_type(TypeTag::Component) {
        VertexClass::Component
    } else {
        VertexClass::Other
    }
}
