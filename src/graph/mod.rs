// System graph: the typed input model a draw pass projects from
//
// Storage is a plain Vec indexed by VertexId so iteration follows
// insertion order. Everything downstream (element creation, view
// population) inherits that order, which keeps output deterministic.

pub mod load;
pub mod vertex;

pub use load::{parse_graph, read_graph};
pub use vertex::{ContainerKind, Interaction, Item, ItemKind, TypeTag, Vertex, VertexId};

use serde::Serialize;

/// The input graph of typed vertices
#[derive(Debug, Clone, Default)]
pub struct SystemGraph {
    vertices: Vec<Vertex>,
}

/// Summary counts over a graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub vertices: usize,
    pub interactions: usize,
    pub compositions: usize,
    pub aggregations: usize,
    pub items: usize,
}

impl SystemGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its id
    pub fn add_vertex(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        types: &[TypeTag],
    ) -> VertexId {
        let id = VertexId(self.vertices.len());
        let mut vertex = Vertex::new(id, name, description);
        vertex.types.extend_from_slice(types);
        self.vertices.push(vertex);
        id
    }

    /// Set the declared kind of a vertex
    pub fn set_kind(&mut self, id: VertexId, kind: ContainerKind) {
        self.vertices[id.0].kind = Some(kind);
    }

    /// Add a landscape membership to a vertex
    pub fn add_landscape(&mut self, id: VertexId, landscape: impl Into<String>) {
        self.vertices[id.0].landscapes.push(landscape.into());
    }

    /// Add an item reference to a vertex
    pub fn add_item(&mut self, id: VertexId, item: Item) {
        self.vertices[id.0].items.push(item);
    }

    /// Record that `parent` exclusively contains `child`
    pub fn compose(&mut self, parent: VertexId, child: VertexId) {
        self.vertices[parent.0].composed.push(child);
    }

    /// Record that `parent` references `child` without owning it
    pub fn aggregate(&mut self, parent: VertexId, child: VertexId) {
        self.vertices[parent.0].aggregated.push(child);
    }

    /// Add a directed interaction between two vertices
    pub fn add_interaction(
        &mut self,
        source: VertexId,
        target: VertexId,
        description: impl Into<String>,
    ) {
        self.vertices[source.0].interactions.push(Interaction {
            description: description.into(),
            target,
        });
    }

    /// Look up a vertex by id
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    /// Iterate over all vertices in insertion order
    pub fn all_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Find a vertex by display name
    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Compute summary counts
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertices: self.vertices.len(),
            interactions: self.vertices.iter().map(|v| v.interactions.len()).sum(),
            compositions: self.vertices.iter().map(|v| v.composed.len()).sum(),
            aggregations: self.vertices.iter().map(|v| v.aggregated.len()).sum(),
            items: self.vertices.iter().map(|v| v.items.len()).sum(),
        }
    }
}
