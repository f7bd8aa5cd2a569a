// Vertex types for the system graph
//
// Vertices are the read-only input of a draw pass: typed nodes carrying
// interactions, containment child sets, and item references.

use serde::{Deserialize, Serialize};

/// Unique identifier for a vertex in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

/// Type tag declared on a vertex
///
/// A vertex may carry several tags; classification picks exactly one path
/// from them. Tags outside the known set deserialize as `Unknown` so a
/// graph document with foreign tags still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeTag {
    System,
    Person,
    Container,
    Component,
    #[serde(other)]
    Unknown,
}

/// Declared kind of a Container vertex, carried onto the derived element
/// as a style tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerKind {
    Service,
    Storage,
    Queue,
}

impl ContainerKind {
    /// The style tag written onto the derived Container element
    pub fn tag(&self) -> &'static str {
        match self {
            ContainerKind::Service => "Service",
            ContainerKind::Storage => "Storage",
            ContainerKind::Queue => "Queue",
        }
    }
}

/// Kind of an item reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    System,
    #[serde(other)]
    Other,
}

/// A lightweight named reference declared by a Container vertex
///
/// When the named System exists as no vertex of its own, the item stands in
/// for it and a synthetic SoftwareSystem is fabricated from these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_item_kind")]
    pub kind: ItemKind,
    #[serde(default)]
    pub landscapes: Vec<String>,
}

fn default_item_kind() -> ItemKind {
    ItemKind::System
}

impl Item {
    /// Create a System-typed item
    pub fn system(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: ItemKind::System,
            landscapes: Vec::new(),
        }
    }

    /// Attach landscape memberships to the item
    pub fn with_landscapes<I, S>(mut self, landscapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.landscapes = landscapes.into_iter().map(Into::into).collect();
        self
    }
}

/// An outgoing edge: interaction summary plus destination vertex
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub description: String,
    pub target: VertexId,
}

/// A node in the system graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    /// Stable identity within the graph
    pub id: VertexId,
    /// Display name
    pub name: String,
    /// Summary text
    pub description: String,
    /// Declared type tags
    pub types: Vec<TypeTag>,
    /// Declared kind, meaningful on Container vertices
    pub kind: Option<ContainerKind>,
    /// Landscape memberships, meaningful on System vertices
    pub landscapes: Vec<String>,
    /// Item references, meaningful on Container vertices
    pub items: Vec<Item>,
    /// Outgoing edges
    pub interactions: Vec<Interaction>,
    /// Exclusive containment children
    pub composed: Vec<VertexId>,
    /// Non-exclusive reference children
    pub aggregated: Vec<VertexId>,
}

impl Vertex {
    /// Create a vertex with no tags, edges, or children
    pub fn new(id: VertexId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            types: Vec::new(),
            kind: None,
            landscapes: Vec::new(),
            items: Vec::new(),
            interactions: Vec::new(),
            composed: Vec::new(),
            aggregated: Vec::new(),
        }
    }

    /// Check whether the vertex declares a given type tag
    pub fn has_type(&self, tag: TypeTag) -> bool {
        self.types.contains(&tag)
    }

    /// Iterate over the System-typed item references
    pub fn system_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.kind == ItemKind::System)
    }

    /// Composed and aggregated children, composed first
    pub fn all_children(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.composed.iter().chain(self.aggregated.iter()).copied()
    }
}
