// Elements of the derived C4 model
//
// Elements exist only as products of hierarchy construction or synthesis;
// nothing else creates them. The parent/children links form the
// System -> Container -> Component tree that view derivation walks.

use serde::{Deserialize, Serialize};

/// Tag marking a fabricated SoftwareSystem
pub const SYNTHETIC_TAG: &str = "Synthetic";

/// Unique identifier for an element, an index into the model's element list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

/// The four element kinds of the C4 model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Person,
    SoftwareSystem,
    Container,
    Component,
}

impl ElementKind {
    /// The base tag every element of this kind carries
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Person => "Person",
            ElementKind::SoftwareSystem => "SoftwareSystem",
            ElementKind::Container => "Container",
            ElementKind::Component => "Component",
        }
    }

    /// Category used when choosing interaction styles
    pub fn category(&self) -> ElementCategory {
        match self {
            ElementKind::Person => ElementCategory::Custom,
            ElementKind::SoftwareSystem | ElementKind::Container | ElementKind::Component => {
                ElementCategory::Structural
            }
        }
    }
}

/// Two-valued split of element kinds
///
/// Person elements are Custom; everything in the structural hierarchy is
/// Structural. The relationship propagator branches on this pair alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    Custom,
    Structural,
}

/// A node of the derived model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub description: String,
    pub kind: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementId>,
    pub tags: Vec<String>,
}

impl Element {
    /// Create an element carrying its kind's base tag
    pub fn new(
        id: ElementId,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ElementKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            kind,
            parent: None,
            children: Vec::new(),
            tags: vec![kind.tag().to_string()],
        }
    }

    /// Add a tag unless already present
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.iter().any(|t| *t == tag) {
            self.tags.push(tag);
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_synthetic(&self) -> bool {
        self.has_tag(SYNTHETIC_TAG)
    }

    pub fn category(&self) -> ElementCategory {
        self.kind.category()
    }
}
