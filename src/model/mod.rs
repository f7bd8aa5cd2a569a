// The derived C4 model
//
// C4Model is the sink the projection engine writes into: elements in a
// containment tree, relationships between them, derived views, and
// tag-selected styles. Ids are indices into the owning vectors, so
// creation order is the iteration order everywhere.

pub mod element;
pub mod relationship;
pub mod style;
pub mod view;

pub use element::{Element, ElementCategory, ElementId, ElementKind, SYNTHETIC_TAG};
pub use relationship::{interaction_style, InteractionStyle, Relationship, RelationshipId};
pub use style::{ElementStyle, Shape};
pub use view::{sanitize_key, AutomaticLayout, RankDirection, View, ViewKind, ViewRelationship};

use serde::Serialize;

/// The model a single draw pass populates and exports
#[derive(Debug, Clone)]
pub struct C4Model {
    pub name: String,
    pub description: String,
    elements: Vec<Element>,
    relationships: Vec<Relationship>,
    views: Vec<View>,
    styles: Vec<ElementStyle>,
}

/// Summary counts over a populated model
#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub persons: usize,
    pub software_systems: usize,
    pub synthetic_systems: usize,
    pub containers: usize,
    pub components: usize,
    pub relationships: usize,
    pub views: usize,
}

impl C4Model {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            elements: Vec::new(),
            relationships: Vec::new(),
            views: Vec::new(),
            styles: Vec::new(),
        }
    }

    fn add_element(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ElementKind,
        parent: Option<ElementId>,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        let mut element = Element::new(id, name, description, kind);
        element.parent = parent;
        self.elements.push(element);
        if let Some(parent) = parent {
            self.elements[parent.0].children.push(id);
        }
        id
    }

    /// Add a top-level Person element
    pub fn add_person(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ElementId {
        self.add_element(name, description, ElementKind::Person, None)
    }

    /// Add a top-level SoftwareSystem element
    pub fn add_software_system(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ElementId {
        self.add_element(name, description, ElementKind::SoftwareSystem, None)
    }

    /// Add a Container under a SoftwareSystem
    pub fn add_container(
        &mut self,
        system: ElementId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ElementId {
        self.add_element(name, description, ElementKind::Container, Some(system))
    }

    /// Add a Component under a Container
    pub fn add_component(
        &mut self,
        container: ElementId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ElementId {
        self.add_element(name, description, ElementKind::Component, Some(container))
    }

    /// Add a relationship between two elements
    pub fn add_relationship(
        &mut self,
        source: ElementId,
        target: ElementId,
        description: impl Into<String>,
        interaction_style: Option<InteractionStyle>,
    ) -> RelationshipId {
        let id = RelationshipId(self.relationships.len());
        self.relationships.push(Relationship {
            id,
            source,
            target,
            description: description.into(),
            interaction_style,
        });
        id
    }

    pub fn add_view(&mut self, view: View) {
        self.views.push(view);
    }

    pub fn add_element_style(&mut self, style: ElementStyle) {
        self.styles.push(style);
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn relationship(&self, id: RelationshipId) -> &Relationship {
        &self.relationships[id.0]
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn styles(&self) -> &[ElementStyle] {
        &self.styles
    }

    /// SoftwareSystem elements in creation order
    pub fn software_systems(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| e.kind == ElementKind::SoftwareSystem)
    }

    /// Person elements in creation order
    pub fn persons(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.kind == ElementKind::Person)
    }

    /// Find a SoftwareSystem by name
    pub fn find_system(&self, name: &str) -> Option<&Element> {
        self.software_systems().find(|e| e.name == name)
    }

    /// Children of an element restricted to one kind, in creation order
    pub fn children_of_kind(
        &self,
        parent: ElementId,
        kind: ElementKind,
    ) -> impl Iterator<Item = &Element> {
        self.elements[parent.0]
            .children
            .iter()
            .map(move |id| &self.elements[id.0])
            .filter(move |e| e.kind == kind)
    }

    /// Whether `id` sits below `ancestor` in the containment tree, or is it
    pub fn in_subtree(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.elements[c.0].parent;
        }
        false
    }

    /// The parentless ancestor of an element (itself when top-level)
    pub fn root_of(&self, id: ElementId) -> ElementId {
        let mut current = id;
        while let Some(parent) = self.elements[current.0].parent {
            current = parent;
        }
        current
    }

    /// Nearest self-or-ancestor of the given kind
    pub fn ancestor_of_kind(&self, id: ElementId, kind: ElementKind) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(c) = current {
            if self.elements[c.0].kind == kind {
                return Some(c);
            }
            current = self.elements[c.0].parent;
        }
        None
    }

    /// Nearest included self-or-ancestor of an element within a view
    fn representative(&self, view: &View, id: ElementId) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(c) = current {
            if view.contains(c) {
                return Some(c);
            }
            current = self.elements[c.0].parent;
        }
        None
    }

    /// Rebuild a view's represented relationships from its current elements
    ///
    /// A model relationship is represented when both endpoints resolve to an
    /// included element and the two representatives differ.
    pub fn refresh_relationships(&self, view: &mut View) {
        view.relationships.clear();
        for rel in &self.relationships {
            let source = self.representative(view, rel.source);
            let target = self.representative(view, rel.target);
            if let (Some(source), Some(target)) = (source, target) {
                if source != target {
                    view.relationships.push(ViewRelationship {
                        relationship: rel.id,
                        source,
                        target,
                    });
                }
            }
        }
    }

    /// Compute summary counts
    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats {
            persons: 0,
            software_systems: 0,
            synthetic_systems: 0,
            containers: 0,
            components: 0,
            relationships: self.relationships.len(),
            views: self.views.len(),
        };
        for element in &self.elements {
            match element.kind {
                ElementKind::Person => stats.persons += 1,
                ElementKind::SoftwareSystem => {
                    stats.software_systems += 1;
                    if element.is_synthetic() {
                        stats.synthetic_systems += 1;
                    }
                }
                ElementKind::Container => stats.containers += 1,
                ElementKind::Component => stats.components += 1,
            }
        }
        stats
    }
}
