// View derivation
//
// Views are derived only once all elements and relationships exist.
// Each recipe picks its included elements, lifts outside endpoints of
// subtree-touching relationships to a counterpart worth showing at the
// view's level, then refreshes represented relationships and prunes
// unconnected elements.

use std::collections::BTreeMap;

use crate::model::{
    sanitize_key, C4Model, ElementId, ElementKind, RankDirection, View, ViewKind,
};

pub struct ViewDeriver<'a> {
    direction: RankDirection,
    landscapes: &'a BTreeMap<String, Vec<ElementId>>,
}

impl<'a> ViewDeriver<'a> {
    pub fn new(direction: RankDirection, landscapes: &'a BTreeMap<String, Vec<ElementId>>) -> Self {
        Self {
            direction,
            landscapes,
        }
    }

    /// Derive every view and attach them to the model
    pub fn derive(&self, model: &mut C4Model) {
        let mut views = Vec::new();

        let systems: Vec<ElementId> = model.software_systems().map(|e| e.id).collect();
        for system in systems {
            views.push(self.context_view(model, system));

            let containers: Vec<ElementId> = model
                .children_of_kind(system, ElementKind::Container)
                .map(|e| e.id)
                .collect();
            if !containers.is_empty() {
                views.push(self.container_view(model, system));
            }
            for container in containers {
                let has_components = model
                    .children_of_kind(container, ElementKind::Component)
                    .next()
                    .is_some();
                if has_components {
                    views.push(self.component_view(model, system, container));
                }
            }
        }

        // BTreeMap iteration orders landscape views by tag
        for (tag, members) in self.landscapes {
            views.push(self.landscape_view(model, tag, members));
        }

        for view in views {
            model.add_view(view);
        }
    }

    /// The system plus its relationship partners lifted to top level
    fn context_view(&self, model: &C4Model, system: ElementId) -> View {
        let name = &model.element(system).name;
        let mut view = View::new(
            format!("context-{}", sanitize_key(name)),
            ViewKind::SystemContext,
            Some(system),
        );
        view.add(system);

        for rel in model.relationships() {
            let source_in = model.in_subtree(rel.source, system);
            let target_in = model.in_subtree(rel.target, system);
            if source_in != target_in {
                let outside = if source_in { rel.target } else { rel.source };
                view.add(model.root_of(outside));
            }
        }

        model.refresh_relationships(&mut view);
        view.retain_relationships(|r| r.source == system || r.target == system);
        view.remove_unconnected();
        view.enable_automatic_layout(self.direction);
        view
    }

    /// The system's containers plus lifted outside partners
    fn container_view(&self, model: &C4Model, system: ElementId) -> View {
        let name = &model.element(system).name;
        let mut view = View::new(
            format!("container-{}", sanitize_key(name)),
            ViewKind::Container,
            Some(system),
        );
        for container in model.children_of_kind(system, ElementKind::Container) {
            view.add(container.id);
        }

        for rel in model.relationships() {
            let source_in = model.in_subtree(rel.source, system);
            let target_in = model.in_subtree(rel.target, system);
            if source_in != target_in {
                let outside = if source_in { rel.target } else { rel.source };
                view.add(model.root_of(outside));
            }
        }

        flatten_synthetic(model, &mut view);
        model.refresh_relationships(&mut view);
        view.remove_unconnected();
        view.enable_automatic_layout(self.direction);
        view
    }

    /// A container's components plus partners lifted to container or
    /// top level depending on which side of the system they sit
    fn component_view(&self, model: &C4Model, system: ElementId, container: ElementId) -> View {
        let system_name = sanitize_key(&model.element(system).name);
        let container_name = sanitize_key(&model.element(container).name);
        let mut view = View::new(
            format!("component-{}-{}", system_name, container_name),
            ViewKind::Component,
            Some(container),
        );
        for component in model.children_of_kind(container, ElementKind::Component) {
            view.add(component.id);
        }

        for rel in model.relationships() {
            let source_in = model.in_subtree(rel.source, container);
            let target_in = model.in_subtree(rel.target, container);
            if source_in != target_in {
                let outside = if source_in { rel.target } else { rel.source };
                let lifted = if model.in_subtree(outside, system) {
                    match model.ancestor_of_kind(outside, ElementKind::Container) {
                        Some(sibling) => sibling,
                        None => outside,
                    }
                } else {
                    model.root_of(outside)
                };
                view.add(lifted);
            }
        }

        flatten_synthetic(model, &mut view);
        model.refresh_relationships(&mut view);
        view.remove_unconnected();
        view.enable_automatic_layout(self.direction);
        view
    }

    /// All systems registered under a landscape tag plus every person
    fn landscape_view(&self, model: &C4Model, tag: &str, members: &[ElementId]) -> View {
        let mut view = View::new(
            format!("landscape-{}", sanitize_key(tag)),
            ViewKind::SystemLandscape,
            None,
        );
        for &system in members {
            view.add(system);
        }
        for person in model.persons() {
            view.add(person.id);
        }

        model.refresh_relationships(&mut view);
        view.remove_unconnected_where(|id| model.element(id).kind != ElementKind::Person);
        view.enable_automatic_layout(self.direction);
        view
    }
}

/// Replace every included synthetic system with its containers, in place
fn flatten_synthetic(model: &C4Model, view: &mut View) {
    let mut i = 0;
    while i < view.elements.len() {
        let id = view.elements[i];
        if !model.element(id).is_synthetic() {
            i += 1;
            continue;
        }
        view.elements.remove(i);
        let spliced: Vec<ElementId> = model
            .children_of_kind(id, ElementKind::Container)
            .map(|e| e.id)
            .filter(|c| !view.elements.contains(c))
            .collect();
        for (offset, child) in spliced.iter().enumerate() {
            view.elements.insert(i + offset, *child);
        }
        i += spliced.len();
    }
}
