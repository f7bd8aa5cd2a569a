// Hierarchy construction and synthetic system synthesis
//
// Phase A creates elements for System and Person vertices, descending
// into Container and Component children. Phase B collects the system
// items of still-unmapped containers into a deferral table. Synthesis
// then fabricates one SoftwareSystem per deferred item. Running the
// phases over the whole vertex set, in that order, makes the result
// independent of vertex insertion order.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info};

use crate::graph::{Item, SystemGraph, Vertex, VertexId};
use crate::model::{C4Model, ElementId, SYNTHETIC_TAG};
use crate::projection::classify::{classify, VertexClass};

/// Shared state of one projection pass
///
/// Owned by the hierarchy phases, passed by `&mut`, and consumed when
/// view derivation takes the model out.
pub struct ProjectionContext {
    pub model: C4Model,
    /// Vertex to element mapping; the first mapping of a vertex wins
    pub mapping: HashMap<VertexId, ElementId>,
    /// Landscape tag to member systems, ordered by tag
    pub landscapes: BTreeMap<String, Vec<ElementId>>,
    deferred: Vec<DeferredGroup>,
    deferred_index: HashMap<String, usize>,
}

/// One item awaiting synthesis plus the containers deferred under it
struct DeferredGroup {
    item: Item,
    containers: Vec<VertexId>,
}

impl ProjectionContext {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            model: C4Model::new(name, description),
            mapping: HashMap::new(),
            landscapes: BTreeMap::new(),
            deferred: Vec::new(),
            deferred_index: HashMap::new(),
        }
    }

    /// Record a vertex to element mapping unless the vertex already has one
    pub fn map_vertex(&mut self, vertex: VertexId, element: ElementId) {
        self.mapping.entry(vertex).or_insert(element);
    }

    /// Register a system under a landscape tag
    pub fn register_landscape(&mut self, tag: &str, system: ElementId) {
        let members = self.landscapes.entry(tag.to_string()).or_default();
        if !members.contains(&system) {
            members.push(system);
        }
    }

    /// Finish the build phases, yielding the model and landscape groups
    pub fn into_parts(self) -> (C4Model, BTreeMap<String, Vec<ElementId>>) {
        (self.model, self.landscapes)
    }

    /// Defer a container vertex under an item, grouping items by name
    ///
    /// The first-seen item's description and landscapes win for the group.
    pub fn defer(&mut self, item: &Item, container: VertexId) {
        let index = match self.deferred_index.get(&item.name) {
            Some(&index) => index,
            None => {
                let index = self.deferred.len();
                self.deferred.push(DeferredGroup {
                    item: item.clone(),
                    containers: Vec::new(),
                });
                self.deferred_index.insert(item.name.clone(), index);
                index
            }
        };
        let group = &mut self.deferred[index];
        if !group.containers.contains(&container) {
            group.containers.push(container);
        }
    }
}

/// Create a Container element under a system from a container vertex,
/// descending into its composed Component children
fn attach_container(
    ctx: &mut ProjectionContext,
    graph: &SystemGraph,
    system: ElementId,
    vertex: &Vertex,
) -> ElementId {
    let container = ctx
        .model
        .add_container(system, &vertex.name, &vertex.description);
    if let Some(kind) = vertex.kind {
        ctx.model.element_mut(container).add_tag(kind.tag());
    }
    ctx.map_vertex(vertex.id, container);

    // Components are discovered through composition only
    for &child_id in &vertex.composed {
        if let Some(child) = graph.get(child_id) {
            if classify(child) == VertexClass::Component {
                let component = ctx
                    .model
                    .add_component(container, &child.name, &child.description);
                ctx.map_vertex(child.id, component);
            }
        }
    }
    container
}

/// Builds the element hierarchy from classified vertices
pub struct HierarchyBuilder<'a> {
    graph: &'a SystemGraph,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(graph: &'a SystemGraph) -> Self {
        Self { graph }
    }

    /// Run both hierarchy phases over the full vertex set
    pub fn build(&self, ctx: &mut ProjectionContext) {
        // Phase A: elements for System and Person vertices
        for vertex in self.graph.all_vertices() {
            match classify(vertex) {
                VertexClass::System => self.build_system(ctx, vertex),
                VertexClass::Person => {
                    let person = ctx.model.add_person(&vertex.name, &vertex.description);
                    ctx.map_vertex(vertex.id, person);
                }
                VertexClass::Container | VertexClass::Component => {}
                VertexClass::Other => {
                    debug!("ignoring vertex '{}' with no recognized type", vertex.name);
                }
            }
        }

        // Phase B: top-level containers defer their system items
        for vertex in self.graph.all_vertices() {
            if classify(vertex) != VertexClass::Container || ctx.mapping.contains_key(&vertex.id) {
                continue;
            }
            for item in vertex.system_items() {
                if ctx.model.find_system(&item.name).is_some() {
                    debug!(
                        "item '{}' on container '{}' names an existing system",
                        item.name, vertex.name
                    );
                    continue;
                }
                ctx.defer(item, vertex.id);
            }
        }
    }

    fn build_system(&self, ctx: &mut ProjectionContext, vertex: &Vertex) {
        let system = ctx
            .model
            .add_software_system(&vertex.name, &vertex.description);
        ctx.map_vertex(vertex.id, system);
        for tag in &vertex.landscapes {
            ctx.register_landscape(tag, system);
        }

        // Composition and aggregation both discover containers here
        for child_id in vertex.all_children() {
            if let Some(child) = self.graph.get(child_id) {
                if classify(child) == VertexClass::Container {
                    attach_container(ctx, self.graph, system, child);
                }
            }
        }
    }
}

/// Fabricates SoftwareSystems for deferred items
pub struct Synthesizer<'a> {
    graph: &'a SystemGraph,
}

impl<'a> Synthesizer<'a> {
    pub fn new(graph: &'a SystemGraph) -> Self {
        Self { graph }
    }

    /// Create one synthetic system per deferred item, in encounter order
    ///
    /// A container deferred under several items gets one Container element
    /// per synthetic system; its vertex mapping stays at the first.
    pub fn synthesize(&self, ctx: &mut ProjectionContext) {
        let groups = std::mem::take(&mut ctx.deferred);
        ctx.deferred_index.clear();

        for group in groups {
            info!(
                "synthesizing system '{}' for {} deferred container(s)",
                group.item.name,
                group.containers.len()
            );
            let system = ctx
                .model
                .add_software_system(&group.item.name, &group.item.description);
            ctx.model.element_mut(system).add_tag(SYNTHETIC_TAG);
            for tag in &group.item.landscapes {
                ctx.register_landscape(tag, system);
            }
            for &container_id in &group.containers {
                if let Some(vertex) = self.graph.get(container_id) {
                    attach_container(ctx, self.graph, system, vertex);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ContainerKind, TypeTag};
    use crate::model::ElementKind;

    fn ctx() -> ProjectionContext {
        ProjectionContext::new("test", "")
    }

    fn build(graph: &SystemGraph) -> ProjectionContext {
        let mut ctx = ctx();
        HierarchyBuilder::new(graph).build(&mut ctx);
        ctx
    }

    fn build_and_synthesize(graph: &SystemGraph) -> ProjectionContext {
        let mut ctx = build(graph);
        Synthesizer::new(graph).synthesize(&mut ctx);
        ctx
    }

    #[test]
    fn test_system_with_container_and_component() {
        let mut graph = SystemGraph::new();
        let shop = graph.add_vertex("Shop", "Retail shop", &[TypeTag::System]);
        let api = graph.add_vertex("API", "Public API", &[TypeTag::Container]);
        let handler = graph.add_vertex("Handler", "Request handler", &[TypeTag::Component]);
        graph.set_kind(api, ContainerKind::Service);
        graph.compose(shop, api);
        graph.compose(api, handler);

        let ctx = build(&graph);

        let system = ctx.model.find_system("Shop").unwrap();
        let containers: Vec<_> = ctx
            .model
            .children_of_kind(system.id, ElementKind::Container)
            .collect();
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "API");
        assert!(containers[0].has_tag("Service"));

        let api_element = containers[0].id;
        let components: Vec<_> = ctx
            .model
            .children_of_kind(api_element, ElementKind::Component)
            .collect();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "Handler");

        assert_eq!(ctx.mapping[&shop], system.id);
        assert_eq!(ctx.mapping[&api], api_element);
        assert_eq!(ctx.mapping[&handler], components[0].id);
    }

    #[test]
    fn test_aggregation_discovers_containers_but_not_components() {
        let mut graph = SystemGraph::new();
        let shop = graph.add_vertex("Shop", "", &[TypeTag::System]);
        let api = graph.add_vertex("API", "", &[TypeTag::Container]);
        let handler = graph.add_vertex("Handler", "", &[TypeTag::Component]);
        graph.aggregate(shop, api);
        graph.aggregate(api, handler);

        let ctx = build(&graph);

        let system = ctx.model.find_system("Shop").unwrap();
        let containers: Vec<_> = ctx
            .model
            .children_of_kind(system.id, ElementKind::Container)
            .collect();
        assert_eq!(containers.len(), 1);

        // The aggregated component must not appear
        let components: Vec<_> = ctx
            .model
            .children_of_kind(containers[0].id, ElementKind::Component)
            .collect();
        assert!(components.is_empty());
        assert!(!ctx.mapping.contains_key(&handler));
    }

    #[test]
    fn test_person_vertex_becomes_person_element() {
        let mut graph = SystemGraph::new();
        let customer = graph.add_vertex("Customer", "A shopper", &[TypeTag::Person]);

        let ctx = build(&graph);

        let persons: Vec<_> = ctx.model.persons().collect();
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].name, "Customer");
        assert_eq!(ctx.mapping[&customer], persons[0].id);
    }

    #[test]
    fn test_untyped_vertices_produce_nothing() {
        let mut graph = SystemGraph::new();
        graph.add_vertex("Mystery", "", &[]);
        graph.add_vertex("Foreign", "", &[TypeTag::Unknown]);

        let ctx = build(&graph);
        assert!(ctx.model.elements().is_empty());
        assert!(ctx.mapping.is_empty());
    }

    #[test]
    fn test_container_shared_by_two_systems_is_duplicated() {
        let mut graph = SystemGraph::new();
        let first = graph.add_vertex("First", "", &[TypeTag::System]);
        let second = graph.add_vertex("Second", "", &[TypeTag::System]);
        let shared = graph.add_vertex("Shared", "", &[TypeTag::Container]);
        graph.compose(first, shared);
        graph.aggregate(second, shared);

        let ctx = build(&graph);

        let first_system = ctx.model.find_system("First").unwrap().id;
        let second_system = ctx.model.find_system("Second").unwrap().id;
        let under_first: Vec<_> = ctx
            .model
            .children_of_kind(first_system, ElementKind::Container)
            .collect();
        let under_second: Vec<_> = ctx
            .model
            .children_of_kind(second_system, ElementKind::Container)
            .collect();
        assert_eq!(under_first.len(), 1);
        assert_eq!(under_second.len(), 1);
        assert_ne!(under_first[0].id, under_second[0].id);

        // Mapping keeps the element created first
        assert_eq!(ctx.mapping[&shared], under_first[0].id);
    }

    #[test]
    fn test_contained_container_does_not_defer_items() {
        let mut graph = SystemGraph::new();
        let shop = graph.add_vertex("Shop", "", &[TypeTag::System]);
        let worker = graph.add_vertex("Worker", "", &[TypeTag::Container]);
        graph.compose(shop, worker);
        graph.add_item(worker, Item::system("Orders", "Order management"));

        let ctx = build_and_synthesize(&graph);

        assert!(ctx.model.find_system("Orders").is_none());
        assert_eq!(ctx.model.software_systems().count(), 1);
    }

    #[test]
    fn test_item_naming_existing_system_is_ignored() {
        let mut graph = SystemGraph::new();
        graph.add_vertex("Orders", "Real system", &[TypeTag::System]);
        let worker = graph.add_vertex("Worker", "", &[TypeTag::Container]);
        graph.add_item(worker, Item::system("Orders", "Item copy"));

        let ctx = build_and_synthesize(&graph);

        let orders = ctx.model.find_system("Orders").unwrap();
        assert!(!orders.is_synthetic());
        assert_eq!(ctx.model.software_systems().count(), 1);
        assert!(!ctx.mapping.contains_key(&worker));
    }

    #[test]
    fn test_synthesis_creates_tagged_system_holding_container() {
        let mut graph = SystemGraph::new();
        let worker = graph.add_vertex("Worker", "Background worker", &[TypeTag::Container]);
        graph.set_kind(worker, ContainerKind::Service);
        graph.add_item(worker, Item::system("Orders", "Order management"));

        let ctx = build_and_synthesize(&graph);

        let orders = ctx.model.find_system("Orders").unwrap();
        assert!(orders.is_synthetic());
        assert_eq!(orders.description, "Order management");

        let containers: Vec<_> = ctx
            .model
            .children_of_kind(orders.id, ElementKind::Container)
            .collect();
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, "Worker");
        assert!(containers[0].has_tag("Service"));
        assert_eq!(ctx.mapping[&worker], containers[0].id);
    }

    #[test]
    fn test_items_grouped_by_name_first_description_wins() {
        let mut graph = SystemGraph::new();
        let worker = graph.add_vertex("Worker", "", &[TypeTag::Container]);
        let mailer = graph.add_vertex("Mailer", "", &[TypeTag::Container]);
        graph.add_item(worker, Item::system("Orders", "First description"));
        graph.add_item(mailer, Item::system("Orders", "Second description"));

        let ctx = build_and_synthesize(&graph);

        assert_eq!(ctx.model.software_systems().count(), 1);
        let orders = ctx.model.find_system("Orders").unwrap();
        assert_eq!(orders.description, "First description");

        let containers: Vec<_> = ctx
            .model
            .children_of_kind(orders.id, ElementKind::Container)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(containers, vec!["Worker", "Mailer"]);
    }

    #[test]
    fn test_container_under_two_items_fans_out() {
        let mut graph = SystemGraph::new();
        let worker = graph.add_vertex("Worker", "", &[TypeTag::Container]);
        graph.add_item(worker, Item::system("Orders", ""));
        graph.add_item(worker, Item::system("Billing", ""));

        let ctx = build_and_synthesize(&graph);

        let orders = ctx.model.find_system("Orders").unwrap().id;
        let billing = ctx.model.find_system("Billing").unwrap().id;
        let under_orders: Vec<_> = ctx
            .model
            .children_of_kind(orders, ElementKind::Container)
            .collect();
        let under_billing: Vec<_> = ctx
            .model
            .children_of_kind(billing, ElementKind::Container)
            .collect();
        assert_eq!(under_orders.len(), 1);
        assert_eq!(under_billing.len(), 1);
        assert_ne!(under_orders[0].id, under_billing[0].id);
        assert_eq!(ctx.mapping[&worker], under_orders[0].id);
    }

    #[test]
    fn test_landscape_registration() {
        let mut graph = SystemGraph::new();
        let shop = graph.add_vertex("Shop", "", &[TypeTag::System]);
        graph.add_landscape(shop, "retail");
        graph.add_landscape(shop, "web");
        let worker = graph.add_vertex("Worker", "", &[TypeTag::Container]);
        graph.add_item(
            worker,
            Item::system("Orders", "").with_landscapes(["retail"]),
        );

        let ctx = build_and_synthesize(&graph);

        let shop_element = ctx.model.find_system("Shop").unwrap().id;
        let orders_element = ctx.model.find_system("Orders").unwrap().id;
        assert_eq!(
            ctx.landscapes["retail"],
            vec![shop_element, orders_element]
        );
        assert_eq!(ctx.landscapes["web"], vec![shop_element]);
    }
}
