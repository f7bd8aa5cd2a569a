// Projection: derives the C4 model from a system graph

pub mod classify;
pub mod hierarchy;
pub mod relations;
pub mod styles;
pub mod views;

pub use classify::*;
pub use hierarchy::*;
pub use relations::*;
pub use styles::*;
pub use views::*;

use log::info;

use crate::config::Config;
use crate::graph::SystemGraph;
use crate::model::{C4Model, RankDirection};

/// Main engine that runs the projection pipeline over a graph
pub struct Projector {
    name: String,
    description: String,
    direction: RankDirection,
}

impl Projector {
    /// Create a projector from the effective configuration
    pub fn new(config: &Config) -> Self {
        Self {
            name: config.project.name.clone(),
            description: config.project.description.clone(),
            direction: config.layout.direction,
        }
    }

    /// Project a graph into a fully populated, styled, view-bearing model
    pub fn project(&self, graph: &SystemGraph) -> C4Model {
        let mut ctx = ProjectionContext::new(&self.name, &self.description);

        // Step 1: Classify vertices and build the element hierarchy
        HierarchyBuilder::new(graph).build(&mut ctx);

        // Step 2: Synthesize systems for deferred item references
        Synthesizer::new(graph).synthesize(&mut ctx);

        // Step 3: Replay interactions as relationships
        RelationshipPropagator::new(graph).propagate(&mut ctx);

        // Step 4: Derive views from the finished model
        let (mut model, landscapes) = ctx.into_parts();
        ViewDeriver::new(self.direction, &landscapes).derive(&mut model);

        // Step 5: Apply element styles
        apply_default_styles(&mut model);

        let stats = model.stats();
        info!(
            "projected {} vertices into {} elements, {} relationships, {} views",
            graph.len(),
            model.elements().len(),
            stats.relationships,
            stats.views
        );
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ContainerKind, Item, TypeTag};
    use crate::model::{ElementKind, InteractionStyle, ViewKind};

    fn projector() -> Projector {
        Projector::new(&Config::default())
    }

    #[test]
    fn test_project_empty_graph() {
        let model = projector().project(&SystemGraph::new());

        assert!(model.elements().is_empty());
        assert!(model.views().is_empty());

        // Styles are attached regardless
        assert_eq!(model.styles().len(), 5);
    }

    #[test]
    fn test_project_checkout_scenario() {
        let mut graph = SystemGraph::new();
        let checkout = graph.add_vertex("Checkout", "Checkout flow", &[TypeTag::System]);
        let api = graph.add_vertex("API", "Public API", &[TypeTag::Container]);
        let handler = graph.add_vertex("Handler", "Request handler", &[TypeTag::Component]);
        let customer = graph.add_vertex("Customer", "A shopper", &[TypeTag::Person]);
        graph.set_kind(api, ContainerKind::Service);
        graph.compose(checkout, api);
        graph.compose(api, handler);
        graph.add_interaction(customer, api, "submits order");

        let model = projector().project(&graph);

        let stats = model.stats();
        assert_eq!(stats.software_systems, 1);
        assert_eq!(stats.containers, 1);
        assert_eq!(stats.components, 1);
        assert_eq!(stats.persons, 1);
        assert_eq!(stats.relationships, 1);

        let api_element = model.find_system("Checkout").unwrap().children[0];
        assert!(model.element(api_element).has_tag("Service"));

        let rel = &model.relationships()[0];
        assert_eq!(rel.description, "submits order");
        assert_eq!(rel.interaction_style, Some(InteractionStyle::Synchronous));

        let keys: Vec<&str> = model.views().iter().map(|v| v.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["context-checkout", "container-checkout", "component-checkout-api"]
        );
    }

    #[test]
    fn test_project_synthesizes_missing_system() {
        let mut graph = SystemGraph::new();
        let worker = graph.add_vertex("Worker", "Background worker", &[TypeTag::Container]);
        graph.add_item(worker, Item::system("Orders", "Order management"));

        let model = projector().project(&graph);

        let orders = model.find_system("Orders").unwrap();
        assert!(orders.is_synthetic());

        let containers: Vec<_> = model
            .children_of_kind(orders.id, ElementKind::Container)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(containers, vec!["Worker"]);
    }

    #[test]
    fn test_project_is_insertion_order_independent() {
        // Same topology, children declared before their parents
        let mut graph = SystemGraph::new();
        let handler = graph.add_vertex("Handler", "", &[TypeTag::Component]);
        let api = graph.add_vertex("API", "", &[TypeTag::Container]);
        let checkout = graph.add_vertex("Checkout", "", &[TypeTag::System]);
        graph.compose(api, handler);
        graph.compose(checkout, api);

        let model = projector().project(&graph);

        let system = model.find_system("Checkout").unwrap();
        let api_element = model
            .children_of_kind(system.id, ElementKind::Container)
            .next()
            .unwrap();
        let components: Vec<_> = model
            .children_of_kind(api_element.id, ElementKind::Component)
            .collect();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "Handler");
    }

    #[test]
    fn test_project_emits_landscape_views() {
        let mut graph = SystemGraph::new();
        let shop = graph.add_vertex("Shop", "", &[TypeTag::System]);
        let billing = graph.add_vertex("Billing", "", &[TypeTag::System]);
        graph.add_landscape(shop, "retail");
        graph.add_landscape(billing, "retail");
        graph.add_interaction(shop, billing, "bills through");

        let model = projector().project(&graph);

        let landscape = model
            .views()
            .iter()
            .find(|v| v.kind == ViewKind::SystemLandscape)
            .unwrap();
        assert_eq!(landscape.key, "landscape-retail");
        assert_eq!(landscape.elements.len(), 2);
    }
}
