// Relationship propagation
//
// Replays every vertex interaction onto the derived elements. Edges to
// vertices without a mapped element are skipped, never an error.

use log::debug;

use crate::graph::SystemGraph;
use crate::model::interaction_style;
use crate::projection::hierarchy::ProjectionContext;

pub struct RelationshipPropagator<'a> {
    graph: &'a SystemGraph,
}

impl<'a> RelationshipPropagator<'a> {
    pub fn new(graph: &'a SystemGraph) -> Self {
        Self { graph }
    }

    /// Replay outgoing interactions of every mapped vertex
    pub fn propagate(&self, ctx: &mut ProjectionContext) {
        for vertex in self.graph.all_vertices() {
            let source = match ctx.mapping.get(&vertex.id) {
                Some(&source) => source,
                None => continue,
            };
            for interaction in &vertex.interactions {
                let target = match ctx.mapping.get(&interaction.target) {
                    Some(&target) => target,
                    None => {
                        debug!(
                            "skipping interaction from '{}': target vertex has no element",
                            vertex.name
                        );
                        continue;
                    }
                };
                let style = interaction_style(
                    ctx.model.element(source).category(),
                    ctx.model.element(target).category(),
                );
                ctx.model
                    .add_relationship(source, target, &interaction.description, style);
            }
        }
    }
}
