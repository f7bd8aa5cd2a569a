// Graph document loading
//
// Graph documents are JSON with string ids; loading resolves every
// reference to a typed VertexId up front so the projection never sees a
// dangling edge. Duplicate and unknown ids fail the load.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::graph::vertex::{ContainerKind, Item, TypeTag, VertexId};
use crate::graph::SystemGraph;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphDoc {
    #[serde(default)]
    vertices: Vec<VertexDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VertexDoc {
    id: String,
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    types: Vec<TypeTag>,
    kind: Option<ContainerKind>,
    #[serde(default)]
    landscapes: Vec<String>,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    interactions: Vec<InteractionDoc>,
    #[serde(default)]
    composed: Vec<String>,
    #[serde(default)]
    aggregated: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InteractionDoc {
    target: String,
    #[serde(default)]
    description: String,
}

/// Read a graph document from a file
pub fn read_graph(path: &Path) -> Result<SystemGraph> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_graph(&content)
}

/// Parse a graph document from a JSON string
pub fn parse_graph(json: &str) -> Result<SystemGraph> {
    let doc: GraphDoc = serde_json::from_str(json)?;
    build_graph(doc)
}

fn build_graph(doc: GraphDoc) -> Result<SystemGraph> {
    let mut graph = SystemGraph::new();
    let mut ids = HashMap::new();

    // First pass: create vertices and map document ids
    for vertex_doc in &doc.vertices {
        let name = vertex_doc.name.clone().unwrap_or_else(|| vertex_doc.id.clone());
        let id = graph.add_vertex(name, vertex_doc.description.clone(), &vertex_doc.types);
        if ids.insert(vertex_doc.id.clone(), id).is_some() {
            return Err(Error::graph(format!(
                "duplicate vertex id '{}'",
                vertex_doc.id
            )));
        }
        if let Some(kind) = vertex_doc.kind {
            graph.set_kind(id, kind);
        }
        for landscape in &vertex_doc.landscapes {
            graph.add_landscape(id, landscape.clone());
        }
        for item in &vertex_doc.items {
            graph.add_item(id, item.clone());
        }
    }

    // Second pass: resolve references now that every id is known
    for vertex_doc in &doc.vertices {
        let source = ids[&vertex_doc.id];
        for child in &vertex_doc.composed {
            let child_id = resolve(&ids, child, &vertex_doc.id, "composed")?;
            graph.compose(source, child_id);
        }
        for child in &vertex_doc.aggregated {
            let child_id = resolve(&ids, child, &vertex_doc.id, "aggregated")?;
            graph.aggregate(source, child_id);
        }
        for interaction in &vertex_doc.interactions {
            let target = resolve(&ids, &interaction.target, &vertex_doc.id, "interaction")?;
            graph.add_interaction(source, target, interaction.description.clone());
        }
    }

    Ok(graph)
}

fn resolve(
    ids: &HashMap<String, VertexId>,
    reference: &str,
    owner: &str,
    context: &str,
) -> Result<VertexId> {
    ids.get(reference).copied().ok_or_else(|| {
        Error::graph(format!(
            "vertex '{}' has {} reference to unknown id '{}'",
            owner, context, reference
        ))
    })
}
