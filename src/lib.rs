//! Surveyor - Derive C4 architecture views from a typed system graph
//!
//! Projects a graph of tagged vertices into a C4 model: vertices classify
//! into Systems, Persons, Containers, and Components; containers referencing
//! absent systems get synthetic parents; interactions replay as styled
//! relationships; and context, container, component, and landscape views are
//! derived with pruning and flattening rules. The result is written as a
//! single JSON architecture document.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod model;
pub mod projection;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use export::JsonExporter;
pub use graph::{parse_graph, read_graph, SystemGraph};
pub use model::C4Model;
pub use projection::Projector;
