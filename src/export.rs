// JSON document export
//
// The whole model is written as one camelCase JSON document. The write
// goes through a sibling temp file and a rename so a failed run never
// leaves a truncated document behind.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::model::{C4Model, Element, ElementStyle, Relationship, View};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArchitectureDocument<'a> {
    name: &'a str,
    description: &'a str,
    model: ModelSection<'a>,
    views: &'a [View],
    styles: &'a [ElementStyle],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelSection<'a> {
    elements: &'a [Element],
    relationships: &'a [Relationship],
}

/// Writes a model as a JSON architecture document
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serialize the model and write it to `path`, replacing any
    /// previous document
    pub fn export(&self, model: &C4Model, path: &Path) -> Result<()> {
        let doc = ArchitectureDocument {
            name: &model.name,
            description: &model.description,
            model: ModelSection {
                elements: model.elements(),
                relationships: model.relationships(),
            },
            views: model.views(),
            styles: model.styles(),
        };

        let mut json = if self.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        json.push('\n');

        write_atomic(path, &json)?;
        info!("wrote architecture document to {}", path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
