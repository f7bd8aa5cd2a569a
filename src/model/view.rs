// Views over the derived model
//
// A view holds an ordered set of element ids plus the resolved
// relationships represented between them. Resolution itself needs the
// element tree and lives on C4Model; the operations here are the
// membership and pruning mechanics views apply to themselves.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::element::ElementId;
use crate::model::relationship::RelationshipId;

/// The four view categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewKind {
    SystemLandscape,
    SystemContext,
    Container,
    Component,
}

/// Rank direction hint for downstream automatic layout
///
/// Serialized camelCase like the rest of the document; config files may
/// also spell the kebab-case forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankDirection {
    #[serde(alias = "top-bottom")]
    TopBottom,
    #[default]
    #[serde(alias = "left-right")]
    LeftRight,
}

impl std::str::FromStr for RankDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-bottom" => Ok(RankDirection::TopBottom),
            "left-right" => Ok(RankDirection::LeftRight),
            other => Err(format!(
                "unknown rank direction '{}' (expected 'top-bottom' or 'left-right')",
                other
            )),
        }
    }
}

/// Automatic layout request carried on a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticLayout {
    pub rank_direction: RankDirection,
}

/// A model relationship as represented within one view
///
/// Source and target are the representatives the endpoints resolved to,
/// which may be ancestors of the original endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRelationship {
    pub relationship: RelationshipId,
    pub source: ElementId,
    pub target: ElementId,
}

/// One derived diagram view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub key: String,
    pub kind: ViewKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<ElementId>,
    pub elements: Vec<ElementId>,
    pub relationships: Vec<ViewRelationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatic_layout: Option<AutomaticLayout>,
}

impl View {
    pub fn new(key: impl Into<String>, kind: ViewKind, subject: Option<ElementId>) -> Self {
        Self {
            key: key.into(),
            kind,
            subject,
            elements: Vec::new(),
            relationships: Vec::new(),
            automatic_layout: None,
        }
    }

    /// Include an element, keeping insertion order and ignoring repeats
    pub fn add(&mut self, id: ElementId) {
        if !self.contains(id) {
            self.elements.push(id);
        }
    }

    /// Drop an element from the view
    pub fn remove(&mut self, id: ElementId) {
        self.elements.retain(|e| *e != id);
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    /// Keep only the represented relationships the predicate accepts
    pub fn retain_relationships<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ViewRelationship) -> bool,
    {
        self.relationships.retain(|r| keep(r));
    }

    /// Ids acting as an endpoint of at least one represented relationship
    pub fn connected_ids(&self) -> HashSet<ElementId> {
        self.relationships
            .iter()
            .flat_map(|r| [r.source, r.target])
            .collect()
    }

    /// Remove included elements with no represented relationship, limited
    /// to those the predicate marks eligible
    pub fn remove_unconnected_where<F>(&mut self, mut eligible: F)
    where
        F: FnMut(ElementId) -> bool,
    {
        let connected = self.connected_ids();
        self.elements
            .retain(|id| connected.contains(id) || !eligible(*id));
    }

    /// Remove every included element with no represented relationship
    pub fn remove_unconnected(&mut self) {
        self.remove_unconnected_where(|_| true);
    }

    pub fn enable_automatic_layout(&mut self, direction: RankDirection) {
        self.automatic_layout = Some(AutomaticLayout {
            rank_direction: direction,
        });
    }
}

/// Build a key fragment from an element name: lowercase alphanumerics with
/// single dashes in place of everything else
pub fn sanitize_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !key.is_empty() {
                key.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                key.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    key
}
