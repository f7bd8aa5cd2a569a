// Relationships between derived elements

use serde::{Deserialize, Serialize};

use crate::model::element::{ElementCategory, ElementId};

/// Unique identifier for a relationship, an index into the model's
/// relationship list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationshipId(pub usize);

/// Rendering hint attached to a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionStyle {
    Synchronous,
    Asynchronous,
}

/// A directed, described connection between two elements
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: RelationshipId,
    pub source: ElementId,
    pub target: ElementId,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_style: Option<InteractionStyle>,
}

/// Pick the interaction style for a source/target category pair
///
/// Every pairing is explicitly Synchronous except Structural -> Custom,
/// which stays unset so the renderer applies its own default.
pub fn interaction_style(
    source: ElementCategory,
    target: ElementCategory,
) -> Option<InteractionStyle> {
    match (source, target) {
        (ElementCategory::Custom, ElementCategory::Custom) => Some(InteractionStyle::Synchronous),
        (ElementCategory::Custom, ElementCategory::Structural) => {
            Some(InteractionStyle::Synchronous)
        }
        (ElementCategory::Structural, ElementCategory::Structural) => {
            Some(InteractionStyle::Synchronous)
        }
        (ElementCategory::Structural, ElementCategory::Custom) => None,
    }
}
