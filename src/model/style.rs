// Element styles: shape hints selected by tag

use serde::{Deserialize, Serialize};

/// Shape a downstream renderer should draw for matching elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Person,
    RoundedBox,
    Hexagon,
    Cylinder,
    Pipe,
    Box,
}

/// A tag-selected style applied to every element carrying the tag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub tag: String,
    pub shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ElementStyle {
    pub fn new(tag: impl Into<String>, shape: Shape) -> Self {
        Self {
            tag: tag.into(),
            shape,
            width: None,
            height: None,
        }
    }

    /// Fix the rendered size of matching elements
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_without_size() {
        let style = ElementStyle::new("Service", Shape::Hexagon);
        assert_eq!(style.tag, "Service");
        assert_eq!(style.shape, Shape::Hexagon);
        assert!(style.width.is_none());
        assert!(style.height.is_none());
    }

    #[test]
    fn test_style_with_size() {
        let style = ElementStyle::new("Queue", Shape::Pipe).with_size(320, 120);
        assert_eq!(style.width, Some(320));
        assert_eq!(style.height, Some(120));
    }
}
