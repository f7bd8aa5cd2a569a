// Element style assignment

use crate::model::{C4Model, ElementStyle, Shape};

// Queues render as a wide, short pipe
const QUEUE_WIDTH: u32 = 320;
const QUEUE_HEIGHT: u32 = 120;

/// Attach the fixed tag-to-shape styles to a model
pub fn apply_default_styles(model: &mut C4Model) {
    model.add_element_style(ElementStyle::new("Person", Shape::Person));
    model.add_element_style(ElementStyle::new("Component", Shape::RoundedBox));
    model.add_element_style(ElementStyle::new("Service", Shape::Hexagon));
    model.add_element_style(ElementStyle::new("Storage", Shape::Cylinder));
    model.add_element_style(
        ElementStyle::new("Queue", Shape::Pipe).with_size(QUEUE_WIDTH, QUEUE_HEIGHT),
    );
}
