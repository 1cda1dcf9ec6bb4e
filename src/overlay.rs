//! Text overlay
//!
//! Each frame, multiplier text is drawn centered on every partition and
//! scoreboard entry. The overlay only reads the world.

use glam::Vec2;

use crate::sim::{Body, BodyId, Label, World};

pub const FONT: &str = "14px Arial";
pub const TEXT_COLOR: &str = "white";

/// One piece of text to draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub body: BodyId,
    pub text: String,
    /// Center of the text
    pub position: Vec2,
}

/// Drawing seam for the overlay
pub trait TextSink {
    /// Draw `body`'s `text` centered (horizontally and vertically) at `position`
    fn fill_text(&mut self, body: BodyId, text: &str, position: Vec2, font: &str, color: &str);
}

/// Collects draw calls; handy for headless runs and tests
impl TextSink for Vec<TextLabel> {
    fn fill_text(&mut self, body: BodyId, text: &str, position: Vec2, _font: &str, _color: &str) {
        self.push(TextLabel {
            body,
            text: text.to_string(),
            position,
        });
    }
}

fn is_annotated(label: Label) -> bool {
    matches!(label, Label::Partition | Label::PartitionPoint)
}

fn label_of(body: &Body) -> Option<TextLabel> {
    if !is_annotated(body.label) {
        return None;
    }
    body.text().map(|text| TextLabel {
        body: body.id,
        text: text.to_string(),
        position: body.position,
    })
}

/// Labels for the current frame, in world order
pub fn labels(world: &World) -> Vec<TextLabel> {
    world.bodies().iter().filter_map(label_of).collect()
}

/// Label for one body; `None` if it has gone or carries no text
pub fn label_for(world: &World, id: BodyId) -> Option<TextLabel> {
    world.get(id).and_then(label_of)
}

/// Draw labels for the given bodies, re-reading each one so a body removed
/// since the list was taken is simply skipped
pub fn draw(world: &World, bodies: &[BodyId], sink: &mut dyn TextSink) -> usize {
    let mut drawn = 0;
    for &id in bodies {
        if let Some(label) = label_for(world, id) {
            sink.fill_text(label.body, &label.text, label.position, FONT, TEXT_COLOR);
            drawn += 1;
        }
    }
    drawn
}

/// Draw every label in the world
pub fn draw_frame(world: &World, sink: &mut dyn TextSink) -> usize {
    let ids: Vec<BodyId> = world.bodies().iter().map(|b| b.id).collect();
    draw(world, &ids, sink)
}
