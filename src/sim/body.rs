//! Bodies and the factory functions that build them
//!
//! Every body kind has fixed material constants; callers only choose where
//! the body goes and how big it is.

use std::fmt;

use glam::Vec2;

use crate::consts::*;

/// World-assigned body handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a body is. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Ball,
    Peg,
    Partition,
    /// Scoreboard entry
    PartitionPoint,
    WallTop,
    WallBottom,
    WallLeft,
    WallRight,
}

impl Label {
    pub fn is_wall(&self) -> bool {
        self.inward_normal().is_some()
    }

    /// For walls, the unit direction from the wall into the board
    pub fn inward_normal(&self) -> Option<Vec2> {
        match self {
            Label::WallTop => Some(Vec2::Y),
            Label::WallBottom => Some(Vec2::NEG_Y),
            Label::WallLeft => Some(Vec2::X),
            Label::WallRight => Some(Vec2::NEG_X),
            _ => None,
        }
    }
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

impl Shape {
    /// Axis-aligned size (diameter for circles)
    pub fn size(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
            Shape::Rect { width, height } => Vec2::new(width, height),
        }
    }

    /// Half of `size`
    pub fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }
}

/// Physical constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub friction_air: f32,
    pub slop: f32,
    pub density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: RESTITUTION,
            friction: FRICTION,
            friction_air: FRICTION_AIR,
            slop: SLOP,
            density: DEFAULT_DENSITY,
        }
    }
}

impl Material {
    fn wall() -> Self {
        Self {
            restitution: WALL_RESTITUTION,
            density: WALL_DENSITY,
            ..Self::default()
        }
    }
}

/// Named fill colors used by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    White,
    Red,
    Navy,
    Blue,
    /// Left to the renderer
    Auto,
}

/// How a body is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub fill: Fill,
    pub line_width: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            fill: Fill::Auto,
            line_width: REST_LINE_WIDTH,
        }
    }
}

/// A physical entity owned by the `World`
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Assigned by `World::add`
    pub id: BodyId,
    pub label: Label,
    pub shape: Shape,
    pub position: Vec2,
    pub velocity: Vec2,
    pub is_static: bool,
    pub material: Material,
    pub render: RenderStyle,
    /// Overlay text, e.g. a multiplier like "2x"
    pub annotation: Option<String>,
}

impl Body {
    fn new(label: Label, shape: Shape, position: Vec2, is_static: bool) -> Self {
        Self {
            id: BodyId::default(),
            label,
            shape,
            position,
            velocity: Vec2::ZERO,
            is_static,
            material: Material::default(),
            render: RenderStyle::default(),
            annotation: None,
        }
    }

    /// Axis-aligned bounds (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = self.shape.half_extents();
        (self.position - half, self.position + half)
    }

    /// Annotation text if present and non-empty
    pub fn text(&self) -> Option<&str> {
        self.annotation.as_deref().filter(|t| !t.is_empty())
    }
}

/// Static white peg
pub fn peg(position: Vec2, radius: f32) -> Body {
    let mut body = Body::new(Label::Peg, Shape::Circle { radius }, position, true);
    body.render.fill = Fill::White;
    body
}

/// Static red scoring partition carrying its multiplier text
pub fn partition(position: Vec2, annotation: impl Into<String>) -> Body {
    let shape = Shape::Rect {
        width: PARTITION_WIDTH,
        height: PARTITION_HEIGHT,
    };
    let mut body = Body::new(Label::Partition, shape, position, true);
    body.render = RenderStyle {
        fill: Fill::Red,
        line_width: REST_LINE_WIDTH,
    };
    body.annotation = Some(annotation.into());
    body
}

/// Static blue scoreboard entry
pub fn partition_point(position: Vec2, size: Vec2, annotation: Option<String>) -> Body {
    let shape = Shape::Rect {
        width: size.x,
        height: size.y,
    };
    let mut body = Body::new(Label::PartitionPoint, shape, position, true);
    body.render.fill = Fill::Blue;
    body.annotation = annotation;
    body
}

/// Static red boundary wall
pub fn wall(label: Label, position: Vec2, width: f32, height: f32) -> Body {
    debug_assert!(label.is_wall());
    let mut body = Body::new(label, Shape::Rect { width, height }, position, true);
    body.material = Material::wall();
    body.render.fill = Fill::Red;
    body
}

/// Dynamic ball
pub fn ball(position: Vec2, radius: f32) -> Body {
    Body::new(Label::Ball, Shape::Circle { radius }, position, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_material() {
        for body in [
            peg(Vec2::ZERO, PEG_RADIUS),
            partition(Vec2::ZERO, "2x"),
            ball(Vec2::ZERO, BALL_RADIUS),
        ] {
            assert_eq!(body.material.restitution, 0.6);
            assert_eq!(body.material.friction, 0.05);
            assert_eq!(body.material.friction_air, 0.06);
            assert_eq!(body.material.slop, 0.0);
        }
    }

    #[test]
    fn test_wall_is_static_bouncy_red() {
        let w = wall(Label::WallLeft, Vec2::ZERO, WALL_THICKNESS, WALL_LENGTH);
        assert!(w.is_static);
        assert_eq!(w.material.restitution, 1.0);
        assert_eq!(w.material.density, 1.0);
        assert_eq!(w.render.fill, Fill::Red);
    }

    #[test]
    fn test_wall_normals_point_inward() {
        assert_eq!(Label::WallTop.inward_normal(), Some(Vec2::Y));
        assert_eq!(Label::WallRight.inward_normal(), Some(Vec2::NEG_X));
        assert_eq!(Label::Peg.inward_normal(), None);
        assert!(Label::WallBottom.is_wall());
        assert!(!Label::PartitionPoint.is_wall());
    }

    #[test]
    fn test_ball_is_dynamic() {
        let b = ball(Vec2::new(400.0, 0.5), BALL_RADIUS);
        assert!(!b.is_static);
        assert_eq!(b.label, Label::Ball);
        assert_eq!(b.shape.size(), Vec2::splat(20.0));
    }

    #[test]
    fn test_partition_bounds() {
        let p = partition(Vec2::new(100.0, 350.0), "10x");
        let (min, max) = p.bounds();
        assert_eq!(max - min, Vec2::new(35.0, 50.0));
        assert_eq!(p.text(), Some("10x"));
        assert_eq!(p.render.fill, Fill::Red);
    }

    #[test]
    fn test_empty_annotation_has_no_text() {
        let p = partition_point(Vec2::ZERO, Vec2::ONE, Some(String::new()));
        assert_eq!(p.text(), None);
    }
}
