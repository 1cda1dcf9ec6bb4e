//! Overlap tests and contact response
//!
//! Balls are the only moving bodies, so every test is circle-vs-something.
//! Normals always point from the other body toward the circle's center,
//! except for walls, which are one-sided and always push into the board.

use glam::Vec2;

use super::body::{Body, Shape};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at contact (pointing toward the circle, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Circle against circle
pub fn circle_circle(pos: Vec2, radius: f32, other_pos: Vec2, other_radius: f32) -> CollisionResult {
    let delta = pos - other_pos;
    let dist = delta.length();
    let reach = radius + other_radius;
    if dist >= reach {
        return CollisionResult::miss();
    }

    // Concentric: pick "up" so the circle is pushed out somewhere sensible
    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::NEG_Y
    };
    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Circle against an axis-aligned rectangle given by center and half extents
pub fn circle_rect(pos: Vec2, radius: f32, center: Vec2, half: Vec2) -> CollisionResult {
    let local = pos - center;
    let closest = local.clamp(-half, half);
    let delta = local - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > f32::EPSILON {
        let dist = dist_sq.sqrt();
        if dist >= radius {
            return CollisionResult::miss();
        }
        return CollisionResult {
            hit: true,
            normal: delta / dist,
            penetration: radius - dist,
        };
    }

    // Center is inside the rectangle: exit through the nearest face
    let to_x = half.x - local.x.abs();
    let to_y = half.y - local.y.abs();
    let (normal, depth) = if to_x < to_y {
        (Vec2::new(local.x.signum(), 0.0), to_x)
    } else {
        (Vec2::new(0.0, local.y.signum()), to_y)
    };
    CollisionResult {
        hit: true,
        normal,
        penetration: depth + radius,
    }
}

/// Circle against a one-sided wall slab.
///
/// `inward` is the axis direction from the wall into the play area. Any
/// circle on the far side of the inner face (within the wall's length) is
/// a hit and gets pushed back inside, however far out it is.
pub fn circle_wall(pos: Vec2, radius: f32, center: Vec2, half: Vec2, inward: Vec2) -> CollisionResult {
    let local = pos - center;
    let tangent = inward.perp();
    if local.dot(tangent).abs() > half.dot(tangent.abs()) + radius {
        return CollisionResult::miss();
    }
    let beyond_face = local.dot(inward) - half.dot(inward.abs());
    let penetration = radius - beyond_face;
    if penetration <= 0.0 {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        normal: inward,
        penetration,
    }
}

/// Contact between a circular body and any other body
///
/// Returns a miss if `circle` is not a circle; the stepper only calls this
/// with balls.
pub fn body_contact(circle: &Body, other: &Body) -> CollisionResult {
    let Shape::Circle { radius } = circle.shape else {
        return CollisionResult::miss();
    };
    if let Some(inward) = other.label.inward_normal() {
        return circle_wall(
            circle.position,
            radius,
            other.position,
            other.shape.half_extents(),
            inward,
        );
    }
    match other.shape {
        Shape::Circle { radius: other_radius } => {
            circle_circle(circle.position, radius, other.position, other_radius)
        }
        Shape::Rect { .. } => circle_rect(
            circle.position,
            radius,
            other.position,
            other.shape.half_extents(),
        ),
    }
}

/// Bounce velocity off a surface: normal part reversed and scaled by
/// restitution, tangential part damped by friction.
///
/// Velocity already moving away from the surface is left untouched.
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f32, friction: f32) -> Vec2 {
    let approach = velocity.dot(normal);
    if approach >= 0.0 {
        return velocity;
    }
    let normal_part = normal * approach;
    let tangent_part = velocity - normal_part;
    tangent_part * (1.0 - friction) - normal_part * restitution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_circle_hit() {
        let result = circle_circle(Vec2::new(10.0, 0.0), 10.0, Vec2::ZERO, 2.0);
        assert!(result.hit);
        assert!((result.penetration - 2.0).abs() < 1e-5);
        assert_eq!(result.normal, Vec2::X);
    }

    #[test]
    fn test_circle_circle_miss() {
        let result = circle_circle(Vec2::new(13.0, 0.0), 10.0, Vec2::ZERO, 2.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_from_above() {
        // Ball resting just into the top face of a 35x50 partition
        let result = circle_rect(
            Vec2::new(0.0, -33.0),
            10.0,
            Vec2::ZERO,
            Vec2::new(17.5, 25.0),
        );
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_Y);
        assert!((result.penetration - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_rect_center_inside() {
        let result = circle_rect(Vec2::new(15.0, 0.0), 10.0, Vec2::ZERO, Vec2::new(17.5, 25.0));
        assert!(result.hit);
        // Nearest face is the right one
        assert_eq!(result.normal, Vec2::X);
        assert!((result.penetration - 12.5).abs() < 1e-5);
    }

    #[test]
    fn test_circle_rect_corner_miss() {
        let result = circle_rect(Vec2::new(25.0, 33.0), 10.0, Vec2::ZERO, Vec2::new(17.5, 25.0));
        assert!(!result.hit);
    }

    #[test]
    fn test_wall_pushes_inward_from_outside() {
        // Top wall 1600x10 centered at the origin; ball sitting above it
        let half = Vec2::new(800.0, 5.0);
        let result = circle_wall(Vec2::new(400.0, -34.6), 10.0, Vec2::ZERO, half, Vec2::Y);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        // Back to y = 5 + 10
        assert!((result.penetration - 49.6).abs() < 1e-3);
    }

    #[test]
    fn test_wall_contact_from_inside() {
        let half = Vec2::new(5.0, 800.0);
        // Right wall at x = 800, ball 3px into its inner face
        let result = circle_wall(Vec2::new(788.0, 300.0), 10.0, Vec2::new(800.0, 0.0), half, Vec2::NEG_X);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 3.0).abs() < 1e-4);

        let clear = circle_wall(Vec2::new(700.0, 300.0), 10.0, Vec2::new(800.0, 0.0), half, Vec2::NEG_X);
        assert!(!clear.hit);
    }

    #[test]
    fn test_wall_ignores_bodies_past_its_ends() {
        let half = Vec2::new(800.0, 5.0);
        let result = circle_wall(Vec2::new(900.0, 0.0), 10.0, Vec2::ZERO, half, Vec2::Y);
        assert!(!result.hit);
    }

    #[test]
    fn test_bounce_velocity_restitution() {
        let bounced = bounce_velocity(Vec2::new(10.0, 100.0), Vec2::NEG_Y, 0.6, 0.05);
        assert!((bounced.y - (-60.0)).abs() < 1e-4);
        assert!((bounced.x - 9.5).abs() < 1e-4);
    }

    #[test]
    fn test_bounce_ignores_separating_velocity() {
        let v = Vec2::new(0.0, -50.0);
        assert_eq!(bounce_velocity(v, Vec2::NEG_Y, 0.6, 0.05), v);
    }
}
