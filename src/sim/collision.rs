//! Boundary collision detection and response
//!
//! A body that leaves the containment region either escapes through the gap
//! or has its velocity reflected back inward. There is no sub-tick
//! resolution: a reflected body may still sit outside the region at the end
//! of the tick and works its way back in on later ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::{CircleBoundary, SquareBoundary};
use crate::cartesian_to_polar;
use crate::consts::NUDGE_EPSILON;

/// Where a body crossed a circular wall
#[derive(Debug, Clone, Copy)]
pub struct CircleCrossing {
    /// Angle of the body from the circle center ([0, 2π))
    pub angle: f32,
    /// Unit vector from the center toward the body
    pub normal: Vec2,
    /// Distance of the body center from the circle center
    pub distance: f32,
}

/// Locate a body relative to a circular wall
pub fn circle_crossing(circle: &CircleBoundary, pos: Vec2) -> CircleCrossing {
    let offset = pos - circle.center;
    let (distance, angle) = cartesian_to_polar(offset);
    CircleCrossing {
        angle,
        normal: offset.normalize_or_zero(),
        distance,
    }
}

/// Which square edges a body has crossed (any combination, corners set two)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareCrossing {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

/// Classify which edges of the body's allowed region `pos` lies beyond
pub fn square_crossing(square: &SquareBoundary, pos: Vec2, body_radius: f32) -> SquareCrossing {
    let limit = square.inner_half_extent(body_radius);
    let d = pos - square.center;
    SquareCrossing {
        left: d.x < -limit,
        right: d.x > limit,
        top: d.y < -limit,
        bottom: d.y > limit,
    }
}

/// Whether a square crossing goes out through the gap
pub fn square_gap_escape(square: &SquareBoundary, pos: Vec2, crossing: SquareCrossing) -> bool {
    if !square.gap_contains_x(pos.x) {
        return false;
    }
    (crossing.top && square.gap_edges.includes_top())
        || (crossing.bottom && square.gap_edges.includes_bottom())
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect off a circular wall, only if the body is still heading outward
///
/// Returns `None` when the body already moves inward, which happens when a
/// previous bounce left it outside the containment radius.
pub fn reflect_circle(velocity: Vec2, crossing: &CircleCrossing) -> Option<Vec2> {
    if velocity.dot(crossing.normal) > 0.0 {
        Some(reflect_velocity(velocity, crossing.normal))
    } else {
        None
    }
}

/// Axis-separable reflection off a square wall
///
/// Each crossed edge turns the matching velocity component inward; a corner
/// crossing turns both. A component already pointing inward is left alone.
pub fn reflect_square(velocity: Vec2, crossing: SquareCrossing) -> Vec2 {
    let mut v = velocity;
    if (crossing.right && v.x > 0.0) || (crossing.left && v.x < 0.0) {
        v.x = -v.x;
    }
    if (crossing.bottom && v.y > 0.0) || (crossing.top && v.y < 0.0) {
        v.y = -v.y;
    }
    v
}

/// Position correction applied after a circular bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeMode {
    /// Leave the body where it is
    #[default]
    None,
    /// Step each axis by the wall overlap in the direction of travel,
    /// `p += v * overlap / (|v| + eps)` per component
    Legacy,
    /// Move the body back along the wall normal onto the containment radius
    Normal,
}

/// Correct the position of a body that just bounced off a circle
pub fn push_out(
    mode: NudgeMode,
    circle: &CircleBoundary,
    pos: Vec2,
    vel: Vec2,
    body_radius: f32,
) -> Vec2 {
    match mode {
        NudgeMode::None => pos,
        NudgeMode::Legacy => {
            let overlap = circle.radius - pos.distance(circle.center);
            Vec2::new(
                pos.x + vel.x * overlap / (vel.x.abs() + NUDGE_EPSILON),
                pos.y + vel.y * overlap / (vel.y.abs() + NUDGE_EPSILON),
            )
        }
        NudgeMode::Normal => {
            let crossing = circle_crossing(circle, pos);
            let penetration = crossing.distance - (circle.radius - body_radius);
            if penetration > 0.0 {
                pos - crossing.normal * penetration
            } else {
                pos
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boundary::{GapArc, GapEdges};
    use crate::polar_to_cartesian;
    use std::f32::consts::PI;

    fn circle() -> CircleBoundary {
        CircleBoundary::new(Vec2::new(400.0, 300.0), 200.0, GapArc::from_degrees(45.0, 75.0))
    }

    fn square() -> SquareBoundary {
        SquareBoundary::new(Vec2::new(400.0, 300.0), 400.0, 60.0)
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing right, outward)
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_reflect_velocity_keeps_tangent() {
        let n = polar_to_cartesian(1.0, PI / 3.0);
        let t = Vec2::new(-n.y, n.x);
        let v = n * 4.0 + t * 1.5;
        let r = reflect_velocity(v, n);
        assert!((r.dot(n) + 4.0).abs() < 1e-4);
        assert!((r.dot(t) - 1.5).abs() < 1e-4);
        assert!((r.length() - v.length()).abs() < 1e-4);
    }

    #[test]
    fn test_circle_crossing_angle() {
        let c = circle();
        let pos = c.center + polar_to_cartesian(195.0, PI / 2.0);
        let crossing = circle_crossing(&c, pos);
        assert!((crossing.angle - PI / 2.0).abs() < 1e-5);
        assert!((crossing.distance - 195.0).abs() < 1e-3);
        assert!((crossing.normal - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_reflect_circle_ignores_inward_motion() {
        let c = circle();
        let crossing = circle_crossing(&c, Vec2::new(595.0, 300.0));
        assert_eq!(
            reflect_circle(Vec2::new(3.0, 1.0), &crossing),
            Some(Vec2::new(-3.0, 1.0))
        );
        assert_eq!(reflect_circle(Vec2::new(-3.0, 1.0), &crossing), None);
    }

    #[test]
    fn test_square_crossing_edges() {
        let s = square();
        assert_eq!(
            square_crossing(&s, Vec2::new(592.0, 300.0), 10.0),
            SquareCrossing {
                right: true,
                ..Default::default()
            }
        );
        let corner = square_crossing(&s, Vec2::new(205.0, 495.0), 10.0);
        assert!(corner.left && corner.bottom);
        assert!(!corner.right && !corner.top);
        assert_eq!(square_crossing(&s, Vec2::new(400.0, 300.0), 10.0), SquareCrossing::default());
    }

    #[test]
    fn test_reflect_square_axis_separable() {
        let side = SquareCrossing {
            right: true,
            ..Default::default()
        };
        assert_eq!(reflect_square(Vec2::new(3.0, -2.0), side), Vec2::new(-3.0, -2.0));

        let corner = SquareCrossing {
            left: true,
            top: true,
            ..Default::default()
        };
        assert_eq!(reflect_square(Vec2::new(-3.0, -2.0), corner), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_square_gap_escape() {
        let s = square();
        let top = SquareCrossing {
            top: true,
            ..Default::default()
        };
        assert!(square_gap_escape(&s, Vec2::new(400.0, 105.0), top));
        assert!(square_gap_escape(&s, Vec2::new(370.0, 105.0), top));
        assert!(!square_gap_escape(&s, Vec2::new(369.0, 105.0), top));

        let top_only = square().with_gap_edges(GapEdges::Top);
        let bottom = SquareCrossing {
            bottom: true,
            ..Default::default()
        };
        assert!(!square_gap_escape(&top_only, Vec2::new(400.0, 495.0), bottom));
        assert!(square_gap_escape(&s, Vec2::new(400.0, 495.0), bottom));
    }

    #[test]
    fn test_push_out_normal_lands_on_containment_radius() {
        let c = circle();
        let pos = c.center + polar_to_cartesian(196.0, 1.0);
        let out = push_out(NudgeMode::Normal, &c, pos, Vec2::new(-1.0, 0.0), 10.0);
        assert!((out.distance(c.center) - 190.0).abs() < 1e-3);
        assert!(c.contains(out, 10.0 - 1e-3));
    }

    #[test]
    fn test_push_out_legacy_steps_by_overlap() {
        let c = circle();
        // 4 units short of the wall, moving up-left after the bounce
        let pos = Vec2::new(596.0, 300.0);
        let out = push_out(NudgeMode::Legacy, &c, pos, Vec2::new(-2.0, -0.5), 10.0);
        assert!((out.x - 592.0).abs() < 1e-3);
        assert!((out.y - 296.0).abs() < 1e-3);

        // Zero velocity component does not divide by zero
        let out = push_out(NudgeMode::Legacy, &c, pos, Vec2::new(-2.0, 0.0), 10.0);
        assert!(out.y.is_finite());
        assert!((out.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_push_out_none_is_identity() {
        let c = circle();
        let pos = Vec2::new(596.0, 300.0);
        assert_eq!(push_out(NudgeMode::None, &c, pos, Vec2::X, 10.0), pos);
    }
}
