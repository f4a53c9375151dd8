//! The continuously updated pose the style projector reads every frame.

use crate::color::Color;
use crate::geometry::AnchorGeometry;

/// Position, size, corner radius, color, rotation, and squash/stretch of the
/// overlay element.
///
/// One pose is owned by exactly one animation strategy for the lifetime of a
/// transition. `x`/`y` are the absolute screen coordinates of the element's
/// top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPose {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub color: Color,
    pub rotation_deg: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl AnimationPose {
    /// Seed a pose from a freshly captured source anchor.
    pub fn from_anchor(anchor: &AnchorGeometry, corner_radius: f32, color: Color) -> Self {
        Self {
            x: anchor.page_x,
            y: anchor.page_y,
            width: anchor.width,
            height: anchor.height,
            corner_radius,
            color,
            rotation_deg: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Default for AnimationPose {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            corner_radius: 0.0,
            color: Color::WHITE,
            rotation_deg: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_anchor_seeds_absolute_position() {
        let anchor = AnchorGeometry::new(1.0, 2.0, 100.0, 50.0, 10.0, 20.0);
        let pose = AnimationPose::from_anchor(&anchor, 4.0, Color::WHITE);

        assert_eq!(pose.x, 10.0);
        assert_eq!(pose.y, 20.0);
        assert_eq!(pose.width, 100.0);
        assert_eq!(pose.height, 50.0);
        assert_eq!(pose.corner_radius, 4.0);
        assert_eq!(pose.rotation_deg, 0.0);
        assert_eq!(pose.scale_x, 1.0);
        assert_eq!(pose.scale_y, 1.0);
    }
}
