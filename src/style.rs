//! Projection of an [`AnimationPose`] into concrete render properties for the
//! overlay layer.

use crate::color::Color;
use crate::pose::AnimationPose;
use crate::transform::Transform;

/// Drop shadow of the floating overlay element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset: (f32, f32),
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: (f32, f32), blur: f32, spread: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            spread,
            color,
        }
    }

    pub fn simple(offset: (f32, f32), blur: f32, color: Color) -> Self {
        Self::new(offset, blur, 0.0, color)
    }
}

/// Everything the host needs to draw the overlay for one frame.
///
/// The transform carries position, rotation, and squash/stretch; width and
/// height are laid out untransformed and scaled visually, so text and other
/// content deform with the element instead of reflowing every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub transform: Transform,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub background: Color,
    pub shadow: Shadow,
    pub elevation: f32,
}

/// Maps poses to render styles.
///
/// The shadow and elevation are deliberately constant across the whole
/// transition; animating them per-frame reads as flicker at this motion speed.
pub struct StyleProjector {
    shadow: Shadow,
    elevation: f32,
}

impl StyleProjector {
    pub fn new() -> Self {
        Self {
            shadow: Shadow::simple((0.0, 4.0), 8.0, Color::rgba(0.0, 0.0, 0.0, 0.25)),
            elevation: 6.0,
        }
    }

    pub fn with_shadow(mut self, shadow: Shadow, elevation: f32) -> Self {
        self.shadow = shadow;
        self.elevation = elevation;
        self
    }

    /// Project one frame's pose into render properties.
    pub fn project(&self, pose: &AnimationPose) -> RenderStyle {
        // Scale first, then rotate, then translate to the absolute position.
        let local = Transform::rotate_degrees(pose.rotation_deg)
            .then(&Transform::scale_xy(pose.scale_x, pose.scale_y));
        let transform = Transform::translate(pose.x, pose.y).then(&local);

        RenderStyle {
            transform,
            width: pose.width,
            height: pose.height,
            corner_radius: pose.corner_radius,
            background: pose.color,
            shadow: self.shadow,
            elevation: self.elevation,
        }
    }
}

impl Default for StyleProjector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_pose_projects_to_translation_only() {
        let pose = AnimationPose {
            x: 30.0,
            y: 40.0,
            width: 100.0,
            height: 50.0,
            ..AnimationPose::default()
        };
        let style = StyleProjector::new().project(&pose);

        assert_eq!(style.width, 100.0);
        assert_eq!(style.height, 50.0);
        let (x, y) = style.transform.transform_point(0.0, 0.0);
        assert!((x - 30.0).abs() < 1e-5);
        assert!((y - 40.0).abs() < 1e-5);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let pose = AnimationPose {
            x: 10.0,
            y: 0.0,
            scale_x: 2.0,
            scale_y: 0.5,
            ..AnimationPose::default()
        };
        let style = StyleProjector::new().project(&pose);

        // A local point (4, 4) scales to (8, 2) before the translation.
        let (x, y) = style.transform.transform_point(4.0, 4.0);
        assert!((x - 18.0).abs() < 1e-5);
        assert!((y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_applies_after_scale() {
        let pose = AnimationPose {
            rotation_deg: 90.0,
            scale_x: 2.0,
            ..AnimationPose::default()
        };
        let style = StyleProjector::new().project(&pose);

        // (1, 0) scales to (2, 0), then rotates 90 degrees to (0, 2).
        let (x, y) = style.transform.transform_point(1.0, 0.0);
        assert!(x.abs() < 1e-5);
        assert!((y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_pose_visuals_carry_through() {
        let pose = AnimationPose {
            corner_radius: 12.0,
            color: Color::from_hex(0x0E1116),
            ..AnimationPose::default()
        };
        let style = StyleProjector::new().project(&pose);

        assert_eq!(style.corner_radius, 12.0);
        assert_eq!(style.background, Color::from_hex(0x0E1116));
        assert_eq!(style.elevation, 6.0);
        assert_eq!(style.shadow.offset, (0.0, 4.0));
    }
}
