use crate::animation::TimingFunction;
use crate::color::Color;
use crate::geometry::{Corner, Viewport};

/// Per-transition configuration. Every field has a default; only the viewport
/// must be supplied.
///
/// The physics constants are aesthetic tuning values, not physically derived
/// ones — in particular the stillness thresholds and the hop damping factor
/// were chosen for how the trajectory looks and are preserved here as named
/// defaults rather than re-derived.
#[derive(Clone, Debug)]
pub struct TransitionConfig {
    /// Screen the transition plays on; collision bounds derive from it.
    pub viewport: Viewport,

    /// Corner radius the overlay starts with.
    pub initial_corner_radius: f32,
    /// Background color the overlay starts with.
    pub initial_color: Color,
    /// Corner radius morphed to during flight.
    pub target_corner_radius: f32,
    /// Background color morphed to during flight.
    pub target_color: Color,

    /// Screen corner the element is launched towards.
    pub corner: Corner,
    /// Inset from every screen edge for the collision bounds, in px.
    pub margin: f32,

    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Per-second exponential damping applied to velocity in the air.
    pub air_drag: f32,
    /// Velocity retained after a floor bounce.
    pub restitution: f32,
    /// Per-second exponential damping of horizontal velocity on the ground.
    pub ground_friction: f32,
    /// Velocity retained after a wall bounce.
    pub wall_restitution: f32,
    /// Initial launch speed towards the corner, in px/s.
    pub launch_speed: f32,

    /// Distance below the top margin the final hop aims for, in px.
    pub apex_pad: f32,
    /// Duration of the takeoff/impact squash-stretch, in ms.
    pub hop_stretch_ms: f32,
    /// Duration of the settle beat between landing and flight, in ms.
    pub landing_pause_ms: f32,

    /// Duration of the exact ballistic flight, in ms.
    pub flight_time_ms: f32,
    /// Duration of the size/color/radius morph, in ms.
    pub morph_ms: f32,
    /// Easing for the morph tweens.
    pub morph_easing: TimingFunction,
    /// Duration of the final pixel snap onto the target, in ms.
    pub snap_ms: f32,

    /// Duration of the simple linear strategy's single tween, in ms.
    pub linear_duration_ms: f32,

    /// Stillness threshold: max distance from the floor, in px.
    pub still_distance: f32,
    /// Stillness threshold: max horizontal speed, in px/s.
    pub still_speed_x: f32,
    /// Stillness threshold: max vertical speed, in px/s.
    pub still_speed_y: f32,
    /// Damping applied to the analytically computed hop launch velocity.
    pub hop_damping: f32,
}

impl TransitionConfig {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            initial_corner_radius: 0.0,
            initial_color: Color::WHITE,
            target_corner_radius: 12.0,
            target_color: Color::from_hex(0x0E1116),
            corner: Corner::BottomLeft,
            margin: 16.0,
            gravity: 2300.0,
            air_drag: 0.6,
            restitution: 0.56,
            ground_friction: 2.0,
            wall_restitution: 0.45,
            launch_speed: 1300.0,
            apex_pad: 12.0,
            hop_stretch_ms: 100.0,
            landing_pause_ms: 140.0,
            flight_time_ms: 650.0,
            morph_ms: 520.0,
            morph_easing: TimingFunction::ease_out_gentle(),
            snap_ms: 120.0,
            linear_duration_ms: 600.0,
            still_distance: 1.5,
            still_speed_x: 16.0,
            still_speed_y: 22.0,
            hop_damping: 0.98,
        }
    }

    pub fn corner(mut self, corner: Corner) -> Self {
        self.corner = corner;
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn corner_radii(mut self, initial: f32, target: f32) -> Self {
        self.initial_corner_radius = initial;
        self.target_corner_radius = target;
        self
    }

    pub fn colors(mut self, initial: Color, target: Color) -> Self {
        self.initial_color = initial;
        self.target_color = target;
        self
    }

    pub fn flight_time_ms(mut self, flight_time_ms: f32) -> Self {
        self.flight_time_ms = flight_time_ms;
        self
    }

    pub fn morph(mut self, morph_ms: f32, easing: TimingFunction) -> Self {
        self.morph_ms = morph_ms;
        self.morph_easing = easing;
        self
    }

    pub fn landing_pause_ms(mut self, landing_pause_ms: f32) -> Self {
        self.landing_pause_ms = landing_pause_ms;
        self
    }

    pub fn launch_speed(mut self, launch_speed: f32) -> Self {
        self.launch_speed = launch_speed;
        self
    }

    /// Flight duration in seconds, clamped away from degenerate values.
    pub(crate) fn flight_secs(&self) -> f32 {
        (self.flight_time_ms / 1000.0).max(MIN_FLIGHT_SECS)
    }
}

/// Shortest allowed ballistic flight; guards the closed-form division.
pub(crate) const MIN_FLIGHT_SECS: f32 = 0.25;
