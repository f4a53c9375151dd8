//! The physics-based strategy: corner launch, bouncing free fall, a final
//! hop, a settle beat, then a closed-form ballistic flight that lands exactly
//! on the target.

use log::{debug, trace};

use super::config::TransitionConfig;
use super::{AnimationStrategy, StrategyEvent};
use crate::animation::{AdvanceResult, TimingFunction, Transition, Tween};
use crate::color::Color;
use crate::geometry::{AnchorGeometry, Point};
use crate::pose::AnimationPose;

/// Largest physics step, in seconds. Slow frames are clamped to this so the
/// element cannot tunnel through the floor or walls.
const MAX_STEP_SECS: f32 = 0.032;

/// Vertical share of the launch speed; biases the initial lob below horizontal.
const LAUNCH_VERTICAL_DAMP: f32 = 0.6;
/// Horizontal damping applied at hop takeoff.
const HOP_HORIZONTAL_DAMP: f32 = 0.6;
/// Horizontal damping applied at the post-hop landing.
const LANDING_HORIZONTAL_DAMP: f32 = 0.6;
/// Cap on the impact squash magnitude.
const IMPACT_SQUASH_MAX: f32 = 0.22;
/// Impact speed that would produce the maximum squash, in px/s.
const IMPACT_SQUASH_SPEED: f32 = 2600.0;
/// Takeoff squash/stretch applied when the hop launches.
const TAKEOFF_SCALE: (f32, f32) = (0.94, 1.06);
/// Duration of the squash recovery started at the mid-hop point, in ms.
const MID_HOP_RECOVER_MS: f32 = 140.0;
/// Minimum hop climb height, in px.
const MIN_CLIMB: f32 = 8.0;
/// Minimum effective rolling radius, in px.
const MIN_ROLL_RADIUS: f32 = 8.0;
/// Minimum launch direction length; guards the normalization division.
const MIN_LAUNCH_LEN: f32 = 1.0;

/// Discrete stage of the physics transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FreeFall,
    LandingPause,
    BallisticFlight,
    Done,
}

/// Normalize an angle to the equivalent one in (-180, 180] degrees.
fn normalize_deg(deg: f32) -> f32 {
    let wrapped = (deg % 360.0 + 540.0) % 360.0 - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Closed-form trajectory for the final leg: start position and launch
/// velocity solved so that, under constant gravity, the element reaches the
/// target's top-left exactly at the configured duration.
#[derive(Debug, Clone, Copy)]
struct FlightState {
    x0: f32,
    y0: f32,
    vx0: f32,
    vy0: f32,
    duration_secs: f32,
    target_x: f32,
    target_y: f32,
}

impl FlightState {
    fn solve(start: Point, target: Point, duration_secs: f32, gravity: f32) -> Self {
        let vx0 = (target.x - start.x) / duration_secs;
        let vy0 =
            (target.y - start.y - 0.5 * gravity * duration_secs * duration_secs) / duration_secs;
        Self {
            x0: start.x,
            y0: start.y,
            vx0,
            vy0,
            duration_secs,
            target_x: target.x,
            target_y: target.y,
        }
    }

    /// Position at `progress` in [0, 1], computed directly from the equations
    /// of motion — never by re-integration, so frame jitter cannot accumulate.
    fn position(&self, progress: f32, gravity: f32) -> Point {
        let t = progress * self.duration_secs;
        Point::new(
            self.x0 + self.vx0 * t,
            self.y0 + self.vy0 * t + 0.5 * gravity * t * t,
        )
    }
}

/// Physics-based animation strategy.
///
/// Launches the element towards a configured screen corner, lets it bounce
/// and roll to a near-standstill, performs one final hop (raising the
/// departed event at its mid-altitude), pauses, then flies it to the target
/// along an analytically exact ballistic arc.
pub struct BallisticStrategy {
    config: TransitionConfig,
    pose: AnimationPose,
    phase: Phase,
    started: bool,

    vx: f32,
    vy: f32,
    min_x: f32,
    max_x: f32,
    floor: f32,
    apex_y: f32,

    hop_started: bool,
    mid_hop_fired: bool,
    pause_elapsed_ms: f32,
    pending_target: Option<AnchorGeometry>,

    flight: Option<FlightState>,
    progress: Tween<f32>,
    snapping: bool,

    scale_x: Tween<f32>,
    scale_y: Tween<f32>,
    width: Tween<f32>,
    height: Tween<f32>,
    radius: Tween<f32>,
    color: Tween<Color>,
    rotation: Tween<f32>,
    snap_x: Tween<f32>,
    snap_y: Tween<f32>,
}

impl BallisticStrategy {
    pub fn new(config: TransitionConfig) -> Self {
        let pose = AnimationPose::default();
        Self {
            pose: pose.clone(),
            phase: Phase::FreeFall,
            started: false,
            vx: 0.0,
            vy: 0.0,
            min_x: 0.0,
            max_x: 0.0,
            floor: 0.0,
            apex_y: 0.0,
            hop_started: false,
            mid_hop_fired: false,
            pause_elapsed_ms: 0.0,
            pending_target: None,
            flight: None,
            progress: Tween::new(0.0),
            snapping: false,
            scale_x: Tween::new(1.0),
            scale_y: Tween::new(1.0),
            width: Tween::new(pose.width),
            height: Tween::new(pose.height),
            radius: Tween::new(pose.corner_radius),
            color: Tween::new(pose.color),
            rotation: Tween::new(0.0),
            snap_x: Tween::new(0.0),
            snap_y: Tween::new(0.0),
            config,
        }
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn near_still(&self) -> bool {
        (self.floor - self.pose.y).abs() < self.config.still_distance
            && self.vx.abs() < self.config.still_speed_x
            && self.vy.abs() < self.config.still_speed_y
    }

    fn cancel_all_tweens(&mut self) {
        self.scale_x.cancel();
        self.scale_y.cancel();
        self.width.cancel();
        self.height.cancel();
        self.radius.cancel();
        self.color.cancel();
        self.rotation.cancel();
        self.progress.cancel();
        self.snap_x.cancel();
        self.snap_y.cancel();
    }

    fn advance_scale_tweens(&mut self, dt_ms: f32) {
        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.scale_x.advance(dt_ms)
        {
            self.pose.scale_x = v;
        }
        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.scale_y.advance(dt_ms)
        {
            self.pose.scale_y = v;
        }
    }

    fn step_free_fall(&mut self, dt: f32, events: &mut Vec<StrategyEvent>) {
        let cfg = &self.config;

        // Gravity plus exponential air drag, then integrate position.
        self.vy += cfg.gravity * dt;
        let drag = (-cfg.air_drag * dt).exp();
        self.vx *= drag;
        self.vy *= drag;
        self.pose.x += self.vx * dt;
        self.pose.y += self.vy * dt;

        // Walls
        if self.pose.x < self.min_x {
            self.pose.x = self.min_x;
            self.vx = -self.vx * cfg.wall_restitution;
        } else if self.pose.x > self.max_x {
            self.pose.x = self.max_x;
            self.vx = -self.vx * cfg.wall_restitution;
        }

        // Floor
        if self.pose.y >= self.floor {
            self.pose.y = self.floor;

            // Squash/stretch proportional to impact speed, capped.
            let impact = (self.vy.abs() / IMPACT_SQUASH_SPEED).min(IMPACT_SQUASH_MAX);
            self.pose.scale_x = 1.0 + impact;
            self.pose.scale_y = 1.0 - impact;
            self.scale_x.set_immediate(1.0 + impact);
            self.scale_y.set_immediate(1.0 - impact);
            let recover = Transition::new(cfg.hop_stretch_ms, TimingFunction::ease_out_gentle());
            self.scale_x.animate_to(1.0, recover.clone());
            self.scale_y.animate_to(1.0, recover);

            self.vy = -self.vy * cfg.restitution;
            self.vx *= (-cfg.ground_friction * dt).exp();

            // The final hop launches once the bouncing has almost died out.
            if !self.hop_started && self.near_still() {
                let climb = (self.floor - self.apex_y).max(MIN_CLIMB);
                self.vy = -(2.0 * cfg.gravity * climb).sqrt() * cfg.hop_damping;
                self.vx *= HOP_HORIZONTAL_DAMP;
                let stretch =
                    Transition::new(cfg.hop_stretch_ms, TimingFunction::ease_out_gentle());
                self.scale_x.animate_to(TAKEOFF_SCALE.0, stretch.clone());
                self.scale_y.animate_to(TAKEOFF_SCALE.1, stretch);
                self.hop_started = true;
                debug!("ballistic: hop started, climb {:.1}px", climb);
            }

            // First landing after the mid-hop point ends the free fall.
            if self.mid_hop_fired {
                self.vy = 0.0;
                self.vx *= LANDING_HORIZONTAL_DAMP;
                self.pause_elapsed_ms = 0.0;
                self.phase = Phase::LandingPause;
                debug!("ballistic: landed, entering pause");
            }
        }

        // Ceiling clamp so the hop can never escape the screen.
        if self.pose.y < cfg.margin {
            self.pose.y = cfg.margin;
            self.vy = -self.vy * cfg.restitution;
        }

        // Rolling rotation, proportional to horizontal velocity over the
        // element's effective radius. Integrated only in this phase; the
        // flight unwinds whatever angle is left.
        let roll_radius = (self.pose.width.min(self.pose.height) / 2.0).max(MIN_ROLL_RADIUS);
        self.pose.rotation_deg +=
            (self.vx / (std::f32::consts::TAU * roll_radius)) * 360.0 * dt;

        // Departure fires once, at the hop's mid altitude on the way up.
        if self.hop_started && !self.mid_hop_fired {
            let mid_y = (self.floor + self.apex_y) / 2.0;
            if self.vy < 0.0 && self.pose.y <= mid_y {
                events.push(StrategyEvent::DepartedSource);
                let recover =
                    Transition::new(MID_HOP_RECOVER_MS, TimingFunction::ease_out_gentle());
                self.scale_x.animate_to(1.0, recover.clone());
                self.scale_y.animate_to(1.0, recover);
                self.mid_hop_fired = true;
                debug!("ballistic: departed source at mid-hop");
            }
        }
    }

    fn begin_flight(&mut self, target: &AnchorGeometry) {
        let cfg = &self.config;
        let tf = cfg.flight_secs();
        let tf_ms = tf * 1000.0;

        let flight = FlightState::solve(
            Point::new(self.pose.x, self.pose.y),
            target.page_pos(),
            tf,
            cfg.gravity,
        );
        trace!(
            "ballistic: flight solved, v0 = ({:.1}, {:.1})",
            flight.vx0,
            flight.vy0
        );

        // Normalize the accumulated roll so the unwind to 0 never snaps the
        // long way around.
        let start_deg = normalize_deg(self.pose.rotation_deg);
        self.pose.rotation_deg = start_deg;
        self.rotation.set_immediate(start_deg);
        self.rotation
            .animate_to(0.0, Transition::new(tf_ms, TimingFunction::EaseOutCubic));

        // Size, radius, and color morph independently of the trajectory,
        // possibly finishing before the flight does.
        let morph = Transition::new(cfg.morph_ms, cfg.morph_easing.clone());
        self.width.set_immediate(self.pose.width);
        self.width.animate_to(target.width, morph.clone());
        self.height.set_immediate(self.pose.height);
        self.height.animate_to(target.height, morph.clone());
        self.radius.set_immediate(self.pose.corner_radius);
        self.radius
            .animate_to(cfg.target_corner_radius, morph.clone());
        self.color.set_immediate(self.pose.color);
        self.color.animate_to(cfg.target_color, morph);

        self.progress.set_immediate(0.0);
        self.progress
            .animate_to(1.0, Transition::new(tf_ms, TimingFunction::Linear));

        self.flight = Some(flight);
        self.snapping = false;
        self.phase = Phase::BallisticFlight;
        debug!("ballistic: flight started ({}ms)", tf_ms);
    }

    fn step_flight(&mut self, dt_ms: f32, events: &mut Vec<StrategyEvent>) {
        let gravity = self.config.gravity;
        let Some(flight) = self.flight else { return };

        let progressed = self.progress.advance(dt_ms);
        if !self.snapping {
            let p = flight.position(*self.progress.current(), gravity);
            self.pose.x = p.x;
            self.pose.y = p.y;
        }

        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) =
            self.rotation.advance(dt_ms)
        {
            self.pose.rotation_deg = v;
        }
        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.width.advance(dt_ms)
        {
            self.pose.width = v;
        }
        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.height.advance(dt_ms)
        {
            self.pose.height = v;
        }
        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.radius.advance(dt_ms)
        {
            self.pose.corner_radius = v;
        }
        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.color.advance(dt_ms)
        {
            self.pose.color = v;
        }

        if progressed.is_completed() && !self.snapping {
            // Final pixel snap onto the literal target coordinates, clearing
            // any residual floating-point drift from the analytic formula.
            self.snapping = true;
            let snap = Transition::new(self.config.snap_ms, TimingFunction::ease_out_gentle());
            self.snap_x.set_immediate(self.pose.x);
            self.snap_x.animate_to(flight.target_x, snap.clone());
            self.snap_y.set_immediate(self.pose.y);
            self.snap_y.animate_to(flight.target_y, snap);
        }

        if self.snapping {
            if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) =
                self.snap_x.advance(dt_ms)
            {
                self.pose.x = v;
            }
            if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) =
                self.snap_y.advance(dt_ms)
            {
                self.pose.y = v;
            }
            if !self.snap_x.is_animating() && !self.snap_y.is_animating() {
                self.phase = Phase::Done;
                events.push(StrategyEvent::ArrivedTarget);
                debug!("ballistic: arrived at target");
            }
        }
    }
}

impl AnimationStrategy for BallisticStrategy {
    fn start(&mut self, source: &AnchorGeometry) {
        // Cancellation is synchronous: no stale tween may overwrite the
        // newly seeded pose.
        self.cancel_all_tweens();

        let cfg = &self.config;

        self.pose = AnimationPose::from_anchor(source, cfg.initial_corner_radius, cfg.initial_color);
        self.scale_x.set_immediate(1.0);
        self.scale_y.set_immediate(1.0);
        self.width.set_immediate(self.pose.width);
        self.height.set_immediate(self.pose.height);
        self.radius.set_immediate(self.pose.corner_radius);
        self.color.set_immediate(self.pose.color);
        self.rotation.set_immediate(0.0);
        self.progress.set_immediate(0.0);

        // Collision bounds depend on the element's current size.
        self.min_x = cfg.margin;
        self.max_x = cfg.viewport.width - cfg.margin - self.pose.width;
        self.floor = cfg.viewport.height - cfg.margin - self.pose.height;
        self.apex_y = cfg.margin + cfg.apex_pad;

        self.hop_started = false;
        self.mid_hop_fired = false;
        self.pause_elapsed_ms = 0.0;
        self.pending_target = None;
        self.flight = None;
        self.snapping = false;

        // Launch towards the configured corner, vertical component damped to
        // keep the lob below horizontal.
        let corner_x = if cfg.corner.is_right() {
            self.max_x
        } else {
            self.min_x
        };
        let corner_y = if cfg.corner.is_bottom() {
            self.floor
        } else {
            cfg.margin
        };
        let dx = corner_x - self.pose.x;
        let dy = corner_y - self.pose.y;
        let len = (dx * dx + dy * dy).sqrt().max(MIN_LAUNCH_LEN);
        self.vx = dx / len * cfg.launch_speed;
        self.vy = dy / len * cfg.launch_speed * LAUNCH_VERTICAL_DAMP;

        self.phase = Phase::FreeFall;
        self.started = true;
        debug!(
            "ballistic: launched from ({:.1}, {:.1}) towards {:?}",
            self.pose.x, self.pose.y, cfg.corner
        );
    }

    fn set_target(&mut self, target: &AnchorGeometry) {
        match self.phase {
            Phase::FreeFall | Phase::LandingPause => {
                self.pending_target = Some(target.clone());
            }
            _ => trace!("ballistic: target ignored in phase {:?}", self.phase),
        }
    }

    fn tick(&mut self, dt_ms: f32, events: &mut Vec<StrategyEvent>) {
        if !self.started {
            return;
        }

        // Squash/stretch recovery runs across phase boundaries.
        self.advance_scale_tweens(dt_ms);

        match self.phase {
            Phase::FreeFall => {
                let dt = (dt_ms / 1000.0).clamp(0.0, MAX_STEP_SECS);
                self.step_free_fall(dt, events);
            }
            Phase::LandingPause => {
                self.pause_elapsed_ms += dt_ms.max(0.0);
                if self.pause_elapsed_ms >= self.config.landing_pause_ms {
                    // Pause is over; wait (indefinitely, by design) until a
                    // target anchor arrives.
                    if let Some(target) = self.pending_target.take() {
                        self.begin_flight(&target);
                    }
                }
            }
            Phase::BallisticFlight => self.step_flight(dt_ms, events),
            Phase::Done => {}
        }
    }

    fn pose(&self) -> &AnimationPose {
        &self.pose
    }

    fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}
