//! The minimal strategy: no physics, a single eased tween from the source
//! rectangle to the target rectangle.

use log::{debug, trace};

use super::config::TransitionConfig;
use super::{AnimationStrategy, StrategyEvent};
use crate::animation::{AdvanceResult, TimingFunction, Transition, Tween};
use crate::color::Color;
use crate::geometry::AnchorGeometry;
use crate::pose::AnimationPose;

/// Direct interpolation strategy.
///
/// Holds the overlay at the source rectangle until a target is committed,
/// then tweens position, size, radius, and color to the target in one eased
/// motion. Departure is raised on the first frame; arrival when every tween
/// has completed.
pub struct LinearStrategy {
    config: TransitionConfig,
    pose: AnimationPose,
    started: bool,
    depart_pending: bool,
    has_target: bool,
    arrived: bool,

    x: Tween<f32>,
    y: Tween<f32>,
    width: Tween<f32>,
    height: Tween<f32>,
    radius: Tween<f32>,
    color: Tween<Color>,
}

impl LinearStrategy {
    pub fn new(config: TransitionConfig) -> Self {
        let pose = AnimationPose::default();
        Self {
            pose: pose.clone(),
            started: false,
            depart_pending: false,
            has_target: false,
            arrived: false,
            x: Tween::new(pose.x),
            y: Tween::new(pose.y),
            width: Tween::new(pose.width),
            height: Tween::new(pose.height),
            radius: Tween::new(pose.corner_radius),
            color: Tween::new(pose.color),
            config,
        }
    }
}

impl AnimationStrategy for LinearStrategy {
    fn start(&mut self, source: &AnchorGeometry) {
        self.pose = AnimationPose::from_anchor(
            source,
            self.config.initial_corner_radius,
            self.config.initial_color,
        );
        self.x.set_immediate(self.pose.x);
        self.y.set_immediate(self.pose.y);
        self.width.set_immediate(self.pose.width);
        self.height.set_immediate(self.pose.height);
        self.radius.set_immediate(self.pose.corner_radius);
        self.color.set_immediate(self.pose.color);
        self.depart_pending = true;
        self.has_target = false;
        self.arrived = false;
        self.started = true;
        debug!(
            "linear: holding at source ({:.1}, {:.1})",
            self.pose.x, self.pose.y
        );
    }

    fn set_target(&mut self, target: &AnchorGeometry) {
        if !self.started || self.arrived {
            trace!("linear: target ignored, no transition in progress");
            return;
        }
        let motion = Transition::new(self.config.linear_duration_ms, TimingFunction::EaseInOut);
        self.x.animate_to(target.page_x, motion.clone());
        self.y.animate_to(target.page_y, motion.clone());
        self.width.animate_to(target.width, motion.clone());
        self.height.animate_to(target.height, motion.clone());
        self.radius
            .animate_to(self.config.target_corner_radius, motion.clone());
        self.color.animate_to(self.config.target_color, motion);
        self.has_target = true;
        debug!(
            "linear: moving to target ({:.1}, {:.1})",
            target.page_x, target.page_y
        );
    }

    fn tick(&mut self, dt_ms: f32, events: &mut Vec<StrategyEvent>) {
        if !self.started || self.arrived {
            return;
        }

        // No hop here, so the source is considered departed as soon as the
        // overlay starts rendering.
        if self.depart_pending {
            events.push(StrategyEvent::DepartedSource);
            self.depart_pending = false;
        }

        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.x.advance(dt_ms) {
            self.pose.x = v;
        }
        if let AdvanceResult::Changed(v) | AdvanceResult::Completed(v) = self.y.advance(dt_ms) {
            self.pose.y = v;
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

        if self.has_target
            && !self.x.is_animating()
            && !self.y.is_animating()
            && !self.width.is_animating()
            && !self.height.is_animating()
            && !self.radius.is_animating()
            && !self.color.is_animating()
        {
            self.arrived = true;
            events.push(StrategyEvent::ArrivedTarget);
            debug!("linear: arrived at target");
        }
    }

    fn pose(&self) -> &AnimationPose {
        &self.pose
    }

    fn is_done(&self) -> bool {
        self.arrived
    }
}
