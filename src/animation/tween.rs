use super::{Animatable, Transition};

/// Result of advancing a tween, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (tween not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
    /// The tween reached its target this step; the value is exactly the target
    Completed(T),
}

impl<T> AdvanceResult<T> {
    /// Returns true if the value changed
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_) | AdvanceResult::Completed(_))
    }

    /// Returns true if the tween finished this step
    pub fn is_completed(&self) -> bool {
        matches!(self, AdvanceResult::Completed(_))
    }
}

/// A cooperatively advanced interpolation from a start value to a target.
///
/// Unlike a wall-clock animation, a tween is driven purely by the elapsed-time
/// deltas handed to [`Tween::advance`] — the caller owns the frame loop. On
/// the step that reaches the end of the duration, the current value snaps to
/// the exact target, eliminating any easing residue.
pub struct Tween<T: Animatable> {
    /// Current interpolated value
    current: T,
    /// Target value
    target: T,
    /// Value when the tween started
    start: T,
    /// Milliseconds accumulated since the tween started
    elapsed_ms: f32,
    /// Transition configuration
    transition: Transition,
    /// Whether the tween is currently running
    active: bool,
    /// Previous value for change detection
    prev_value: Option<T>,
}

impl<T: Animatable> Tween<T> {
    pub fn new(initial_value: T) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            elapsed_ms: 0.0,
            transition: Transition::default(),
            active: false,
            prev_value: None,
        }
    }

    /// Start animating from the current value to a new target.
    ///
    /// Always restarts, even when the target equals the current value — a
    /// degenerate tween to the same value is a valid timed hold.
    pub fn animate_to(&mut self, new_target: T, transition: Transition) {
        self.start = self.current.clone();
        self.target = new_target;
        self.transition = transition;
        self.elapsed_ms = 0.0;
        self.active = true;
        self.prev_value = None;
    }

    /// Advance the tween by `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f32) -> AdvanceResult<T> {
        if !self.active {
            return AdvanceResult::NoChange;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let adjusted = self.elapsed_ms - self.transition.delay_ms;
        if adjusted <= 0.0 {
            // Still in delay period
            return AdvanceResult::NoChange;
        }

        if self.transition.duration_ms <= 0.0 || adjusted >= self.transition.duration_ms {
            self.active = false;
            self.current = self.target.clone();
            self.prev_value = Some(self.current.clone());
            return AdvanceResult::Completed(self.current.clone());
        }

        let t = adjusted / self.transition.duration_ms;
        let eased = self.transition.timing.evaluate(t);
        let new_value = T::lerp(&self.start, &self.target, eased);

        let changed = self.prev_value.as_ref() != Some(&new_value);
        self.current = new_value.clone();
        self.prev_value = Some(new_value.clone());

        if changed {
            AdvanceResult::Changed(new_value)
        } else {
            AdvanceResult::NoChange
        }
    }

    /// Stop the tween without reaching the target.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.active = false;
        self.elapsed_ms = 0.0;
        self.prev_value = None;
    }

    /// Check if the tween is still running
    pub fn is_animating(&self) -> bool {
        self.active
    }

    /// Get current value
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Get target value
    pub fn target(&self) -> &T {
        &self.target
    }
}
