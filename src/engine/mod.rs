//! The animation engine: strategy contract and the engine that wires a
//! strategy to a portal store.

mod ballistic;
mod config;
mod linear;

pub use ballistic::{BallisticStrategy, Phase};
pub use config::TransitionConfig;
pub use linear::LinearStrategy;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::geometry::AnchorGeometry;
use crate::pose::AnimationPose;
use crate::portal::PortalStore;
use crate::reactive::Subscription;

/// Signals a strategy raises while advancing. The engine, not the strategy,
/// turns these into the caller-supplied completion callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyEvent {
    /// The element has logically departed the source; fired mid-transition.
    DepartedSource,
    /// The element has arrived at the target; terminal.
    ArrivedTarget,
}

/// One interchangeable animation behavior.
///
/// A strategy (1) seeds its pose from a source anchor, (2) reacts to a target
/// anchor's arrival, (3) drives the pose continuously from elapsed-time
/// deltas, and (4) raises the two completion events in order. Anything
/// satisfying that contract can drive a transition; [`BallisticStrategy`] and
/// [`LinearStrategy`] are the two provided implementations.
pub trait AnimationStrategy: Send {
    /// (Re-)initialize from a freshly committed source anchor. Called again
    /// mid-flight on cancellation-and-restart; must discard all prior state.
    fn start(&mut self, source: &AnchorGeometry);

    /// A target anchor has been committed.
    fn set_target(&mut self, target: &AnchorGeometry);

    /// Advance by `dt_ms` milliseconds, pushing any raised events.
    fn tick(&mut self, dt_ms: f32, events: &mut Vec<StrategyEvent>);

    /// The pose the style projector should render this frame.
    fn pose(&self) -> &AnimationPose;

    /// True once the transition has fully completed.
    fn is_done(&self) -> bool;
}

enum Command {
    SourceCommitted(AnchorGeometry),
    SourceCleared,
    TargetCommitted(AnchorGeometry),
}

/// Drives one transition at a time: watches the store's anchors, forwards
/// them to the strategy, advances the strategy once per display frame, and
/// dispatches the completion callbacks.
///
/// The engine owns no frame loop; the host calls [`TransitionEngine::tick`]
/// with the elapsed time since the previous frame. Store changes made from
/// callbacks or other threads are queued and applied at the start of the next
/// tick, so a frame always observes a consistent handshake state.
pub struct TransitionEngine<N> {
    store: Arc<PortalStore<N>>,
    strategy: Box<dyn AnimationStrategy>,
    commands: Arc<Mutex<VecDeque<Command>>>,
    current_source: Option<AnchorGeometry>,
    current_target: Option<AnchorGeometry>,
    departed_fired: bool,
    arrived_fired: bool,
    events: Vec<StrategyEvent>,
    _subs: [Subscription; 2],
}

impl<N> TransitionEngine<N>
where
    N: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(store: Arc<PortalStore<N>>, strategy: Box<dyn AnimationStrategy>) -> Self {
        let commands: Arc<Mutex<VecDeque<Command>>> = Arc::new(Mutex::new(VecDeque::new()));

        let queue = commands.clone();
        let source_sub = store.subscribe_source(move |source| {
            let command = match source {
                Some(anchor) => Command::SourceCommitted(anchor.clone()),
                None => Command::SourceCleared,
            };
            if let Ok(mut queue) = queue.lock() {
                queue.push_back(command);
            }
        });

        let queue = commands.clone();
        let target_sub = store.subscribe_target(move |target| {
            // A cleared target is not an engine event: it only happens as part
            // of a reset or a source re-commit, both carried by the source
            // signal.
            if let Some(anchor) = target {
                if let Ok(mut queue) = queue.lock() {
                    queue.push_back(Command::TargetCommitted(anchor.clone()));
                }
            }
        });

        Self {
            store,
            strategy,
            commands,
            current_source: None,
            current_target: None,
            departed_fired: false,
            arrived_fired: false,
            events: Vec::new(),
            _subs: [source_sub, target_sub],
        }
    }

    /// Advance the transition by `dt_ms` milliseconds of frame time.
    pub fn tick(&mut self, dt_ms: f32) {
        self.drain_commands();

        if self.current_source.is_none() || self.strategy.is_done() {
            return;
        }

        self.events.clear();
        let mut events = std::mem::take(&mut self.events);
        self.strategy.tick(dt_ms, &mut events);
        self.dispatch(&events);
        self.events = events;
    }

    /// The pose to render this frame.
    pub fn pose(&self) -> &AnimationPose {
        self.strategy.pose()
    }

    /// True while a transition is being driven.
    pub fn is_running(&self) -> bool {
        self.current_source.is_some() && !self.strategy.is_done()
    }

    /// The store this engine is attached to.
    pub fn store(&self) -> &Arc<PortalStore<N>> {
        &self.store
    }

    fn drain_commands(&mut self) {
        loop {
            let command = {
                let Ok(mut queue) = self.commands.lock() else {
                    return;
                };
                queue.pop_front()
            };
            let Some(command) = command else { break };
            match command {
                Command::SourceCommitted(anchor) => {
                    debug!("engine: source committed, (re)starting transition");
                    self.departed_fired = false;
                    self.arrived_fired = false;
                    self.current_target = None;
                    self.strategy.start(&anchor);
                    self.current_source = Some(anchor);
                }
                Command::SourceCleared => {
                    self.current_source = None;
                    self.current_target = None;
                }
                Command::TargetCommitted(anchor) => {
                    if self.current_source.is_none() {
                        warn!("engine: target committed with no active transition");
                        continue;
                    }
                    debug!("engine: target committed");
                    self.strategy.set_target(&anchor);
                    self.current_target = Some(anchor);
                }
            }
        }
    }

    fn dispatch(&mut self, events: &[StrategyEvent]) {
        for event in events {
            match event {
                StrategyEvent::DepartedSource => {
                    if self.departed_fired {
                        continue;
                    }
                    self.departed_fired = true;
                    debug!("engine: departed source");
                    if let Some(cb) = self
                        .current_source
                        .as_ref()
                        .and_then(|s| s.on_complete.clone())
                    {
                        cb();
                    }
                }
                StrategyEvent::ArrivedTarget => {
                    if self.arrived_fired {
                        continue;
                    }
                    self.arrived_fired = true;
                    debug!("engine: arrived at target");
                    // The wrapped callback resets the store; the resulting
                    // SourceCleared is queued and applied next tick.
                    if let Some(cb) = self
                        .current_target
                        .as_ref()
                        .and_then(|t| t.on_complete.clone())
                    {
                        cb();
                    }
                }
            }
        }
    }
}
