//! A shared-element portal transition engine.
//!
//! When the user moves an element between two containers, the element is not
//! re-parented directly: a visual clone floats in a top-level overlay layer
//! and travels from the source's captured screen rectangle to the target's,
//! while the real elements stay hidden underneath. The journey is driven by a
//! pluggable [`engine::AnimationStrategy`]; the default
//! [`engine::BallisticStrategy`] launches the clone into a physical free
//! fall with bounces, a final hop, a settle beat, and a closed-form ballistic
//! flight that lands exactly on the target.
//!
//! The crate is renderer-agnostic. Hosts provide measured
//! [`geometry::AnchorGeometry`] rectangles and an opaque renderable node
//! type, drive [`engine::TransitionEngine::tick`] from their frame loop, and
//! draw the [`style::RenderStyle`] projected from each frame's pose.
//!
//! ```
//! use animated_portal::prelude::*;
//!
//! let store = create_portal_store::<&'static str>();
//! let config = TransitionConfig::new(Viewport::new(800.0, 600.0));
//! let mut engine = TransitionEngine::new(
//!     store.clone(),
//!     Box::new(BallisticStrategy::new(config)),
//! );
//!
//! let element = PortalElement::new(
//!     store.clone(),
//!     || Some(AnchorGeometry::new(0.0, 0.0, 100.0, 50.0, 10.0, 20.0)),
//!     "card",
//! );
//! element.capture(CaptureRole::Source, None);
//!
//! // Host frame loop:
//! engine.tick(16.0);
//! let style = StyleProjector::new().project(engine.pose());
//! # let _ = style;
//! ```

pub mod animation;
pub mod color;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod portal;
pub mod pose;
pub mod reactive;
pub mod style;
pub mod transform;

pub mod prelude {
    pub use crate::animation::{Animatable, TimingFunction, Transition, Tween};
    pub use crate::color::Color;
    pub use crate::element::{CaptureRole, Measure, PortalElement};
    pub use crate::engine::{
        AnimationStrategy, BallisticStrategy, LinearStrategy, TransitionConfig, TransitionEngine,
    };
    pub use crate::geometry::{AnchorGeometry, CompletionCallback, Corner, Point, Rect, Viewport};
    pub use crate::portal::{create_portal_store, PortalStore};
    pub use crate::pose::AnimationPose;
    pub use crate::style::{RenderStyle, Shadow, StyleProjector};
    pub use crate::transform::Transform;
}
