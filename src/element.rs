//! The per-element capture handle that drives the transition handshake.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use log::trace;

use crate::geometry::{AnchorGeometry, CompletionCallback};
use crate::portal::PortalStore;
use crate::reactive::Subscription;

/// Which end of the transition a capture request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRole {
    Source,
    Target,
}

/// Measures an element's current on-screen geometry on demand.
///
/// The crate does not own layout; hosts implement this at the seam where
/// their view hierarchy knows where the element sits. Returning `None` means
/// the element is not currently mounted or measurable, and the capture
/// request is silently dropped.
pub trait Measure {
    fn measure(&self) -> Option<AnchorGeometry>;
}

impl<F> Measure for F
where
    F: Fn() -> Option<AnchorGeometry>,
{
    fn measure(&self) -> Option<AnchorGeometry> {
        self()
    }
}

/// Handle attached to one transportable element.
///
/// `capture` measures the element and publishes the result into the
/// [`PortalStore`] as either end of the handshake. The element also owns the
/// subscription that inserts the overlay node into the store when a source
/// anchor appears, and removes it when the source is cleared.
pub struct PortalElement<N, M> {
    store: Arc<PortalStore<N>>,
    measurable: M,
    focused: Arc<AtomicBool>,
    _overlay_sub: Subscription,
}

impl<N, M> PortalElement<N, M>
where
    N: Clone + PartialEq + Send + Sync + 'static,
    M: Measure,
{
    /// Create a handle for an element whose transported clone renders as
    /// `content` while a transition is in flight.
    pub fn new(store: Arc<PortalStore<N>>, measurable: M, content: N) -> Self {
        let focused = Arc::new(AtomicBool::new(true));

        // Source anchor appearing is the single trigger that inserts the
        // overlay; the source clearing removes it. Weak reference because the
        // store owns this subscriber for as long as the element lives.
        let weak: Weak<PortalStore<N>> = Arc::downgrade(&store);
        let focused_for_sub = focused.clone();
        let had_source = AtomicBool::new(false);
        let sub = store.subscribe_source(move |source| {
            let has = source.is_some();
            let had = had_source.swap(has, Ordering::SeqCst);
            let Some(store) = weak.upgrade() else {
                return;
            };
            if has && !had {
                if focused_for_sub.load(Ordering::SeqCst) && store.overlay_content().is_none() {
                    store.set_overlay(content.clone());
                }
            } else if !has && had {
                store.clear_overlay();
            }
        });

        Self {
            store,
            measurable,
            focused,
            _overlay_sub: sub,
        }
    }

    /// Measure the element and publish the geometry as `role`.
    ///
    /// Silent no-op when the element cannot be measured, and for a target
    /// capture with no live source. For a target capture, `on_complete` is
    /// wrapped so the store is reset after the user callback runs — cleanup
    /// is the capture's responsibility, not the caller's.
    pub fn capture(&self, role: CaptureRole, on_complete: Option<CompletionCallback>) {
        let Some(geometry) = self.measurable.measure() else {
            trace!("capture ignored: element not measurable");
            return;
        };

        match role {
            CaptureRole::Source => {
                self.store
                    .commit_source(geometry.with_on_complete_opt(on_complete));
            }
            CaptureRole::Target => {
                if self.store.source_anchor().is_none() {
                    trace!("capture ignored: target requested with no source");
                    return;
                }
                let weak = Arc::downgrade(&self.store);
                let wrapped: CompletionCallback = Arc::new(move || {
                    if let Some(cb) = &on_complete {
                        cb();
                    }
                    if let Some(store) = weak.upgrade() {
                        store.reset();
                    }
                });
                self.store.commit_target(geometry.with_on_complete(wrapped));
            }
        }
    }

    /// Whether the owning screen is focused. Content is only published into
    /// the overlay while focused.
    pub fn set_focused(&self, focused: bool) {
        self.focused.store(focused, Ordering::SeqCst);
    }

    /// True while overlay content is being rendered for this store.
    pub fn is_portal_active(&self) -> bool {
        self.store.is_active()
    }

    /// Opacity the host should apply to the original element: 0 while the
    /// overlay clone is visible, so the element never visually duplicates it.
    pub fn source_opacity(&self) -> f32 {
        if self.is_portal_active() {
            0.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::create_portal_store;
    use std::sync::atomic::AtomicUsize;

    fn measured(page_x: f32, page_y: f32) -> AnchorGeometry {
        AnchorGeometry::new(12.0, 6.0, 140.0, 64.0, page_x, page_y)
    }

    #[test]
    fn test_source_capture_publishes_anchor_and_overlay() {
        let store = create_portal_store::<&'static str>();
        let element = PortalElement::new(store.clone(), || Some(measured(20.0, 40.0)), "clone");

        element.capture(CaptureRole::Source, None);

        let anchor = store.source_anchor().expect("source anchor");
        assert_eq!(anchor.page_x, 20.0);
        assert_eq!(store.overlay_content(), Some("clone"));
        assert!(element.is_portal_active());
        assert_eq!(element.source_opacity(), 0.0);
    }

    #[test]
    fn test_unmeasurable_capture_is_a_no_op() {
        let store = create_portal_store::<&'static str>();
        let element = PortalElement::new(store.clone(), || None, "clone");

        element.capture(CaptureRole::Source, None);
        assert!(store.source_anchor().is_none());
        assert!(store.overlay_content().is_none());
        assert_eq!(element.source_opacity(), 1.0);
    }

    #[test]
    fn test_target_capture_without_source_is_a_no_op() {
        let store = create_portal_store::<&'static str>();
        let element = PortalElement::new(store.clone(), || Some(measured(50.0, 60.0)), "clone");

        element.capture(CaptureRole::Target, None);
        assert!(store.target_anchor().is_none());
        assert!(store.overlay_content().is_none());
    }

    #[test]
    fn test_unfocused_element_does_not_publish_overlay() {
        let store = create_portal_store::<&'static str>();
        let element = PortalElement::new(store.clone(), || Some(measured(20.0, 40.0)), "clone");
        element.set_focused(false);

        element.capture(CaptureRole::Source, None);
        assert!(store.source_anchor().is_some());
        assert!(store.overlay_content().is_none());
    }

    #[test]
    fn test_target_callback_runs_user_callback_then_resets() {
        let store = create_portal_store::<&'static str>();
        let element = PortalElement::new(store.clone(), || Some(measured(20.0, 40.0)), "clone");

        element.capture(CaptureRole::Source, None);
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        element.capture(
            CaptureRole::Target,
            Some(Arc::new(move || {
                fired_clone.fetch_add(1, Ordering::SeqCst);
            })),
        );

        let target = store.target_anchor().expect("target anchor");
        let wrapped = target.on_complete.clone().expect("wrapped callback");
        wrapped();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(store.source_anchor().is_none());
        assert!(store.target_anchor().is_none());
        assert!(store.overlay_content().is_none());
    }

    #[test]
    fn test_overlay_removed_when_source_cleared() {
        let store = create_portal_store::<&'static str>();
        let element = PortalElement::new(store.clone(), || Some(measured(20.0, 40.0)), "clone");

        element.capture(CaptureRole::Source, None);
        assert!(store.overlay_content().is_some());

        store.reset();
        assert!(store.overlay_content().is_none());
    }

    #[test]
    fn test_second_source_does_not_duplicate_overlay() {
        let store = create_portal_store::<&'static str>();
        let element = PortalElement::new(store.clone(), || Some(measured(20.0, 40.0)), "clone");
        let publishes = Arc::new(AtomicUsize::new(0));
        let publishes_clone = publishes.clone();
        let _sub = store.subscribe_overlay(move |o| {
            if o.is_some() {
                publishes_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        element.capture(CaptureRole::Source, None);
        element.capture(CaptureRole::Source, None);
        assert_eq!(publishes.load(Ordering::SeqCst), 1);
    }
}
