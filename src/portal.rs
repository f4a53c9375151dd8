//! Shared transition state: the captured anchors and the overlay content.

use std::sync::Arc;

use log::{debug, trace};

use crate::geometry::AnchorGeometry;
use crate::reactive::{Signal, Subscription};

/// Shared state for one portal transition scope.
///
/// Holds the current source anchor, target anchor, and the overlay node the
/// host renders in its top-level layer while a transition is in flight. The
/// store is an explicitly scoped object: create one per transition provider
/// (typically wrapped in an `Arc`) and hand it to the elements and the engine
/// that participate in the handshake. It is never a global.
///
/// `N` is the host's renderable node type. It only needs to be cloneable and
/// comparable; the crate never looks inside it.
///
/// Invariants:
/// - a target anchor is only ever set while a source anchor exists;
/// - overlay content is non-null exactly while a transition is in progress.
pub struct PortalStore<N> {
    source_anchor: Signal<Option<AnchorGeometry>>,
    target_anchor: Signal<Option<AnchorGeometry>>,
    overlay: Signal<Option<N>>,
}

impl<N> PortalStore<N>
where
    N: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            source_anchor: Signal::new(None),
            target_anchor: Signal::new(None),
            overlay: Signal::new(None),
        }
    }

    /// Commit a freshly captured source anchor.
    ///
    /// Overwrites any previous source and discards a stale target, which
    /// cancels an in-flight transition: the engine observes the new source
    /// and restarts from scratch.
    pub fn commit_source(&self, anchor: AnchorGeometry) {
        debug!(
            "commit source anchor at ({}, {})",
            anchor.page_x, anchor.page_y
        );
        self.target_anchor.set(None);
        // Unconditional notify: re-capturing an identical rectangle must still
        // cancel and restart the in-flight transition.
        self.source_anchor.set_always(Some(anchor));
    }

    /// Commit a freshly captured target anchor.
    ///
    /// A target with no live source is an expected race in UI code, not a
    /// fault: it is silently ignored.
    pub fn commit_target(&self, anchor: AnchorGeometry) {
        if self.source_anchor.with(|s| s.is_none()) {
            trace!("target capture ignored: no source anchor");
            return;
        }
        debug!(
            "commit target anchor at ({}, {})",
            anchor.page_x, anchor.page_y
        );
        self.target_anchor.set(Some(anchor));
    }

    /// Clear both anchors and the overlay content.
    ///
    /// This is the terminal action of a completed transition (invoked through
    /// the target anchor's wrapped completion callback).
    pub fn reset(&self) {
        debug!("portal store reset");
        self.target_anchor.set(None);
        self.source_anchor.set(None);
        self.overlay.set(None);
    }

    pub fn source_anchor(&self) -> Option<AnchorGeometry> {
        self.source_anchor.get()
    }

    pub fn target_anchor(&self) -> Option<AnchorGeometry> {
        self.target_anchor.get()
    }

    /// The node currently rendered in the top-level overlay layer, if any.
    pub fn overlay_content(&self) -> Option<N> {
        self.overlay.get()
    }

    /// True while a transition is in progress.
    pub fn is_active(&self) -> bool {
        self.overlay.with(|o| o.is_some())
    }

    /// Insert content into the top-level overlay layer.
    pub fn set_overlay(&self, content: N) {
        self.overlay.set(Some(content));
    }

    /// Remove the overlay content.
    pub fn clear_overlay(&self) {
        self.overlay.set(None);
    }

    /// Subscribe to source anchor changes.
    pub fn subscribe_source<F>(&self, f: F) -> Subscription
    where
        F: Fn(&Option<AnchorGeometry>) + Send + Sync + 'static,
    {
        self.source_anchor.subscribe(f)
    }

    /// Subscribe to target anchor changes.
    pub fn subscribe_target<F>(&self, f: F) -> Subscription
    where
        F: Fn(&Option<AnchorGeometry>) + Send + Sync + 'static,
    {
        self.target_anchor.subscribe(f)
    }

    /// Subscribe to overlay content changes.
    pub fn subscribe_overlay<F>(&self, f: F) -> Subscription
    where
        F: Fn(&Option<N>) + Send + Sync + 'static,
    {
        self.overlay.subscribe(f)
    }
}

impl<N> Default for PortalStore<N>
where
    N: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience constructor for the common shared-ownership case.
pub fn create_portal_store<N>() -> Arc<PortalStore<N>>
where
    N: Clone + PartialEq + Send + Sync + 'static,
{
    Arc::new(PortalStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn anchor(page_x: f32, page_y: f32) -> AnchorGeometry {
        AnchorGeometry::new(0.0, 0.0, 10.0, 10.0, page_x, page_y)
    }

    #[test]
    fn test_target_without_source_is_ignored() {
        let store: PortalStore<&'static str> = PortalStore::new();
        store.commit_target(anchor(5.0, 5.0));
        assert!(store.target_anchor().is_none());
        assert!(store.overlay_content().is_none());
    }

    #[test]
    fn test_target_after_source_is_stored() {
        let store: PortalStore<&'static str> = PortalStore::new();
        store.commit_source(anchor(1.0, 1.0));
        store.commit_target(anchor(5.0, 5.0));
        assert!(store.target_anchor().is_some());
    }

    #[test]
    fn test_new_source_discards_stale_target() {
        let store: PortalStore<&'static str> = PortalStore::new();
        store.commit_source(anchor(1.0, 1.0));
        store.commit_target(anchor(5.0, 5.0));
        store.commit_source(anchor(2.0, 2.0));
        assert!(store.target_anchor().is_none());
        assert_eq!(store.source_anchor().unwrap().page_x, 2.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let store: PortalStore<&'static str> = PortalStore::new();
        store.commit_source(anchor(1.0, 1.0));
        store.commit_target(anchor(5.0, 5.0));
        store.set_overlay("overlay");

        store.reset();
        assert!(store.source_anchor().is_none());
        assert!(store.target_anchor().is_none());
        assert!(store.overlay_content().is_none());
        assert!(!store.is_active());
    }

    #[test]
    fn test_source_subscription_sees_commit_and_reset() {
        let store: PortalStore<&'static str> = PortalStore::new();
        let sets = Arc::new(AtomicUsize::new(0));
        let clears = Arc::new(AtomicUsize::new(0));
        let sets_clone = sets.clone();
        let clears_clone = clears.clone();
        let _sub = store.subscribe_source(move |src| {
            if src.is_some() {
                sets_clone.fetch_add(1, Ordering::SeqCst);
            } else {
                clears_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.commit_source(anchor(1.0, 1.0));
        store.reset();
        assert_eq!(sets.load(Ordering::SeqCst), 1);
        assert_eq!(clears.load(Ordering::SeqCst), 1);
    }
}
