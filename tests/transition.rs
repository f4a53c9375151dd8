//! End-to-end transitions: elements capturing into a shared store, the engine
//! driving a strategy from frame deltas, and the completion handshake tearing
//! everything down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use animated_portal::element::Measure;
use animated_portal::prelude::*;

const DT_MS: f32 = 16.0;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> TransitionConfig {
    TransitionConfig::new(Viewport::new(800.0, 600.0))
}

fn source_element(
    store: &Arc<PortalStore<&'static str>>,
) -> PortalElement<&'static str, impl Measure> {
    PortalElement::new(
        store.clone(),
        || Some(AnchorGeometry::new(0.0, 0.0, 120.0, 64.0, 40.0, 80.0)),
        "card",
    )
}

fn target_element(
    store: &Arc<PortalStore<&'static str>>,
) -> PortalElement<&'static str, impl Measure> {
    PortalElement::new(
        store.clone(),
        || Some(AnchorGeometry::new(0.0, 0.0, 60.0, 60.0, 300.0, 400.0)),
        "card",
    )
}

fn counter() -> (Arc<AtomicUsize>, CompletionCallback) {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    let cb: CompletionCallback = Arc::new(move || {
        count_clone.fetch_add(1, Ordering::SeqCst);
    });
    (count, cb)
}

fn tick_until<F>(engine: &mut TransitionEngine<&'static str>, max_frames: usize, done: F) -> bool
where
    F: Fn() -> bool,
{
    for _ in 0..max_frames {
        engine.tick(DT_MS);
        if done() {
            return true;
        }
    }
    false
}

#[test]
fn test_full_ballistic_transition() {
    init_logging();
    let store = create_portal_store::<&'static str>();
    let mut engine = TransitionEngine::new(
        store.clone(),
        Box::new(BallisticStrategy::new(config())),
    );

    let source = source_element(&store);
    let target = target_element(&store);
    let (departed, on_departed) = counter();
    let (arrived, on_arrived) = counter();

    source.capture(CaptureRole::Source, Some(on_departed));
    assert!(store.is_active(), "overlay appears with the source anchor");
    assert_eq!(store.overlay_content(), Some("card"));
    assert_eq!(source.source_opacity(), 0.0);

    // The departure callback fires mid-hop, after the bouncing settles.
    let departed_check = departed.clone();
    assert!(
        tick_until(&mut engine, 4000, || departed_check
            .load(Ordering::SeqCst)
            > 0),
        "never departed the source"
    );
    assert_eq!(departed.load(Ordering::SeqCst), 1);
    assert_eq!(arrived.load(Ordering::SeqCst), 0);

    target.capture(CaptureRole::Target, Some(on_arrived));

    let arrived_check = arrived.clone();
    assert!(
        tick_until(&mut engine, 400, || arrived_check.load(Ordering::SeqCst) > 0),
        "never arrived at the target"
    );
    assert_eq!(arrived.load(Ordering::SeqCst), 1);
    assert_eq!(departed.load(Ordering::SeqCst), 1);

    // Landed exactly on the target's absolute coordinates.
    assert!((engine.pose().x - 300.0).abs() < 1e-3);
    assert!((engine.pose().y - 400.0).abs() < 1e-3);
    assert!((engine.pose().width - 60.0).abs() < 1e-3);
    assert!((engine.pose().height - 60.0).abs() < 1e-3);

    // Arrival tore the whole handshake down.
    assert!(store.source_anchor().is_none());
    assert!(store.target_anchor().is_none());
    assert!(store.overlay_content().is_none());
    assert_eq!(source.source_opacity(), 1.0);

    engine.tick(DT_MS);
    assert!(!engine.is_running());
}

#[test]
fn test_parks_indefinitely_without_target() {
    init_logging();
    let store = create_portal_store::<&'static str>();
    let mut engine = TransitionEngine::new(
        store.clone(),
        Box::new(BallisticStrategy::new(config())),
    );

    let source = source_element(&store);
    let (departed, on_departed) = counter();

    source.capture(CaptureRole::Source, Some(on_departed));

    for _ in 0..4000 {
        engine.tick(DT_MS);
    }

    // Departed, then settled on the floor waiting for a target that never
    // comes. The transition stays live.
    assert_eq!(departed.load(Ordering::SeqCst), 1);
    assert!(engine.is_running());
    assert!(store.is_active());

    let floor = 600.0 - 16.0 - 64.0;
    assert!((engine.pose().y - floor).abs() < 1.0);
}

#[test]
fn test_recapture_cancels_and_restarts() {
    init_logging();
    let store = create_portal_store::<&'static str>();
    let mut engine = TransitionEngine::new(
        store.clone(),
        Box::new(BallisticStrategy::new(config())),
    );

    let source = source_element(&store);
    let target = target_element(&store);
    let (first_departed, on_first) = counter();
    let (second_departed, on_second) = counter();
    let (arrived, on_arrived) = counter();

    source.capture(CaptureRole::Source, Some(on_first));
    for _ in 0..10 {
        engine.tick(DT_MS);
    }
    assert_eq!(first_departed.load(Ordering::SeqCst), 0);

    // An identical re-capture must still cancel and restart; only the new
    // run's callbacks may fire from here on.
    source.capture(CaptureRole::Source, Some(on_second));

    let second_check = second_departed.clone();
    assert!(
        tick_until(&mut engine, 4000, || second_check.load(Ordering::SeqCst) > 0),
        "restarted run never departed"
    );
    target.capture(CaptureRole::Target, Some(on_arrived));
    let arrived_check = arrived.clone();
    assert!(
        tick_until(&mut engine, 400, || arrived_check.load(Ordering::SeqCst) > 0),
        "restarted run never arrived"
    );

    assert_eq!(first_departed.load(Ordering::SeqCst), 0);
    assert_eq!(second_departed.load(Ordering::SeqCst), 1);
    assert_eq!(arrived.load(Ordering::SeqCst), 1);
    assert!((engine.pose().x - 300.0).abs() < 1e-3);
    assert!((engine.pose().y - 400.0).abs() < 1e-3);
}

#[test]
fn test_linear_strategy_end_to_end() {
    init_logging();
    let store = create_portal_store::<&'static str>();
    let mut engine = TransitionEngine::new(
        store.clone(),
        Box::new(LinearStrategy::new(config())),
    );

    let source = source_element(&store);
    let target = target_element(&store);
    let (departed, on_departed) = counter();
    let (arrived, on_arrived) = counter();

    source.capture(CaptureRole::Source, Some(on_departed));
    engine.tick(DT_MS);
    assert_eq!(departed.load(Ordering::SeqCst), 1, "linear departs at once");

    target.capture(CaptureRole::Target, Some(on_arrived));
    let arrived_check = arrived.clone();
    assert!(
        tick_until(&mut engine, 100, || arrived_check.load(Ordering::SeqCst) > 0),
        "linear run never arrived"
    );

    assert_eq!(arrived.load(Ordering::SeqCst), 1);
    assert_eq!(engine.pose().x, 300.0);
    assert_eq!(engine.pose().y, 400.0);
    assert!(store.source_anchor().is_none());
    assert!(store.overlay_content().is_none());
}

#[test]
fn test_target_before_source_is_ignored_by_engine() {
    init_logging();
    let store = create_portal_store::<&'static str>();
    let mut engine = TransitionEngine::new(
        store.clone(),
        Box::new(BallisticStrategy::new(config())),
    );

    let target = target_element(&store);
    let (arrived, on_arrived) = counter();
    target.capture(CaptureRole::Target, Some(on_arrived));

    for _ in 0..50 {
        engine.tick(DT_MS);
    }
    assert_eq!(arrived.load(Ordering::SeqCst), 0);
    assert!(!engine.is_running());
    assert!(store.target_anchor().is_none());
}
