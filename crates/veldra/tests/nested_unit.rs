use veldra::*;
use veldra_test_utils::RecordingHost;

fn host() -> RecordingHost {
    let mut host = RecordingHost::new();
    host.set_window_size(400.0, 800.0);
    host
}

#[test]
fn child_open_displaces_parent() {
    let mut host = host();
    let mut nested = NestedDrawerCoordinator::new(Direction::Bottom);
    nested.on_child_open(&mut host);

    let transform = host.transform(Part::Panel).unwrap();
    assert!((transform.scale - (400.0 - 16.0) / 400.0).abs() < 1e-6);
    assert_eq!(transform.translate.y, -16.0);
}

#[test]
fn child_drag_interpolates_continuously() {
    let mut host = host();
    let mut nested = NestedDrawerCoordinator::new(Direction::Bottom);
    nested.on_child_open(&mut host);

    nested.on_child_drag(&mut host, 0.5);
    let transform = host.transform(Part::Panel).unwrap();
    assert_eq!(transform.translate.y, -8.0);
    let full = (400.0 - 16.0) / 400.0;
    assert!((transform.scale - (full + (1.0 - full) * 0.5)).abs() < 1e-6);
    // Transition disabled so the parent follows the finger directly.
    assert_eq!(host.transition(Part::Panel), None);
}

#[test]
fn child_release_settles_parent_both_ways() {
    let mut host = host();
    let mut nested = NestedDrawerCoordinator::new(Direction::Bottom);
    nested.on_child_open(&mut host);

    nested.on_child_release(&mut host, true);
    assert_eq!(host.transform(Part::Panel).unwrap().translate.y, -16.0);
    assert!(nested.is_displaced());

    nested.on_child_release(&mut host, false);
    let transform = host.transform(Part::Panel).unwrap();
    assert!((transform.scale - 1.0).abs() < 1e-6);
    assert!(!nested.is_displaced());
}

#[test]
fn reset_is_instantaneous() {
    let mut host = host();
    let mut nested = NestedDrawerCoordinator::new(Direction::Bottom);
    nested.on_child_open(&mut host);
    nested.reset(&mut host);

    assert_eq!(host.transition(Part::Panel), None);
    assert_eq!(host.transform(Part::Panel), Some(Transform::IDENTITY));
    assert!(!nested.is_displaced());
}
