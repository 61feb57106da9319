use veldra::*;
use veldra_core::math::Vec2;
use veldra_test_utils::RecordingHost;

fn quirky() -> PositionFixedManager {
    PositionFixedManager::new(PlatformCaps::quirky_touch())
}

#[test]
fn capture_anchors_at_negative_scroll() {
    let mut host = RecordingHost::new();
    host.set_scroll_position(0.0, 240.0);
    let mut manager = quirky();

    manager.capture(&mut host);
    let style = host.body_style_snapshot();
    assert_eq!(style.position, "fixed");
    assert_eq!(style.top, "-240px");
    assert_eq!(style.left, "0px");
}

#[test]
fn second_capture_is_noop() {
    let mut host = RecordingHost::new();
    host.set_scroll_position(0.0, 240.0);
    let mut manager = quirky();

    manager.capture(&mut host);
    host.set_scroll_position(0.0, 900.0);
    manager.capture(&mut host);

    // Still anchored at the first capture.
    assert_eq!(host.body_style_snapshot().top, "-240px");
}

#[test]
fn restore_returns_style_and_scroll_exactly() {
    let mut host = RecordingHost::new();
    host.set_body_style(BodyStyle {
        position: "relative".into(),
        top: "4px".into(),
        left: "".into(),
        height: "100%".into(),
    });
    host.set_scroll_position(0.0, 240.0);
    let mut manager = quirky();

    manager.capture(&mut host);
    manager.restore(&mut host);

    let style = host.body_style_snapshot();
    assert_eq!(style.position, "relative");
    assert_eq!(style.top, "4px");
    assert_eq!(style.height, "100%");
    assert_eq!(host.last_scroll_to(), Some(Vec2::new(0.0, 240.0)));
    assert!(!manager.is_captured());
}

#[test]
fn restore_without_capture_is_noop() {
    let mut host = RecordingHost::new();
    let mut manager = quirky();
    manager.restore(&mut host);
    assert!(host.last_scroll_to().is_none());
}

#[test]
fn compliant_platform_never_captures() {
    let mut host = RecordingHost::new();
    let mut manager = PositionFixedManager::new(PlatformCaps::desktop());
    manager.capture(&mut host);
    assert!(!manager.is_captured());
    assert_eq!(host.body_style_snapshot().position, "");
}
