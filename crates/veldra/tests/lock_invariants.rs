//! Reference-count invariants for the shared scroll lock.

use veldra::{PlatformCaps, ScrollLockService};
use veldra_test_utils::RecordingHost;

/// For N holders the suppression side effect must be installed exactly
/// once and removed exactly once, for every release order.
#[test]
fn every_release_order_unlocks_exactly_once() {
    // All permutations of three holders.
    let orders: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in orders {
        let mut host = RecordingHost::new();
        let mut lock = ScrollLockService::new(PlatformCaps::desktop());

        let mut tokens: Vec<_> = (0..3).map(|_| Some(lock.acquire(&mut host))).collect();
        assert_eq!(host.scroll_suppression_installs(), 1);

        for (step, &index) in order.iter().enumerate() {
            let token = tokens[index].take().unwrap();
            lock.release(token, &mut host);
            let released = step + 1;
            if released < 3 {
                assert!(lock.is_locked(), "unlocked early in order {order:?}");
                assert_eq!(host.scroll_suppression_removals(), 0);
            }
        }
        assert!(!lock.is_locked());
        assert_eq!(host.scroll_suppression_installs(), 1);
        assert_eq!(host.scroll_suppression_removals(), 1);
    }
}

/// Re-acquiring after a full unlock installs the suppression again.
#[test]
fn relock_reinstalls_suppression() {
    let mut host = RecordingHost::new();
    let mut lock = ScrollLockService::new(PlatformCaps::desktop());

    let token = lock.acquire(&mut host);
    lock.release(token, &mut host);
    let token = lock.acquire(&mut host);
    assert_eq!(host.scroll_suppression_installs(), 2);
    lock.release(token, &mut host);
    assert_eq!(host.scroll_suppression_removals(), 2);
}
