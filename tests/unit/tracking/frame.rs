use super::*;

#[test]
fn burst_of_requests_schedules_one_frame() {
    let mut c = FrameCoalescer::new();
    let first = c.request();
    assert!(first.is_some());
    for _ in 0..9 {
        assert_eq!(c.request(), None);
    }
    assert_eq!(c.pending(), first);

    let st = c.stats();
    assert_eq!(st.requested, 10);
    assert_eq!(st.merged, 9);
}

#[test]
fn firing_clears_pending_and_allows_next_request() {
    let mut c = FrameCoalescer::new();
    let a = c.request().unwrap();
    assert!(c.fire(a));
    assert_eq!(c.pending(), None);

    let b = c.request().unwrap();
    assert_ne!(a, b);
    assert!(!c.fire(a), "old token must be stale");
    assert!(c.fire(b));
    assert_eq!(c.stats().fired, 2);
    assert_eq!(c.stats().dropped, 1);
}

#[test]
fn cancelled_token_is_rejected() {
    let mut c = FrameCoalescer::new();
    let a = c.request().unwrap();
    assert_eq!(c.cancel(), Some(a));
    assert!(!c.fire(a));
    assert_eq!(c.cancel(), None);
}
