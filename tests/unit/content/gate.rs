use super::*;

#[test]
fn fresh_session_blocks_until_dismissed() {
    let store = MemorySessionStore::new();
    let mut gate = ContentGate::open(&store);
    assert!(!gate.is_dismissed());
    assert!(gate.pass().is_none());

    gate.dismiss(&store);
    assert!(gate.pass().is_some());
    assert_eq!(store.get(CONTENT_WARNING_KEY), Some(true));
}

#[test]
fn dismissal_is_written_once() {
    let store = MemorySessionStore::new();
    let mut gate = ContentGate::open(&store);
    gate.dismiss(&store);
    gate.dismiss(&store);
    assert_eq!(store.writes(), 1);
}

#[test]
fn returning_visitor_passes_without_writing() {
    let store = MemorySessionStore::with_flag(CONTENT_WARNING_KEY, true);
    let mut gate = ContentGate::open(&store);
    assert!(gate.pass().is_some());
    gate.dismiss(&store);
    assert_eq!(store.writes(), 0);
}

#[test]
fn flag_is_read_only_at_open() {
    let store = MemorySessionStore::new();
    let gate = ContentGate::open(&store);
    store.set(CONTENT_WARNING_KEY, true);
    assert!(gate.pass().is_none());
}
