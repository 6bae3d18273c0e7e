use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k: &str| map.get(k).cloned()
}

#[test]
fn defaults_match_reveal_constants() {
    let o = PageOpts::default();
    o.validate().unwrap();
    assert_eq!(o.reveal, RevealConfig::DEFAULT);
    assert_eq!(o.reveal.reveal_factor, 1.5);
    assert_eq!(o.tick_hz, 30);
    assert!(!o.reduced_motion);
}

#[test]
fn partial_json_fills_defaults() {
    let o = PageOpts::from_json_str(r#"{ "reduced_motion": true, "reveal": { "reveal_factor": 2.0 } }"#)
        .unwrap();
    assert!(o.reduced_motion);
    assert_eq!(o.reveal.reveal_factor, 2.0);
    assert_eq!(o.reveal.window_start, 0.10);
    assert_eq!(o.tick_hz, 30);
}

#[test]
fn rejects_out_of_range_values() {
    assert!(PageOpts::from_json_str(r#"{ "tick_hz": 0 }"#).is_err());
    assert!(PageOpts::from_json_str(r#"{ "reveal": { "window_start": 0.9, "window_end": 0.2 } }"#).is_err());
    assert!(matches!(
        PageOpts::from_json_str("{ not json"),
        Err(ReelError::Serde(_))
    ));
}

#[test]
fn env_overrides_apply_and_ignore_garbage() {
    let o = PageOpts::default().with_overrides_from(env(&[
        (ENV_REDUCED_MOTION, "Yes"),
        (ENV_TICK_HZ, "60"),
    ]));
    assert!(o.reduced_motion);
    assert_eq!(o.tick_hz, 60);

    let o = PageOpts::default().with_overrides_from(env(&[
        (ENV_REDUCED_MOTION, "maybe"),
        (ENV_TICK_HZ, "0"),
    ]));
    assert!(!o.reduced_motion);
    assert_eq!(o.tick_hz, 30);
}

#[test]
fn tick_dt_follows_rate() {
    let o = PageOpts {
        tick_hz: 50,
        ..PageOpts::default()
    };
    assert_eq!(o.tick_dt(), 0.02);
}
