use super::*;

fn six() -> Dataset {
    let records: Vec<String> = (0..6)
        .map(|i| {
            format!(
                r#"{{ "kind": "timeline_event", "id": "e{i}", "title": "Event {i}", "date": "1911",
                     "description": "Detail {i}" }}"#
            )
        })
        .collect();
    Dataset::from_json_str(&format!(
        r#"{{ "id": "log", "title": "Log", "records": [{}] }}"#,
        records.join(",")
    ))
    .unwrap()
}

fn click(id: &str) -> Interaction {
    Interaction::Click { id: id.to_string() }
}

#[test]
fn visible_count_reference_points() {
    assert_eq!(visible_count(1.0, 6, 1.5, true), 6);
    assert_eq!(visible_count(0.5, 6, 1.5, true), 5);
    assert_eq!(visible_count(0.0, 6, 1.5, true), 0);
    assert_eq!(visible_count(0.01, 6, 1.5, true), 1);
    assert_eq!(visible_count(1.0, 6, 1.5, false), 0);
    assert_eq!(visible_count(0.5, 0, 1.5, true), 0);
}

#[test]
fn visible_count_sanitizes_inputs() {
    assert_eq!(visible_count(f64::NAN, 6, 1.5, true), 0);
    assert_eq!(visible_count(7.0, 6, 1.5, true), 6);
    assert_eq!(visible_count(0.5, 6, f64::INFINITY, true), 3);
    assert_eq!(visible_count(0.5, 6, 0.2, true), 3);
}

#[test]
fn visible_count_is_monotonic_in_progress() {
    let mut last = 0;
    for i in 0..=100 {
        let n = visible_count(i as f64 / 100.0, 6, 1.5, true);
        assert!(n >= last);
        last = n;
    }
}

#[test]
fn items_reveal_as_prefix() {
    let mut g = Infographic::new(six(), RevealConfig::default());
    g.update(ScrollState::new(0.5, true));
    let v = g.infographic_view();
    assert_eq!(v.visible_count, 5);
    assert_eq!(v.total, 6);
    let revealed: Vec<bool> = v.items.iter().map(|i| i.revealed).collect();
    assert_eq!(revealed, [true, true, true, true, true, false]);
    assert_eq!(v.items[0].style, RevealStyle::SHOWN);
    assert_eq!(v.items[5].style.opacity, 0.0);
    assert_eq!(v.items[5].style.translate_y, 20.0);
}

#[test]
fn leaving_view_hides_everything() {
    let mut g = Infographic::new(six(), RevealConfig::default());
    g.update(ScrollState::new(0.8, true));
    g.update(ScrollState::new(0.8, false));
    assert_eq!(g.visible_count(), 0);
}

#[test]
fn selection_survives_progress_updates() {
    let mut g = Infographic::new(six(), RevealConfig::default());
    g.update(ScrollState::new(0.9, true));
    assert!(g.interact(&click("e2")));
    for p in [0.1, 0.0, 1.0, 0.4] {
        g.update(ScrollState::new(p, p > 0.0));
    }
    let v = g.infographic_view();
    assert!(v.items[2].expanded);
    assert!(v.items[2].active);
    assert_eq!(v.items[2].detail.as_deref(), Some("Detail 2"));
    assert_eq!(v.items[1].detail, None);
}

#[test]
fn unknown_click_is_ignored() {
    let mut g = Infographic::new(six(), RevealConfig::default());
    assert!(!g.interact(&click("e9")));
    assert_eq!(g.selection(), &Selection::default());
}

#[test]
fn custom_reveal_factor_is_used() {
    let reveal = RevealConfig {
        reveal_factor: 1.0,
        ..RevealConfig::default()
    };
    let mut g = Infographic::new(six(), reveal);
    g.update(ScrollState::new(0.5, true));
    assert_eq!(g.visible_count(), 3);
}
