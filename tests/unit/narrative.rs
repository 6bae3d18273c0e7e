use super::*;

fn block() -> NarrativeBlock {
    NarrativeBlock::new(
        Some("The night of the fire".to_string()),
        (0..5).map(|i| format!("paragraph {i}")).collect(),
        true,
        RevealConfig::DEFAULT,
    )
}

fn visible(view: &NarrativeView) -> Vec<bool> {
    view.paragraphs.iter().map(|p| p.style.opacity > 0.0).collect()
}

#[test]
fn nothing_is_revealed_at_rest() {
    let v = block().view_at(0.0);
    assert_eq!(v.headline.unwrap().style.opacity, 0.0);
    assert!(v.paragraphs.iter().all(|p| p.style.opacity == 0.0));
    assert_eq!(v.divider_percent, Some(0.0));
}

#[test]
fn everything_is_revealed_past_the_window() {
    let v = block().view_at(0.9);
    assert_eq!(v.headline.unwrap().style, RevealStyle::SHOWN);
    assert!(v.paragraphs.iter().all(|p| p.style == RevealStyle::SHOWN));
    assert_eq!(v.divider_percent, Some(100.0));
}

#[test]
fn reversal_shows_the_same_paragraphs_as_a_direct_scroll() {
    let mut b = block();
    b.update(ScrollState::new(0.7, true));
    b.update(ScrollState::new(0.3, true));
    let BlockView::Narrative(reversed) = b.view() else {
        panic!("narrative block produced a non-narrative view");
    };

    let direct = block().view_at(0.3);
    assert_eq!(visible(&reversed), visible(&direct));
    assert_eq!(reversed, direct);
}

#[test]
fn divider_is_omitted_when_disabled() {
    let b = NarrativeBlock::new(None, vec![], false, RevealConfig::DEFAULT);
    let v = b.view_at(0.5);
    assert!(v.headline.is_none());
    assert!(v.divider_percent.is_none());
}
