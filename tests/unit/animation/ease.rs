use super::*;

#[test]
fn endpoints_are_exact() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_on_a_fine_grid() {
    for ease in Ease::ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=1000 {
            let v = ease.apply(f64::from(i) / 1000.0);
            assert!(v >= prev, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn out_cubic_matches_closed_form() {
    let t = 0.3_f64;
    assert_eq!(Ease::OutCubic.apply(t), 1.0 - (1.0 - t).powi(3));
    assert_eq!(Ease::default(), Ease::OutCubic);
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(4.0), 1.0);
        assert_eq!(ease.apply(f64::NAN), 0.0);
    }
}
