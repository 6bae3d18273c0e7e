use super::*;

#[test]
fn color_blend_hits_endpoints_and_midpoint() {
    let dusk = Rgba8::opaque(200, 120, 60);
    let night = Rgba8::opaque(20, 24, 60);
    assert_eq!(blend(&dusk, &night, 0.0), dusk);
    assert_eq!(blend(&dusk, &night, 1.0), night);
    assert_eq!(blend(&dusk, &night, 0.5), Rgba8::opaque(110, 72, 60));
}

#[test]
fn blend_clamps_t() {
    assert_eq!(blend(&0.0, &10.0, 2.0), 10.0);
    assert_eq!(blend(&0.0, &10.0, -1.0), 0.0);
    assert_eq!(blend(&0.0, &10.0, f64::NAN), 0.0);
}

#[test]
fn point_lerp_is_linear() {
    let p = blend(&Point::new(0.0, 10.0), &Point::new(100.0, 30.0), 0.25);
    assert_eq!(p, Point::new(25.0, 15.0));
}
