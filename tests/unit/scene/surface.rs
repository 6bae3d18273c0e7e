use super::*;
use crate::foundation::core::Point;
use crate::scene::graph::VisualEntity;

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn factory_rejects_empty_and_oversized_surfaces() {
    let f = CpuSurfaceFactory::default();
    assert!(f.create(0, 10).is_err());
    assert!(f.create(10, 0).is_err());
    assert!(f.create(2048, 10).is_err());
    let s = f.create(16, 9).unwrap();
    assert_eq!(s.size(), (16, 9));
}

#[test]
fn draws_opaque_rect() {
    let f = CpuSurfaceFactory::default();
    let mut s = f.create(8, 8).unwrap();
    let mut g = SceneGraph::new();
    g.spawn(VisualEntity::new(
        Shape::Rect {
            width: 4.0,
            height: 4.0,
        },
        Point::new(0.0, 0.0),
        Rgba8::opaque(255, 0, 0),
    ));
    s.draw(&g).unwrap();

    let frame = s.read_frame();
    assert_eq!(frame.data.len(), 8 * 8 * 4);
    assert!(frame.premultiplied);
    assert_eq!(pixel(&frame, 1, 1), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 6, 6), [0, 0, 0, 0]);
}

#[test]
fn zero_alpha_entities_are_skipped() {
    let f = CpuSurfaceFactory {
        clear: Rgba8::opaque(0, 0, 255),
        ..CpuSurfaceFactory::default()
    };
    let mut s = f.create(4, 4).unwrap();
    let mut g = SceneGraph::new();
    g.spawn(
        VisualEntity::new(
            Shape::Rect {
                width: 4.0,
                height: 4.0,
            },
            Point::ORIGIN,
            Rgba8::opaque(255, 255, 255),
        )
        .with_alpha(0.0),
    );
    s.draw(&g).unwrap();
    assert_eq!(pixel(&s.read_frame(), 2, 2), [0, 0, 255, 255]);
}
