use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{BezPath, FrameRGBA, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::graph::{SceneGraph, Shape};

/// A drawing surface exclusively owned by one live scene.
pub trait DrawingSurface {
    /// Surface size in px.
    fn size(&self) -> (u16, u16);

    /// Redraw the whole surface from `graph`.
    fn draw(&mut self, graph: &SceneGraph) -> ReelResult<()>;

    /// Read back the last drawn frame.
    fn read_frame(&self) -> FrameRGBA;
}

/// Creates drawing surfaces on demand.
///
/// Scenes only call this when they enter the viewport; an `Err` makes the scene fall back to its
/// static description instead of failing the page.
pub trait SurfaceFactory {
    /// Allocate a `width x height` surface.
    fn create(&self, width: u16, height: u16) -> ReelResult<Box<dyn DrawingSurface>>;
}

/// CPU surfaces rasterized with `vello_cpu`.
#[derive(Clone, Copy, Debug)]
pub struct CpuSurfaceFactory {
    /// Largest accepted side length, in px.
    pub max_side: u16,
    /// Color the surface is cleared to before each draw.
    pub clear: Rgba8,
}

impl Default for CpuSurfaceFactory {
    fn default() -> Self {
        Self {
            max_side: 1024,
            clear: Rgba8::TRANSPARENT,
        }
    }
}

impl SurfaceFactory for CpuSurfaceFactory {
    fn create(&self, width: u16, height: u16) -> ReelResult<Box<dyn DrawingSurface>> {
        if width == 0 || height == 0 {
            return Err(ReelError::surface("surface width/height must be > 0"));
        }
        if width > self.max_side || height > self.max_side {
            return Err(ReelError::surface(format!(
                "surface {width}x{height} exceeds max side {}",
                self.max_side
            )));
        }
        Ok(Box::new(CpuSurface {
            width,
            height,
            clear: self.clear,
            pixmap: vello_cpu::Pixmap::new(width, height),
        }))
    }
}

struct CpuSurface {
    width: u16,
    height: u16,
    clear: Rgba8,
    pixmap: vello_cpu::Pixmap,
}

impl DrawingSurface for CpuSurface {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw(&mut self, graph: &SceneGraph) -> ReelResult<()> {
        clear_pixmap(&mut self.pixmap, self.clear.to_premul());

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if self.clear.a > 0 {
            let c = self.clear;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        for entity in graph.draw_order() {
            let alpha = if entity.alpha.is_nan() {
                0.0
            } else {
                entity.alpha.clamp(0.0, 1.0)
            };
            if alpha <= 0.0 {
                continue;
            }

            let pos = entity.draw_position();
            let color = entity.draw_color();
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((pos.x, pos.y)));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
            if alpha < 1.0 {
                ctx.push_opacity_layer(alpha as f32);
            }
            match &entity.shape {
                Shape::Rect { width, height } => {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, *width, *height));
                }
                Shape::Circle { radius } => {
                    let circle = vello_cpu::kurbo::Circle::new((0.0, 0.0), *radius);
                    ctx.fill_path(&circle.to_path(0.1));
                }
                Shape::Path(path) => ctx.fill_path(&bezpath_to_cpu(path)),
            }
            if alpha < 1.0 {
                ctx.pop_layer();
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    fn read_frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/surface.rs"]
mod tests;
