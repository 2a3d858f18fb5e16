use kurbo::{PathEl, Shape};

use crate::composite::pixel::over;
use crate::foundation::core::Canvas;
use crate::foundation::error::{TrackArtError, TrackArtResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

const PATH_TOLERANCE: f64 = 0.1;

pub(crate) fn surface_size(width: u32, height: u32) -> TrackArtResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(TrackArtError::invalid_config(format!(
            "cannot rasterize onto an empty {width}x{height} surface"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| TrackArtError::invalid_config(format!("surface width {width} exceeds u16")))?;
    let h: u16 = height.try_into().map_err(|_| {
        TrackArtError::invalid_config(format!("surface height {height} exceeds u16"))
    })?;
    Ok((w, h))
}

/// Rasterize vector content into a transparent layer and composite it over `base`.
///
/// `vello_cpu` renders into a fresh buffer, so the layer is drawn on its own and then
/// premul-over'd onto a copy of `base`. Pixels the layer does not touch are copied verbatim.
pub(crate) fn draw_layer(
    base: &Canvas,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> TrackArtResult<Canvas> {
    let (w, h) = surface_size(base.width(), base.height())?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    draw(&mut ctx);
    ctx.flush();

    let mut layer = vello_cpu::Pixmap::new(w, h);
    layer.data_as_u8_slice_mut().fill(0);
    ctx.render_to_pixmap(&mut layer);

    let mut out = base.clone();
    for (d, s) in out
        .as_bytes_mut()
        .chunks_exact_mut(4)
        .zip(layer.data_as_u8_slice().chunks_exact(4))
    {
        if s[3] == 0 {
            continue;
        }
        premultiply_rgba8_in_place(d);
        let res = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 255);
        d.copy_from_slice(&res);
        unpremultiply_rgba8_in_place(d);
    }
    Ok(out)
}

pub(crate) fn shape_to_cpu(shape: &impl Shape) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(PATH_TOLERANCE) {
        push_el(&mut out, el);
    }
    out
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        push_el(&mut out, el);
    }
    out
}

fn push_el(out: &mut vello_cpu::kurbo::BezPath, el: PathEl) {
    match el {
        PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
        PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
        PathEl::QuadTo(p1, p2) => out.quad_to(
            vello_cpu::kurbo::Point::new(p1.x, p1.y),
            vello_cpu::kurbo::Point::new(p2.x, p2.y),
        ),
        PathEl::CurveTo(p1, p2, p3) => out.curve_to(
            vello_cpu::kurbo::Point::new(p1.x, p1.y),
            vello_cpu::kurbo::Point::new(p2.x, p2.y),
            vello_cpu::kurbo::Point::new(p3.x, p3.y),
        ),
        PathEl::ClosePath => out.close_path(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
