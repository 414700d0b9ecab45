use sym_core::{Affine2, BorderMode, Image, ImageView, Interpolation, Pivot, sample};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WarpConfig {
    pub interpolation: Interpolation,
    pub border: BorderMode,
}

/// Resamples `src` onto a grid of the same shape through `dst_to_src`.
///
/// Every destination pixel centre `(x, y)` reads `src` at
/// `dst_to_src(x, y)`; `out` is reshaped when needed.
pub fn warp_inverse_into<T: Copy + Into<f32>>(
    src: &ImageView<'_, T>,
    dst_to_src: &Affine2,
    cfg: &WarpConfig,
    out: &mut Image<f32>,
) {
    let (w, h) = (src.width(), src.height());
    out.ensure_shape(w, h, 0.0);
    if w == 0 || h == 0 {
        return;
    }

    let [[a, b, tx], [c, d, ty]] = dst_to_src.m;
    for y in 0..h {
        let yf = y as f64;
        let (row_x, row_y) = (b * yf + tx, d * yf + ty);
        for (x, px) in out.row_mut(y).iter_mut().enumerate() {
            let xf = x as f64;
            let sx = a * xf + row_x;
            let sy = c * xf + row_y;
            *px = sample(src, sx as f32, sy as f32, cfg.interpolation, cfg.border);
        }
    }
}

/// Rotates `src` by `angle_deg` about `pivot`, keeping the grid.
///
/// Positive angles turn content counter-clockwise as displayed (y down).
pub fn rotate_about_into<T: Copy + Into<f32>>(
    src: &ImageView<'_, T>,
    pivot: Pivot,
    angle_deg: f32,
    cfg: &WarpConfig,
    out: &mut Image<f32>,
) {
    // The inverse of a rotation about a point is the opposite rotation.
    let dst_to_src = Affine2::rotation_about(pivot.to_point(), -(angle_deg as f64), 1.0);
    warp_inverse_into(src, &dst_to_src, cfg, out);
}

pub fn rotate_about<T: Copy + Into<f32>>(
    src: &ImageView<'_, T>,
    pivot: Pivot,
    angle_deg: f32,
    cfg: &WarpConfig,
) -> Image<f32> {
    let mut out = Image::new_fill(src.width(), src.height(), 0.0);
    rotate_about_into(src, pivot, angle_deg, cfg, &mut out);
    out
}
