use sym_core::Image;

/// Radius of the synthetic pattern disk.
pub const RADIUS: f32 = 30.0;

/// Textured disk: stripes along `x` (even in `x`), a ramp along `y`.
///
/// Values inside the disk lie in `[1, 9]`, everything outside is zero.
fn pattern(dx: f32, dy: f32) -> f32 {
    if dx * dx + dy * dy >= RADIUS * RADIUS {
        return 0.0;
    }
    (2.0 + (0.45 * dx.abs()).cos()) * (2.0 + dy / RADIUS)
}

/// Pattern centred at `(cx, cy)` and turned by `tilt_deg`, so that rotating
/// the slice by `+tilt_deg` about the centre brings it upright.
pub fn tilted_pattern(
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    tilt_deg: f32,
) -> Image<f32> {
    let (s, c) = tilt_deg.to_radians().sin_cos();
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let (dx, dy) = (x as f32 - cx, y as f32 - cy);
            let u = c * dx + s * dy;
            let v = -s * dx + c * dy;
            data.push(pattern(u, v));
        }
    }
    Image::from_vec(width, height, data).expect("valid image")
}

/// Upright pattern, exactly mirror-symmetric about column `cx`.
pub fn upright_pattern(width: usize, height: usize, cx: f32, cy: f32) -> Image<f32> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(pattern(x as f32 - cx, y as f32 - cy));
        }
    }
    Image::from_vec(width, height, data).expect("valid image")
}
