use crate::image::ImageView;

/// How samples outside the grid are resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode {
    /// Out-of-grid samples read a fixed value.
    Constant(f32),
    /// Clamp to the nearest edge pixel.
    Replicate,
    /// Mirror about edge pixels without repeating them (`dcb|abcd|cba`).
    Reflect101,
}

impl Default for BorderMode {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl BorderMode {
    /// Maps a possibly out-of-range index into `[0, len)`.
    ///
    /// Returns `None` when the constant border applies or `len == 0`.
    pub fn resolve(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            Self::Constant(_) => None,
            Self::Replicate => Some(if i < 0 { 0 } else { len - 1 }),
            Self::Reflect101 => {
                if len == 1 {
                    return Some(0);
                }
                let period = (2 * len - 2) as isize;
                let r = i.rem_euclid(period) as usize;
                Some(if r < len { r } else { 2 * len - 2 - r })
            }
        }
    }

    fn fill(&self) -> f32 {
        match self {
            Self::Constant(v) => *v,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
}

/// Samples `img` at pixel-centre coordinates `(x, y)`.
pub fn sample<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: f32,
    y: f32,
    interpolation: Interpolation,
    border: BorderMode,
) -> f32 {
    match interpolation {
        Interpolation::Nearest => pixel_or_border(img, x.round() as isize, y.round() as isize, border),
        Interpolation::Bilinear => sample_bilinear(img, x, y, border),
    }
}

/// Floor-based 2x2 bilinear interpolation.
pub fn sample_bilinear<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: f32,
    y: f32,
    border: BorderMode,
) -> f32 {
    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let dx = x - x0 as f32;
    let dy = y - y0 as f32;

    let p00 = pixel_or_border(img, x0, y0, border);
    if dx == 0.0 && dy == 0.0 {
        return p00;
    }
    let p10 = pixel_or_border(img, x0 + 1, y0, border);
    let p01 = pixel_or_border(img, x0, y0 + 1, border);
    let p11 = pixel_or_border(img, x0 + 1, y0 + 1, border);

    let top = p00 * (1.0 - dx) + p10 * dx;
    let bottom = p01 * (1.0 - dx) + p11 * dx;
    top * (1.0 - dy) + bottom * dy
}

fn pixel_or_border<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: isize,
    y: isize,
    border: BorderMode,
) -> f32 {
    let (Some(xi), Some(yi)) = (
        border.resolve(x, img.width()),
        border.resolve(y, img.height()),
    ) else {
        return border.fill();
    };
    img.get(xi, yi).map_or(border.fill(), |&v| v.into())
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, Interpolation, sample, sample_bilinear};
    use crate::Image;

    #[test]
    fn resolve_replicate_and_reflect() {
        let rep = BorderMode::Replicate;
        assert_eq!(rep.resolve(-3, 5), Some(0));
        assert_eq!(rep.resolve(2, 5), Some(2));
        assert_eq!(rep.resolve(9, 5), Some(4));

        let refl = BorderMode::Reflect101;
        let cases = [(-2, 2), (-1, 1), (0, 0), (4, 4), (5, 3), (6, 2)];
        for (i, expected) in cases {
            assert_eq!(refl.resolve(i, 5), Some(expected), "index {i}");
        }
        assert_eq!(refl.resolve(-4, 1), Some(0));

        assert_eq!(BorderMode::Constant(1.0).resolve(-1, 5), None);
        assert_eq!(BorderMode::Replicate.resolve(0, 0), None);
    }

    #[test]
    fn bilinear_interpolates_inside_and_fills_outside() {
        let img = Image::from_vec(2, 2, vec![0.0f32, 10.0, 20.0, 30.0]).expect("valid image");
        let view = img.as_view();

        let center = sample_bilinear(&view, 0.5, 0.5, BorderMode::Constant(0.0));
        assert!((center - 15.0).abs() < 1e-6);

        let exact = sample_bilinear(&view, 1.0, 1.0, BorderMode::Constant(-1.0));
        assert_eq!(exact, 30.0);

        // Three of the four taps fall outside and read the fill value.
        let edge = sample_bilinear(&view, -0.25, -0.25, BorderMode::Constant(100.0));
        assert!((edge - 43.75).abs() < 1e-4);

        let replicated = sample_bilinear(&view, -0.25, -0.25, BorderMode::Replicate);
        assert!(replicated.abs() < 1e-6);
    }

    #[test]
    fn nearest_rounds_to_closest_pixel() {
        let img = Image::from_vec(3, 1, vec![1u8, 2, 3]).expect("valid image");
        let view = img.as_view();
        let v = sample(&view, 1.4, 0.2, Interpolation::Nearest, BorderMode::default());
        assert_eq!(v, 2.0);
        let out = sample(&view, 3.6, 0.0, Interpolation::Nearest, BorderMode::default());
        assert_eq!(out, 0.0);
    }
}
