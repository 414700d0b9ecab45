//! Raw image moments up to first order.

use crate::image::ImageView;

/// Raw spatial moments `m_pq = Σ x^p y^q I(x, y)` with `x` the column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Accumulates moments over a scalar field or a boolean mask.
    pub fn of<T: Copy + Into<f64>>(img: &ImageView<'_, T>) -> Self {
        let mut m = Self::default();
        for (y, row) in img.rows().enumerate() {
            let mut row_mass = 0.0f64;
            let mut row_m10 = 0.0f64;
            for (x, &v) in row.iter().enumerate() {
                let v: f64 = v.into();
                row_mass += v;
                row_m10 += x as f64 * v;
            }
            m.m00 += row_mass;
            m.m10 += row_m10;
            m.m01 += y as f64 * row_mass;
        }
        m
    }

    /// Intensity centroid `(m10 / m00, m01 / m00)`.
    ///
    /// `None` when the total mass is zero or the ratio is not finite.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        let cx = self.m10 / self.m00;
        let cy = self.m01 / self.m00;
        (cx.is_finite() && cy.is_finite()).then_some((cx, cy))
    }
}

#[cfg(test)]
mod tests {
    use super::Moments;
    use crate::Image;

    #[test]
    fn uniform_mask_centroid_is_grid_center() {
        let mask = Image::new_fill(10, 10, true);
        let m = Moments::of(&mask.as_view());
        assert_eq!(m.m00, 100.0);
        assert_eq!(m.centroid(), Some((4.5, 4.5)));
    }

    #[test]
    fn weighted_centroid_follows_mass() {
        let mut img = Image::new_fill(5, 4, 0.0f32);
        *img.get_mut(1, 1).expect("in bounds") = 1.0;
        *img.get_mut(4, 3).expect("in bounds") = 3.0;
        let (cx, cy) = Moments::of(&img.as_view()).centroid().expect("non-zero mass");
        assert!((cx - 3.25).abs() < 1e-12);
        assert!((cy - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_mass_has_no_centroid() {
        let img = Image::new_fill(3, 3, 0.0f32);
        assert_eq!(Moments::of(&img.as_view()).centroid(), None);
    }
}
