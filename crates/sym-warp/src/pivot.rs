use log::warn;
use sym_core::{ImageView, Moments, Pivot};

/// Pivot chosen for a slice and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotEstimate {
    pub pivot: Pivot,
    /// `true` when the field had no mass and the grid centre was used.
    pub fallback: bool,
}

impl PivotEstimate {
    pub fn explicit(pivot: Pivot) -> Self {
        Self {
            pivot,
            fallback: false,
        }
    }
}

/// Intensity centroid of `field`, truncated toward zero.
///
/// A field with zero total mass has no centroid; the geometric centre
/// `(width / 2, height / 2)` is returned instead and a warning is logged.
pub fn centroid_pivot<T: Copy + Into<f64>>(field: &ImageView<'_, T>) -> PivotEstimate {
    match Moments::of(field).centroid() {
        Some((cx, cy)) => PivotEstimate {
            pivot: Pivot::new(cx.trunc() as i32, cy.trunc() as i32),
            fallback: false,
        },
        None => {
            let pivot = Pivot::grid_center(field.width(), field.height());
            warn!(
                "centroid undefined on {}x{} field (zero mass); using grid centre ({}, {})",
                field.width(),
                field.height(),
                pivot.x,
                pivot.y
            );
            PivotEstimate {
                pivot,
                fallback: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sym_core::{Image, Pivot};

    use super::centroid_pivot;

    #[test]
    fn full_mask_truncates_half_pixel_centroid() {
        let mask = Image::new_fill(10, 10, true);
        let est = centroid_pivot(&mask.as_view());
        assert_eq!(est.pivot, Pivot::new(4, 4));
        assert!(!est.fallback);
    }

    #[test]
    fn off_centre_blob_pulls_pivot() {
        let mut mask = Image::new_fill(12, 8, false);
        for y in 1..4 {
            for x in 7..10 {
                *mask.get_mut(x, y).expect("in bounds") = true;
            }
        }
        let est = centroid_pivot(&mask.as_view());
        assert_eq!(est.pivot, Pivot::new(8, 2));
    }

    #[test]
    fn empty_field_falls_back_to_grid_centre() {
        let _ = env_logger::builder().is_test(true).try_init();
        let field = Image::new_fill(9, 6, 0.0f32);
        let est = centroid_pivot(&field.as_view());
        assert_eq!(est.pivot, Pivot::new(4, 3));
        assert!(est.fallback);
    }
}
