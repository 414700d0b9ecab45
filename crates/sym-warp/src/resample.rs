use sym_core::{Image, ImageView, Pivot};

use crate::pivot::{PivotEstimate, centroid_pivot};
use crate::rotate::{WarpConfig, rotate_about_into};

/// Where the rotation centre of a resample comes from.
#[derive(Debug, Clone, Copy)]
pub enum PivotSource<'a> {
    /// Use this pivot as-is.
    Explicit(Pivot),
    /// Centroid of a foreground mask of the slice.
    MaskCentroid(ImageView<'a, bool>),
    /// Intensity centroid of the slice itself.
    SliceCentroid,
}

impl PivotSource<'_> {
    pub fn resolve(&self, slice: &ImageView<'_, f32>) -> PivotEstimate {
        match self {
            Self::Explicit(pivot) => PivotEstimate::explicit(*pivot),
            Self::MaskCentroid(mask) => centroid_pivot(mask),
            Self::SliceCentroid => centroid_pivot(slice),
        }
    }
}

/// Rotates `slice` by `angle_deg` about the pivot named by `source`.
///
/// Returns the resampled slice and the pivot that was used, so that callers
/// can pass it back as [`PivotSource::Explicit`] for further angles.
pub fn resample_at_angle(
    slice: &ImageView<'_, f32>,
    angle_deg: f32,
    source: PivotSource<'_>,
    cfg: &WarpConfig,
) -> (Image<f32>, PivotEstimate) {
    let mut out = Image::new_fill(slice.width(), slice.height(), 0.0);
    let estimate = resample_at_angle_into(slice, angle_deg, source, cfg, &mut out);
    (out, estimate)
}

/// [`resample_at_angle`] writing into a reusable buffer.
pub fn resample_at_angle_into(
    slice: &ImageView<'_, f32>,
    angle_deg: f32,
    source: PivotSource<'_>,
    cfg: &WarpConfig,
    out: &mut Image<f32>,
) -> PivotEstimate {
    let estimate = source.resolve(slice);
    rotate_about_into(slice, estimate.pivot, angle_deg, cfg, out);
    estimate
}

#[cfg(test)]
mod tests {
    use sym_core::{Image, Pivot};

    use super::{PivotSource, resample_at_angle};
    use crate::WarpConfig;

    fn blob() -> (Image<f32>, Image<bool>) {
        let mut img = Image::new_fill(11, 9, 0.0f32);
        for y in 2..5 {
            for x in 5..9 {
                *img.get_mut(x, y).expect("in bounds") = (x + y) as f32;
            }
        }
        let mask = img.map(|&v| v > 0.0);
        (img, mask)
    }

    #[test]
    fn mask_centroid_is_reported_and_reusable() {
        let (img, mask) = blob();
        let cfg = WarpConfig::default();

        let (first, est) =
            resample_at_angle(&img.as_view(), 0.0, PivotSource::MaskCentroid(mask.as_view()), &cfg);
        // Mask covers columns 5..=8 and rows 2..=4: centroid (6.5, 3).
        assert_eq!(est.pivot, Pivot::new(6, 3));
        assert!(!est.fallback);
        assert_eq!(first, img);

        let (_, again) =
            resample_at_angle(&img.as_view(), 45.0, PivotSource::Explicit(est.pivot), &cfg);
        assert_eq!(again.pivot, est.pivot);
    }

    #[test]
    fn slice_centroid_weights_by_intensity() {
        let (img, _) = blob();
        let (_, est) =
            resample_at_angle(&img.as_view(), 10.0, PivotSource::SliceCentroid, &WarpConfig::default());
        // Brighter pixels sit to the lower right; the weighted x stays in column 6.
        assert_eq!(est.pivot, Pivot::new(6, 3));
    }

    #[test]
    fn empty_mask_uses_grid_centre() {
        let (img, _) = blob();
        let empty = Image::new_fill(11, 9, false);
        let (_, est) = resample_at_angle(
            &img.as_view(),
            0.0,
            PivotSource::MaskCentroid(empty.as_view()),
            &WarpConfig::default(),
        );
        assert_eq!(est.pivot, Pivot::new(5, 4));
        assert!(est.fallback);
    }
}
