use sym_core::Point2f;

use crate::search::SliceResult;

/// Volume-level view of a search: mean axis angle and mean pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetrySummary {
    pub mean_angle_deg: f32,
    pub mean_pivot: Point2f,
    pub slices: usize,
}

/// Averages angles and pivots over `results`; `None` when there are none.
///
/// Angles are averaged arithmetically, the same way pivots are.
pub fn summarize(results: &[SliceResult]) -> Option<SymmetrySummary> {
    if results.is_empty() {
        return None;
    }
    let n = results.len() as f64;
    let (angle, px, py) = results.iter().fold((0.0f64, 0.0f64, 0.0f64), |acc, r| {
        (
            acc.0 + r.angle_deg as f64,
            acc.1 + r.pivot.x as f64,
            acc.2 + r.pivot.y as f64,
        )
    });
    Some(SymmetrySummary {
        mean_angle_deg: (angle / n) as f32,
        mean_pivot: Point2f {
            x: (px / n) as f32,
            y: (py / n) as f32,
        },
        slices: results.len(),
    })
}

#[cfg(test)]
mod tests {
    use sym_core::{Pivot, Point2f};

    use super::summarize;
    use crate::search::SliceResult;

    fn result(index: usize, angle_deg: f32, x: i32, y: i32) -> SliceResult {
        SliceResult {
            index,
            angle_deg,
            pivot: Pivot::new(x, y),
            peak_score: 1.0,
            pivot_fallback: false,
        }
    }

    #[test]
    fn empty_results_have_no_summary() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn means_are_componentwise() {
        let results = [result(0, 10.0, 4, 6), result(1, 20.0, 5, 9), result(2, 36.0, 9, 3)];
        let s = summarize(&results).expect("non-empty");
        assert_eq!(s.slices, 3);
        assert!((s.mean_angle_deg - 22.0).abs() < 1e-6);
        assert_eq!(s.mean_pivot, Point2f { x: 6.0, y: 6.0 });
    }
}
