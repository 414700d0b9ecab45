/// Integer rotation centre; `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pivot {
    pub x: i32,
    pub y: i32,
}

impl Pivot {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Geometric centre of a `width x height` grid, rounded down.
    pub fn grid_center(width: usize, height: usize) -> Self {
        Self {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
        }
    }

    pub fn to_point(self) -> Point2f {
        Point2f {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

/// Sine and cosine of an angle in degrees.
///
/// Multiples of 90 degrees return exact `0`/`±1` so quarter turns map pixel
/// centres onto pixel centres.
pub fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    let turns = angle_deg / 90.0;
    if turns.fract() == 0.0 && turns.is_finite() {
        return match (turns as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    angle_deg.to_radians().sin_cos()
}

/// 2x3 affine map `p' = A p + t`, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    pub m: [[f64; 3]; 2],
}

impl Affine2 {
    /// Rotation by `angle_deg` about `center` with isotropic `scale`.
    ///
    /// Matches the classic image-processing convention with a y-down grid:
    /// positive angles turn content counter-clockwise as displayed.
    pub fn rotation_about(center: Point2f, angle_deg: f64, scale: f64) -> Self {
        let (sin, cos) = sin_cos_deg(angle_deg);
        let alpha = scale * cos;
        let beta = scale * sin;
        let cx = center.x as f64;
        let cy = center.y as f64;
        Self {
            m: [
                [alpha, beta, (1.0 - alpha) * cx - beta * cy],
                [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
            ],
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [r0, r1] = self.m;
        (
            r0[0] * x + r0[1] * y + r0[2],
            r1[0] * x + r1[1] * y + r1[2],
        )
    }
}
