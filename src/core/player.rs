use glam::DVec2;
use std::f64::consts::TAU;

/// Folds any angle (in turns) into `[0, 1)`.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let mut frac = angle.fract();
    if frac < 0.0 {
        frac += 1.0;
    }
    // -1e-20 + 1.0 rounds up to exactly 1.0
    if frac >= 1.0 { 0.0 } else { frac }
}

/// Unit forward vector for an angle in turns.
#[inline]
pub fn heading_vector(angle: f64) -> DVec2 {
    let (sin, cos) = (TAU * angle).sin_cos();
    DVec2::new(cos, sin)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub pos: DVec2,
    /// Heading in turns, `[0, 1)`, 0 along +x and increasing toward +y.
    pub angle: f64,
}

impl Camera {
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            angle: wrap_angle(angle),
        }
    }

    /// Forward basis `(dx, dy)`; computed once per frame.
    #[inline]
    pub fn basis(&self) -> DVec2 {
        heading_vector(self.angle)
    }
}
