//! Swing geometry of the lift-line.
//!
//! The line direction from the cart to the payload is
//! `u = (cos α sin β, sin α, −cos α cos β)`. Together with
//! `e_α = ∂u/∂α` and `e_β = (∂u/∂β) / cos α` it forms an orthonormal frame
//! in which the pendulum equations separate.

use glam::DVec3;

use crate::config::MIN_SWING_COSINE;

/// Orthonormal frame attached to the lift-line.
#[derive(Debug, Clone, Copy)]
pub struct SwingFrame {
    pub sin_alfa: f64,
    pub cos_alfa: f64,
    pub sin_beta: f64,
    pub cos_beta: f64,
    /// Unit vector from the suspension point towards the payload.
    pub line: DVec3,
    /// Direction the payload moves when alfa increases.
    pub alfa_axis: DVec3,
    /// Direction the payload moves when beta increases.
    pub beta_axis: DVec3,
}

impl SwingFrame {
    pub fn new(alfa: f64, beta: f64) -> Self {
        let (sin_alfa, cos_alfa) = alfa.sin_cos();
        let (sin_beta, cos_beta) = beta.sin_cos();
        Self {
            sin_alfa,
            cos_alfa,
            sin_beta,
            cos_beta,
            line: DVec3::new(cos_alfa * sin_beta, sin_alfa, -cos_alfa * cos_beta),
            alfa_axis: DVec3::new(-sin_alfa * sin_beta, cos_alfa, sin_alfa * cos_beta),
            beta_axis: DVec3::new(cos_beta, 0.0, sin_beta),
        }
    }

    /// `cos α` kept away from zero, for the beta equation which divides by it.
    pub fn guarded_cos_alfa(&self) -> f64 {
        if self.cos_alfa.abs() < MIN_SWING_COSINE {
            MIN_SWING_COSINE.copysign(self.cos_alfa)
        } else {
            self.cos_alfa
        }
    }

    /// Vertical share of the line tension transmitted to the cart.
    pub fn vertical_load_factor(&self) -> f64 {
        self.cos_alfa * self.cos_beta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_orthonormal() {
        for (alfa, beta) in [(0.0, 0.0), (0.3, -0.7), (-1.2, 0.4), (1.5, 1.5)] {
            let frame = SwingFrame::new(alfa, beta);
            assert!((frame.line.length() - 1.0).abs() < 1e-12);
            assert!((frame.alfa_axis.length() - 1.0).abs() < 1e-12);
            assert!((frame.beta_axis.length() - 1.0).abs() < 1e-12);
            assert!(frame.line.dot(frame.alfa_axis).abs() < 1e-12);
            assert!(frame.line.dot(frame.beta_axis).abs() < 1e-12);
            assert!(frame.alfa_axis.dot(frame.beta_axis).abs() < 1e-12);
        }
    }

    #[test]
    fn rest_pose_points_down() {
        let frame = SwingFrame::new(0.0, 0.0);
        assert_eq!(frame.line, DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(frame.vertical_load_factor(), 1.0);
    }

    #[test]
    fn horizontal_line_cosine_is_guarded() {
        let frame = SwingFrame::new(std::f64::consts::FRAC_PI_2, 0.0);
        assert!(frame.guarded_cos_alfa() >= MIN_SWING_COSINE);
    }
}
