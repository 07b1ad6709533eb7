use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{ShBasis, ShCoefficients, SH_COEFFICIENT_COUNT};

/// Values of all nine basis functions at `normal`, in coefficient order.
#[inline]
pub fn basis(normal: Vec3) -> [f32; SH_COEFFICIENT_COUNT] {
    let Vec3 { x, y, z } = normal;
    [
        1.0,
        y,
        z,
        x,
        x * y,
        y * z,
        3.0 * z * z - 1.0,
        x * z,
        x * x - y * y,
    ]
}

/// Irradiance reconstructed from `coefficients` in direction `normal`.
///
/// `normal` must be unit length. It is not renormalized, so a scaled normal
/// yields a scaled (wrong) result and a zero normal yields `c0 - c6`, a
/// meaningless but finite value.
#[inline]
pub fn evaluate(coefficients: &ShCoefficients, normal: Vec3) -> f32 {
    let b = basis(normal);
    let mut e = 0.0;
    for i in 0..SH_COEFFICIENT_COUNT {
        e += coefficients[i] * b[i];
    }
    e
}

/// Three independent coefficient sets, one per colour channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbCoefficients {
    pub r: ShCoefficients,
    pub g: ShCoefficients,
    pub b: ShCoefficients,
}

impl RgbCoefficients {
    /// Same coefficients on every channel (grey light).
    pub fn achromatic(coefficients: ShCoefficients) -> Self {
        Self {
            r: coefficients,
            g: coefficients,
            b: coefficients,
        }
    }

    pub fn channel(&self, channel: usize) -> Option<&ShCoefficients> {
        match channel {
            0 => Some(&self.r),
            1 => Some(&self.g),
            2 => Some(&self.b),
            _ => None,
        }
    }
}

/// Per-channel irradiance; each channel runs [`evaluate`] on its own set.
pub fn evaluate_rgb(coefficients: &RgbCoefficients, normal: Vec3) -> [f32; 3] {
    [
        evaluate(&coefficients.r, normal),
        evaluate(&coefficients.g, normal),
        evaluate(&coefficients.b, normal),
    ]
}

/// Single-term contribution, for inspecting one slider in isolation.
pub fn evaluate_term(coefficients: &ShCoefficients, term: ShBasis, normal: Vec3) -> f32 {
    coefficients[term.index()] * term.eval(normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basis_matches_enum() {
        let n = Vec3::new(0.36, -0.48, 0.8);
        let b = basis(n);
        for term in ShBasis::ALL {
            assert_relative_eq!(b[term.index()], term.eval(n), epsilon = 1e-7);
        }
    }

    #[test]
    fn test_terms_sum_to_evaluate() {
        let coeffs = [0.7, -0.2, 1.1, 0.4, -0.9, 0.3, 0.25, -0.6, 0.05];
        let n = Vec3::new(-0.6, 0.0, 0.8);
        let sum: f32 = ShBasis::ALL
            .iter()
            .map(|t| evaluate_term(&coeffs, *t, n))
            .sum();
        assert_relative_eq!(sum, evaluate(&coeffs, n), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_normal_is_finite() {
        let coeffs = [1.0, 0.3, 0.3, 0.3, 0.1, 0.1, 0.1, 0.1, 0.1];
        let e = evaluate(&coeffs, Vec3::ZERO);
        assert!(e.is_finite());
        assert_relative_eq!(e, 1.0 - 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_rgb_channels_are_independent() {
        let mut rgb = RgbCoefficients::achromatic([0.0; 9]);
        rgb.r[0] = 1.0;
        rgb.g[2] = 1.0;
        rgb.b[3] = -1.0;

        let [r, g, b] = evaluate_rgb(&rgb, Vec3::Z);
        assert_eq!(r, 1.0);
        assert_eq!(g, 1.0);
        assert_eq!(b, 0.0);
        assert_eq!(rgb.channel(1), Some(&rgb.g));
        assert_eq!(rgb.channel(3), None);
    }
}
