use approx::assert_relative_eq;
use glam::Vec3;
use sh_relight::sh::{evaluate, ShCoefficients, DEFAULT_COEFFICIENTS};

fn sample_normals() -> Vec<Vec3> {
    let mut normals = vec![Vec3::X, Vec3::Y, Vec3::Z, -Vec3::X, -Vec3::Y, -Vec3::Z];
    for i in 0..12 {
        let theta = i as f32 * 0.5;
        let phi = 0.2 + i as f32 * 0.23;
        normals.push(Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()));
    }
    normals
}

#[cfg(test)]
mod irradiance_tests {
    use super::*;

    #[test]
    fn test_pure_ambient_is_constant() {
        let coefficients: ShCoefficients = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        for n in sample_normals() {
            assert_relative_eq!(evaluate(&coefficients, n), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_pure_z_term() {
        let coefficients: ShCoefficients = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_relative_eq!(evaluate(&coefficients, Vec3::Z), 1.0);
        assert_relative_eq!(evaluate(&coefficients, -Vec3::Z), -1.0);
        assert_relative_eq!(evaluate(&coefficients, Vec3::X), 0.0);
    }

    #[test]
    fn test_default_environment_straight_up_z() {
        assert_relative_eq!(evaluate(&DEFAULT_COEFFICIENTS, Vec3::Z), 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_linear_in_coefficients() {
        let a = DEFAULT_COEFFICIENTS;
        let b: ShCoefficients = [0.5, -1.0, 0.25, 2.0, -0.5, 0.75, -0.1, 0.3, 0.9];
        let k = -2.5;
        let scaled = a.map(|c| c * k);
        let mut sum = a;
        for (s, c) in sum.iter_mut().zip(b) {
            *s += c;
        }

        for n in sample_normals() {
            assert_relative_eq!(evaluate(&scaled, n), k * evaluate(&a, n), epsilon = 1e-4);
            let separate = evaluate(&a, n) + evaluate(&b, n);
            assert_relative_eq!(evaluate(&sum, n), separate, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_continuous_over_sphere() {
        let coefficients: ShCoefficients = [1.0, -2.0, 2.0, 1.5, -1.0, 1.0, -1.0, 1.0, -1.0];
        let delta = 1e-3;
        for n in sample_normals() {
            let nudged = (n + Vec3::new(delta, -delta, delta)).normalize();
            let change = (evaluate(&coefficients, nudged) - evaluate(&coefficients, n)).abs();
            // Bounded by the gradient of the polynomial basis for these coefficients.
            assert!(change < 0.05, "jump of {} at {:?}", change, n);
        }
    }

    #[test]
    fn test_zero_normal_keeps_constant_terms() {
        let value = evaluate(&DEFAULT_COEFFICIENTS, Vec3::ZERO);
        assert!(value.is_finite());
        assert_relative_eq!(value, 1.0 - 0.1, epsilon = 1e-6);
    }
}
