//! Degree-2 spherical-harmonics ambient lighting.
//!
//! Nine real coefficients describe a smooth light environment. The
//! [`ShEnvironment`] owns them and pushes every accepted edit to its
//! subscribers; [`evaluate`] reconstructs irradiance for a unit normal.

pub mod basis;
pub mod environment;
pub mod interchange;
pub mod irradiance;

pub use basis::ShBasis;
pub use environment::{Refresh, ShEnvironment};
pub use interchange::ShCoefficientFile;
pub use irradiance::{basis, evaluate, evaluate_rgb, RgbCoefficients};

/// Number of coefficients in a degree-2 expansion.
pub const SH_COEFFICIENT_COUNT: usize = 9;

/// Coefficients ordered by [`ShBasis`] index.
pub type ShCoefficients = [f32; SH_COEFFICIENT_COUNT];

/// Startup light environment: a bright ambient term with a mild bias toward +X/+Y/+Z.
pub const DEFAULT_COEFFICIENTS: ShCoefficients = [1.0, 0.3, 0.3, 0.3, 0.1, 0.1, 0.1, 0.1, 0.1];
