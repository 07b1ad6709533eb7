pub mod camera;
pub mod cli;
pub mod control;
pub mod error;
pub mod export;
pub mod frame;
pub mod math;
pub mod raster;
pub mod scene;
pub mod session;
pub mod sh;
pub mod shading;
pub mod viewer;

pub use error::{ShError, ShResult};
pub use sh::{evaluate, ShCoefficients, ShEnvironment, DEFAULT_COEFFICIENTS, SH_COEFFICIENT_COUNT};
