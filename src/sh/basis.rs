use glam::Vec3;

use super::SH_COEFFICIENT_COUNT;

/// The nine real SH basis functions, in coefficient-index order.
///
/// The discriminant is the coefficient index. Evaluation uses the plain
/// polynomial form (no normalization constants), so a coefficient authored
/// against this table reproduces exactly through [`ShBasis::eval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShBasis {
    /// l0,0: constant
    Constant = 0,
    /// l1,-1: y
    LinearY = 1,
    /// l1,0: z
    LinearZ = 2,
    /// l1,1: x
    LinearX = 3,
    /// l2,-2: xy
    QuadraticXY = 4,
    /// l2,-1: yz
    QuadraticYZ = 5,
    /// l2,0: 3z² - 1
    QuadraticZZ = 6,
    /// l2,1: xz
    QuadraticXZ = 7,
    /// l2,2: x² - y²
    QuadraticXXYY = 8,
}

impl ShBasis {
    pub const ALL: [ShBasis; SH_COEFFICIENT_COUNT] = [
        ShBasis::Constant,
        ShBasis::LinearY,
        ShBasis::LinearZ,
        ShBasis::LinearX,
        ShBasis::QuadraticXY,
        ShBasis::QuadraticYZ,
        ShBasis::QuadraticZZ,
        ShBasis::QuadraticXZ,
        ShBasis::QuadraticXXYY,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Band `l` and order `m`.
    pub const fn degree_order(self) -> (u32, i32) {
        match self {
            ShBasis::Constant => (0, 0),
            ShBasis::LinearY => (1, -1),
            ShBasis::LinearZ => (1, 0),
            ShBasis::LinearX => (1, 1),
            ShBasis::QuadraticXY => (2, -2),
            ShBasis::QuadraticYZ => (2, -1),
            ShBasis::QuadraticZZ => (2, 0),
            ShBasis::QuadraticXZ => (2, 1),
            ShBasis::QuadraticXXYY => (2, 2),
        }
    }

    /// Slider label shown on the control panel. Cosmetic only.
    pub const fn control_name(self) -> &'static str {
        match self {
            ShBasis::Constant => "Ambient Term",
            ShBasis::LinearY => "Directional Y",
            ShBasis::LinearZ => "Directional Z",
            ShBasis::LinearX => "Directional X",
            ShBasis::QuadraticXY => "Quadratic XY",
            ShBasis::QuadraticYZ => "Quadratic YZ",
            ShBasis::QuadraticZZ => "Quadratic ZZ",
            ShBasis::QuadraticXZ => "Quadratic XZ",
            ShBasis::QuadraticXXYY => "Quadratic XX-YY",
        }
    }

    /// Advisory `(min, max)` for interactive editing. The evaluator ignores it.
    pub const fn advisory_range(self) -> (f32, f32) {
        match self.degree_order().0 {
            0 => (0.0, 5.0),
            1 => (-2.0, 2.0),
            _ => (-1.0, 1.0),
        }
    }

    /// Value of this basis function at `n`.
    #[inline]
    pub fn eval(self, n: Vec3) -> f32 {
        match self {
            ShBasis::Constant => 1.0,
            ShBasis::LinearY => n.y,
            ShBasis::LinearZ => n.z,
            ShBasis::LinearX => n.x,
            ShBasis::QuadraticXY => n.x * n.y,
            ShBasis::QuadraticYZ => n.y * n.z,
            ShBasis::QuadraticZZ => 3.0 * n.z * n.z - 1.0,
            ShBasis::QuadraticXZ => n.x * n.z,
            ShBasis::QuadraticXXYY => n.x * n.x - n.y * n.y,
        }
    }
}
