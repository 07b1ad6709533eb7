use std::rc::Rc;

use log::{info, warn};

use crate::error::{ShError, ShResult};
use crate::sh::{ShBasis, ShCoefficientFile, ShCoefficients, ShEnvironment, DEFAULT_COEFFICIENTS};

/// A named, ranged control bound to one coefficient index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlBinding {
    pub name: &'static str,
    pub index: usize,
    pub min: f32,
    pub max: f32,
}

impl ControlBinding {
    pub fn for_basis(basis: ShBasis) -> Self {
        let (min, max) = basis.advisory_range();
        Self {
            name: basis.control_name(),
            index: basis.index(),
            min,
            max,
        }
    }

    /// Clamp a finite value into the advisory range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Routes control edits into the shared environment, one index at a time.
///
/// The environment pushes each accepted edit to its shading instances, so
/// nothing downstream polls for changes.
pub struct ControlSync {
    environment: Rc<ShEnvironment>,
    bindings: Vec<ControlBinding>,
}

impl ControlSync {
    pub fn new(environment: Rc<ShEnvironment>) -> Self {
        Self {
            environment,
            bindings: ShBasis::ALL.iter().copied().map(ControlBinding::for_basis).collect(),
        }
    }

    pub fn environment(&self) -> &Rc<ShEnvironment> {
        &self.environment
    }

    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    pub fn binding(&self, index: usize) -> ShResult<&ControlBinding> {
        self.bindings
            .iter()
            .find(|b| b.index == index)
            .ok_or(ShError::IndexOutOfRange { index })
    }

    /// Current value shown by the control at `index`.
    pub fn value(&self, index: usize) -> ShResult<f32> {
        let binding = self.binding(index)?;
        Ok(self.environment.get()[binding.index])
    }

    /// Apply a control change. Returns the value actually stored after
    /// clamping to the control's range. Non-finite input is rejected, never
    /// clamped onto a range bound.
    pub fn set_by_index(&self, index: usize, value: f32) -> ShResult<f32> {
        let binding = *self.binding(index)?;
        if !value.is_finite() {
            warn!("{} rejected non-finite value {}", binding.name, value);
            return Err(ShError::InvalidValue {
                index: binding.index,
                value,
            });
        }
        let clamped = binding.clamp(value);
        self.environment.set(binding.index, clamped)?;
        Ok(clamped)
    }

    pub fn set_by_name(&self, name: &str, value: f32) -> ShResult<f32> {
        let index = self
            .bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.index)
            .ok_or_else(|| ShError::UnknownControl(name.to_string()))?;
        self.set_by_index(index, value)
    }

    /// Load a full coefficient set through the per-index path.
    ///
    /// Values are assigned verbatim (position `i` to index `i`) without the
    /// control clamp, so a previously exported file reproduces exactly.
    pub fn import(&self, coefficients: &ShCoefficients) -> ShResult<()> {
        if let Some((index, value)) = coefficients
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ShError::InvalidValue {
                index,
                value: *value,
            });
        }

        for (index, value) in coefficients.iter().enumerate() {
            self.environment.set(index, *value)?;
        }
        info!("imported coefficients {:?}", coefficients);
        Ok(())
    }

    pub fn reset(&self) -> ShResult<()> {
        self.import(&DEFAULT_COEFFICIENTS)
    }

    /// Interchange form of the current coefficients.
    pub fn export(&self) -> ShCoefficientFile {
        ShCoefficientFile::from_coefficients(&self.environment.get())
    }
}
