//! `{ "shCoeffs": [c0, ..., c8] }` coefficient files.
//!
//! Array position `i` is coefficient index `i`. Values are written and read
//! verbatim, with no reordering or renormalization.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{ShCoefficients, SH_COEFFICIENT_COUNT};
use crate::error::{ShError, ShResult};

/// Default file name used by "Render and Save".
pub const COEFFICIENT_FILE_NAME: &str = "sh_coefficients.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShCoefficientFile {
    #[serde(rename = "shCoeffs")]
    pub sh_coeffs: Vec<f32>,
}

impl ShCoefficientFile {
    pub fn from_coefficients(coefficients: &ShCoefficients) -> Self {
        Self {
            sh_coeffs: coefficients.to_vec(),
        }
    }

    /// Validated coefficient array.
    pub fn coefficients(&self) -> ShResult<ShCoefficients> {
        let coefficients: ShCoefficients =
            self.sh_coeffs.as_slice().try_into().map_err(|_| {
                ShError::Interchange(format!(
                    "expected {} coefficients, found {}",
                    SH_COEFFICIENT_COUNT,
                    self.sh_coeffs.len()
                ))
            })?;

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

        Ok(coefficients)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> ShResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ShError::Interchange(e.to_string()))
    }

    pub fn from_json(json: &str) -> ShResult<Self> {
        serde_json::from_str(json).map_err(|e| ShError::Interchange(e.to_string()))
    }
}

/// Write `coefficients` to `path`.
pub fn write_coefficients(path: impl AsRef<Path>, coefficients: &ShCoefficients) -> Result<()> {
    let path = path.as_ref();
    let json = ShCoefficientFile::from_coefficients(coefficients).to_json()?;
    fs::write(path, json)
        .with_context(|| format!("failed to write coefficient file {}", path.display()))?;
    Ok(())
}

/// Read and validate a coefficient file.
pub fn read_coefficients(path: impl AsRef<Path>) -> Result<ShCoefficients> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read coefficient file {}", path.display()))?;
    let file = ShCoefficientFile::from_json(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let coefficients = file
        .coefficients()
        .with_context(|| format!("invalid coefficients in {}", path.display()))?;
    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sh::DEFAULT_COEFFICIENTS;

    #[test]
    fn test_key_name_and_order() {
        let coefficients = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let json = ShCoefficientFile::from_coefficients(&coefficients)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value["shCoeffs"].as_array().unwrap();
        for (i, v) in array.iter().enumerate() {
            assert_eq!(v.as_f64().unwrap(), i as f64);
        }
    }

    #[test]
    fn test_pretty_printed_with_two_spaces() {
        let json = ShCoefficientFile::from_coefficients(&DEFAULT_COEFFICIENTS)
            .to_json()
            .unwrap();
        assert!(json.starts_with("{\n  \"shCoeffs\": [\n    1.0,"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let file = ShCoefficientFile::from_json(r#"{ "shCoeffs": [1, 2, 3] }"#).unwrap();
        assert!(matches!(file.coefficients(), Err(ShError::Interchange(_))));
    }

    #[test]
    fn test_rejects_missing_key() {
        assert!(ShCoefficientFile::from_json(r#"{ "coeffs": [] }"#).is_err());
    }

    #[test]
    fn test_accepts_integer_literals() {
        let file =
            ShCoefficientFile::from_json(r#"{"shCoeffs":[1,0,0,0,0,0,0,0,-1]}"#).unwrap();
        let coeffs = file.coefficients().unwrap();
        assert_eq!(coeffs[0], 1.0);
        assert_eq!(coeffs[8], -1.0);
    }
}
