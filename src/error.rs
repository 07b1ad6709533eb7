use thiserror::Error;

/// Errors raised by the lighting core.
///
/// Application glue (file export, window setup) reports through `anyhow`
/// instead; these are the failures a caller of the core can match on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShError {
    /// A coefficient index outside `0..9` was addressed.
    #[error("coefficient index {index} is out of range (expected 0..9)")]
    IndexOutOfRange { index: usize },

    /// A NaN or infinite coefficient value was rejected.
    #[error("coefficient {index} rejected non-finite value {value}")]
    InvalidValue { index: usize, value: f32 },

    /// No control is bound under the given name.
    #[error("no control named {0:?}")]
    UnknownControl(String),

    /// A coefficient file did not have the expected shape.
    #[error("invalid coefficient file: {0}")]
    Interchange(String),
}

pub type ShResult<T> = std::result::Result<T, ShError>;
