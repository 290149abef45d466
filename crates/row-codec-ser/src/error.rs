//! Encoding error type.

use std::fmt;

use row_codec_core::CodingPath;
use thiserror::Error;

/// Where an encoding error happened and what was attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub coding_path: CodingPath,
    pub debug_description: String,
    // Errors raised by `Serialize` impls know nothing of the row layout; their
    // path is completed by the container that serialized them.
    relative: bool,
}

impl Context {
    pub fn new(coding_path: CodingPath, debug_description: impl Into<String>) -> Self {
        Self {
            coding_path,
            debug_description: debug_description.into(),
            relative: false,
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.coding_path, self.debug_description)
    }
}

/// Error type for row and cell encoding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodeError {
    /// `value` describes what could not be encoded.
    #[error("invalid value {value} at {context}")]
    InvalidValue { value: String, context: Context },
}

pub type Result<T> = std::result::Result<T, EncodeError>;

impl EncodeError {
    pub fn invalid_value(
        value: impl Into<String>,
        coding_path: CodingPath,
        description: impl Into<String>,
    ) -> Self {
        EncodeError::InvalidValue {
            value: value.into(),
            context: Context::new(coding_path, description),
        }
    }

    /// A request the encoder at `coding_path` refuses.
    pub fn unsupported(op: &str, coding_path: CodingPath) -> Self {
        Self::invalid_value(
            op,
            coding_path,
            format!("`{op}` is not supported for this encoding path."),
        )
    }

    pub fn context(&self) -> &Context {
        match self {
            EncodeError::InvalidValue { context, .. } => context,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.context().coding_path
    }

    /// Prefixes the path of an error raised by a `Serialize` impl with the
    /// path of the value being serialized.
    pub fn anchored(mut self, base: &CodingPath) -> Self {
        let EncodeError::InvalidValue { context, .. } = &mut self;
        if context.relative {
            context.coding_path = base.join(&context.coding_path);
            context.relative = false;
        }
        self
    }
}

impl serde::ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncodeError::InvalidValue {
            value: "custom".to_owned(),
            context: Context {
                relative: true,
                ..Context::new(CodingPath::root(), msg.to_string())
            },
        }
    }
}
