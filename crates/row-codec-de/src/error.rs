//! Decoding error type.

use std::fmt;

use row_codec_core::{CodingKey, CodingPath};
use thiserror::Error;

/// Where a decoding error happened and what was attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub coding_path: CodingPath,
    pub debug_description: String,
    // Set for errors raised by serde visitors, whose path is relative to the
    // container that invoked them until `anchored` resolves it.
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

    fn relative(coding_path: CodingPath, debug_description: impl Into<String>) -> Self {
        Self {
            relative: true,
            ..Self::new(coding_path, debug_description)
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.coding_path, self.debug_description)
    }
}

/// Error type for row and cell decoding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("key `{key}` not found at {context}")]
    KeyNotFound { key: CodingKey, context: Context },
    #[error("value of type {expected} not found at {context}")]
    ValueNotFound { expected: String, context: Context },
    #[error("type mismatch for {expected} at {context}")]
    TypeMismatch { expected: String, context: Context },
    #[error("data corrupted at {context}")]
    DataCorrupted { context: Context },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    pub fn key_not_found(key: CodingKey, coding_path: CodingPath, description: impl Into<String>) -> Self {
        DecodeError::KeyNotFound {
            key,
            context: Context::new(coding_path, description),
        }
    }

    pub fn value_not_found(
        expected: impl Into<String>,
        coding_path: CodingPath,
        description: impl Into<String>,
    ) -> Self {
        DecodeError::ValueNotFound {
            expected: expected.into(),
            context: Context::new(coding_path, description),
        }
    }

    pub fn type_mismatch(
        expected: impl Into<String>,
        coding_path: CodingPath,
        description: impl Into<String>,
    ) -> Self {
        DecodeError::TypeMismatch {
            expected: expected.into(),
            context: Context::new(coding_path, description),
        }
    }

    pub fn data_corrupted(coding_path: CodingPath, description: impl Into<String>) -> Self {
        DecodeError::DataCorrupted {
            context: Context::new(coding_path, description),
        }
    }

    pub fn context(&self) -> &Context {
        match self {
            DecodeError::KeyNotFound { context, .. }
            | DecodeError::ValueNotFound { context, .. }
            | DecodeError::TypeMismatch { context, .. }
            | DecodeError::DataCorrupted { context } => context,
        }
    }

    fn context_mut(&mut self) -> &mut Context {
        match self {
            DecodeError::KeyNotFound { context, .. }
            | DecodeError::ValueNotFound { context, .. }
            | DecodeError::TypeMismatch { context, .. }
            | DecodeError::DataCorrupted { context } => context,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.context().coding_path
    }

    /// Resolves a visitor-raised error against the path of the container that
    /// invoked the visitor. Errors that already carry an absolute path are
    /// returned unchanged.
    pub fn anchored(mut self, base: &CodingPath) -> Self {
        let context = self.context_mut();
        if context.relative {
            context.coding_path = base.join(&context.coding_path);
            context.relative = false;
        }
        self
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::DataCorrupted {
            context: Context::relative(CodingPath::root(), msg.to_string()),
        }
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        DecodeError::TypeMismatch {
            expected: exp.to_string(),
            context: Context::relative(
                CodingPath::root(),
                format!("Expected {exp} but found {unexp} instead."),
            ),
        }
    }

    fn invalid_length(len: usize, exp: &dyn serde::de::Expected) -> Self {
        DecodeError::ValueNotFound {
            expected: exp.to_string(),
            context: Context::relative(
                CodingPath::root().appending(len),
                "Unkeyed container is at end.",
            ),
        }
    }

    fn missing_field(field: &'static str) -> Self {
        DecodeError::KeyNotFound {
            key: CodingKey::from(field),
            context: Context::relative(
                CodingPath::root().appending(field),
                format!("No value associated with key {field}."),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn visitor_errors_are_anchored_once() {
        let base: CodingPath = ["users"].into_iter().collect();
        let err = DecodeError::missing_field("age").anchored(&base);
        assert_eq!(err.coding_path().to_string(), "[users, age]");

        let again = err.clone().anchored(&CodingPath::root().appending("other"));
        assert_eq!(again, err);
    }

    #[test]
    fn engine_errors_keep_their_path() {
        let path = CodingPath::root().appending("id");
        let err = DecodeError::type_mismatch("i64", path.clone(), "bad");
        assert_eq!(err.anchored(&CodingPath::root().appending("x")).coding_path(), &path);
    }

    #[test]
    fn display_includes_path_and_description() {
        let err = DecodeError::key_not_found(
            CodingKey::from("age"),
            CodingPath::root().appending("age"),
            "No value associated with key age.",
        );
        assert_eq!(
            err.to_string(),
            "key `age` not found at [age]: No value associated with key age."
        );
    }

    #[test]
    fn invalid_length_points_past_the_last_element() {
        let err = DecodeError::invalid_length(2, &"a tuple of size 3").anchored(&CodingPath::root());
        assert!(matches!(err, DecodeError::ValueNotFound { .. }));
        assert_eq!(err.coding_path().to_string(), "[Index 2]");
    }
}
