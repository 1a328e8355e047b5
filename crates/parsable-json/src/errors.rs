use thiserror::Error;

/// Boxed cause carried by a [`ParseError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A string token that the target type refused to parse.
///
/// The message alone names both the offending text and the target type; the
/// delegate's own error stays reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("could not parse \"{input}\" as {type_name}: {source}")]
pub struct ParseError {
    input: String,
    type_name: String,
    source: BoxError,
}

impl ParseError {
    pub fn new(input: impl Into<String>, type_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            input: input.into(),
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// The literal text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Short display name of the type the text was parsed as.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn into_source(self) -> BoxError {
        self.source
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Errors already expressed by `serde_json`. Displayed verbatim.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no converter registered for {type_name}")]
    NoConverter { type_name: String },

    #[error("unknown converter name: {0}")]
    UnknownName(String),

    #[error("converter name {name:?} is already bound to {existing}")]
    DuplicateName { name: String, existing: String },

    #[error("value is not a {expected}")]
    TypeMismatch { expected: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn parse_error_message_names_input_and_type() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = ParseError::new("abc", "i32", cause);
        let msg = err.to_string();
        assert!(msg.contains("\"abc\""));
        assert!(msg.contains("i32"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn parse_error_message_keeps_text_literal() {
        for input in ["4\"2", "a\\b", "line\nbreak", "tab\there"] {
            let cause = input.parse::<i32>().unwrap_err();
            let msg = ParseError::new(input, "i32", cause).to_string();
            assert!(msg.contains(input), "{msg}");
        }
    }

    #[test]
    fn parse_error_keeps_cause() {
        let cause = "x".parse::<bool>().unwrap_err();
        let err = ParseError::new("x", "bool", cause);
        let source = err.source().expect("source should be kept");
        assert!(source.downcast_ref::<std::str::ParseBoolError>().is_some());
        assert_eq!(err.input(), "x");
        assert_eq!(err.type_name(), "bool");
    }

    #[test]
    fn json_variant_is_transparent() {
        let native = serde_json::from_str::<u8>("[").unwrap_err();
        let expected = native.to_string();
        let err = Error::from(native);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn no_converter_message() {
        let err = Error::NoConverter {
            type_name: "Guid".to_string(),
        };
        assert_eq!(err.to_string(), "no converter registered for Guid");
    }
}
