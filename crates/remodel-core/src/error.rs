//! Error types for the Remodel core library
//!
//! Every failure of the mapping engine is reported through [`Error`]. Errors are
//! terminal for the call that produced them; nested mappers propagate the
//! innermost error unchanged so the failing property stays visible.

use thiserror::Error;

/// Main error type for Remodel operations
#[derive(Error, Debug)]
pub enum Error {
    /// A plan referenced a property the source does not expose
    #[error("Missing property: '{property}' not found on {model}")]
    MissingProperty {
        property: String,
        model: String,
    },

    /// The argument set could not be turned into a target instance
    #[error("Construction of {target} failed: {message}")]
    Construction {
        target: String,
        parameter: Option<String>,
        message: String,
    },

    /// Structurally invalid plan, rejected when the mapper is built
    #[error("Invalid plan for {target}: {message}")]
    InvalidPlan {
        target: String,
        message: String,
    },

    /// The constructor parameters of a model could not be determined
    #[error("Introspection of {model} failed: {message}")]
    Introspection {
        model: String,
        message: String,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn missing_property(property: impl Into<String>, model: impl Into<String>) -> Self {
        Error::MissingProperty {
            property: property.into(),
            model: model.into(),
        }
    }

    pub(crate) fn construction(
        target: impl Into<String>,
        parameter: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Error::Construction {
            target: target.into(),
            parameter: parameter.map(str::to_string),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_plan(target: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidPlan {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Name of the property or parameter this error is about, if any
    pub fn property(&self) -> Option<&str> {
        match self {
            Error::MissingProperty { property, .. } => Some(property),
            Error::Construction { parameter, .. } => parameter.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::missing_property("z", "Penguin");
        assert_eq!(err.to_string(), "Missing property: 'z' not found on Penguin");
    }

    #[test]
    fn test_property_accessor() {
        let err = Error::construction("Goose", Some("name"), "required parameter has no value");
        assert_eq!(err.property(), Some("name"));

        let err = Error::invalid_plan("Goose", "plan is empty");
        assert_eq!(err.property(), None);
    }

    #[test]
    fn test_json_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = source.into();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
