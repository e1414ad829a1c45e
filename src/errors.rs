use thiserror::Error;

/// Error taxonomy for the representation pipeline and write validation.
///
/// Every variant is local and recoverable by the caller: a stage either
/// fully succeeds or fails without touching the caller-visible result.
/// The handler layer maps the kind to an HTTP status via [`status`].
///
/// [`status`]: PipelineError::status
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A projection or search referenced a field absent on the record.
    #[error("{0} is not an existing attribute!")]
    FieldNotFound(String),

    /// Offset/limit out of bounds or non-numeric.
    #[error("{0}")]
    InvalidRange(String),

    /// A required field was absent (or unset) at validation.
    #[error("{0} is required and has to be set!")]
    MissingField(String),

    /// A field was present but of the wrong primitive type.
    #[error("{field} has to be a {expected}!")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// A field parsed but violates a value constraint.
    #[error("{0}")]
    InvalidValue(String),

    /// A rule name in a rule set has no corresponding check. This is a
    /// configuration-time defect, caught when the validator is compiled.
    #[error("{0} is not a known rule!")]
    UnknownRule(String),
}

impl PipelineError {
    /// HTTP status code the request handler maps this kind to.
    pub fn status(&self) -> u16 {
        match self {
            PipelineError::UnknownRule(_) => 500,
            _ => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_time_errors_map_to_400() {
        assert_eq!(PipelineError::FieldNotFound("x".to_string()).status(), 400);
        assert_eq!(
            PipelineError::InvalidRange("offset is negative".to_string()).status(),
            400
        );
        assert_eq!(PipelineError::MissingField("title".to_string()).status(), 400);
    }

    #[test]
    fn test_configuration_defect_maps_to_500() {
        assert_eq!(PipelineError::UnknownRule("uppercase".to_string()).status(), 500);
    }

    #[test]
    fn test_messages_name_the_offending_field() {
        let err = PipelineError::WrongType {
            field: "title".to_string(),
            expected: "string",
        };
        assert_eq!(err.to_string(), "title has to be a string!");
        assert_eq!(
            PipelineError::MissingField("src".to_string()).to_string(),
            "src is required and has to be set!"
        );
    }
}
