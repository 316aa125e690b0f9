//! Error types for host interop operations

/// Result type for interop calls
pub type InteropResult<T> = Result<T, InteropError>;

/// Fault category an [`InteropError`] surfaces as to script code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Script-level `TypeError`
    Type,
    /// Host-level invalid operation (capability switched off)
    InvalidOperation,
    /// Host-level argument error (wrong value shape)
    Argument,
}

/// Interop error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteropError {
    /// A host object is not an instance of the requested type
    #[error("Type mismatch: object of type {got} is not an instance of {expected}")]
    TypeMismatch {
        /// Requested type name
        expected: String,
        /// Runtime type name of the offending object
        got: String,
    },

    /// An operation that needs type introspection was invoked while it is disabled
    #[error("Invalid operation: {operation} requires {option} to be enabled")]
    CapabilityDisabled {
        /// Operation that was rejected
        operation: &'static str,
        /// Name of the controlling option
        option: &'static str,
    },

    /// A handle of the wrong shape was passed (instance where a type was expected, etc.)
    #[error("Argument error ({param}): {message}")]
    WrongHandleShape {
        /// Parameter name
        param: String,
        /// Description of what was expected
        message: String,
    },

    /// A helper function name that is not registered
    #[error("Argument error: unknown helper function '{0}'")]
    UnknownFunction(String),
}

impl InteropError {
    /// Build a type mismatch error from type names
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        InteropError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Build a wrong-shape error for a named parameter
    pub fn wrong_shape(param: impl Into<String>, message: impl Into<String>) -> Self {
        InteropError::WrongHandleShape {
            param: param.into(),
            message: message.into(),
        }
    }

    /// The fault category this error is raised as
    pub fn kind(&self) -> ErrorKind {
        match self {
            InteropError::TypeMismatch { .. } => ErrorKind::Type,
            InteropError::CapabilityDisabled { .. } => ErrorKind::InvalidOperation,
            InteropError::WrongHandleShape { .. } | InteropError::UnknownFunction(_) => {
                ErrorKind::Argument
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            InteropError::type_mismatch("A", "B").kind(),
            ErrorKind::Type
        );
        assert_eq!(
            InteropError::CapabilityDisabled {
                operation: "typeOf",
                option: "allow_get_type",
            }
            .kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(
            InteropError::wrong_shape("obj", "expected a type").kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            InteropError::UnknownFunction("nope".to_string()).kind(),
            ErrorKind::Argument
        );
    }

    #[test]
    fn test_error_messages_name_the_types() {
        let err = InteropError::type_mismatch("App.IRunner", "App.Cat");
        let msg = err.to_string();
        assert!(msg.contains("App.IRunner"));
        assert!(msg.contains("App.Cat"));
    }
}
