use std::fmt;

/// A backend could not allocate a native resource.
///
/// Allocation failures are not recoverable at the layout-node level; they are
/// returned to whoever drives the layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend's resource budget is used up.
    Exhausted { kind: &'static str },
    /// The native library reported a failure.
    Native { kind: &'static str, message: String },
}

impl BackendError {
    pub fn native(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Native { kind, message: message.into() }
    }

    /// Resource kind the failed allocation was for.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Exhausted { kind } | BackendError::Native { kind, .. } => kind,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Exhausted { kind } => {
                write!(f, "cannot allocate {kind}: resource budget exhausted")
            }
            BackendError::Native { kind, message } => {
                write!(f, "cannot allocate {kind}: {message}")
            }
        }
    }
}

impl std::error::Error for BackendError {}
