use std::fmt;

use thiserror::Error;

/// Which static table a lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Plant,
    Feature,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Plant => write!(f, "Plant"),
            LookupKind::Feature => write!(f, "Feature"),
        }
    }
}

/// Every failure the widget can surface. Display text is the user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("Please select a valid image file.")]
    InvalidFileType { media_type: String },
    #[error("Please select an image smaller than 10MB.")]
    FileTooLarge { size: u64, limit: u64 },
    #[error("Error reading the selected file. Please try again.")]
    DecodeFailure { reason: String },
    #[error("Network error. Please try again.")]
    NetworkFailure { reason: String },
    #[error("Error: {message}")]
    ServerRejection { message: String },
    #[error("{kind} information not found.")]
    LookupMiss { kind: LookupKind, name: String },
    #[error("Error loading plant information.")]
    PlantInfoUnavailable { name: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl WidgetError {
    pub fn severity(&self) -> Severity {
        match self {
            WidgetError::InvalidFileType { .. }
            | WidgetError::FileTooLarge { .. }
            | WidgetError::LookupMiss { .. } => Severity::Warning,
            WidgetError::DecodeFailure { .. }
            | WidgetError::NetworkFailure { .. }
            | WidgetError::PlantInfoUnavailable { .. }
            | WidgetError::ServerRejection { .. } => Severity::Error,
        }
    }
}

/// Blocking user-facing message, the terminal equivalent of an alert box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl From<&WidgetError> for Notice {
    fn from(err: &WidgetError) -> Self {
        Self {
            severity: err.severity(),
            text: err.to_string(),
        }
    }
}
