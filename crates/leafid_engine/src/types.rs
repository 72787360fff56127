use std::fmt;

use bytes::Bytes;

use crate::DecodeError;

/// Tag the caller attaches to a request; echoed back on its event.
pub type RequestId = u64;

/// The image handed to a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub media_type: String,
    pub content: Bytes,
}

/// A plant the mock classifier may pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: String,
    pub uses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedLabel {
    pub label: String,
    pub confidence: f64,
}

/// Classifier output. Confidences are percentages.
///
/// `ranked` is best-first and, like the service's `top_predictions`,
/// starts with the primary label.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
    pub uses: Vec<String>,
    pub ranked: Vec<RankedLabel>,
}

impl Classification {
    /// Ranked entries other than the primary label.
    pub fn alternatives(&self) -> impl Iterator<Item = &RankedLabel> {
        self.ranked.iter().filter(|r| r.label != self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPreview {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub thumbnail_uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PreviewDecoded {
        request_id: RequestId,
        result: Result<DecodedPreview, DecodeError>,
    },
    ClassifyCompleted {
        request_id: RequestId,
        result: Result<Classification, ClassifyError>,
    },
    PlantInfoCompleted {
        name: String,
        result: Result<Option<Vec<String>>, ClassifyError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClassifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClassifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64 },
    InvalidResponse,
    /// The service answered but reported failure.
    Rejected,
    Misconfigured,
    Network,
}

impl FailureKind {
    /// Whether the failure happened before a usable answer came back.
    pub fn is_transport(&self) -> bool {
        !matches!(self, FailureKind::Rejected)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::Rejected => write!(f, "rejected by server"),
            FailureKind::Misconfigured => write!(f, "misconfigured"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
