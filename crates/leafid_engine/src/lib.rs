//! LeafID engine: preview decoding and classification behind one command/event handle.
mod classify;
mod decode;
mod engine;
mod mock;
mod types;
mod wire;

pub use classify::{Classifier, RemoteClassifier, RemoteSettings};
pub use decode::{decode_preview, DecodeError, THUMBNAIL_EDGE};
pub use engine::EngineHandle;
pub use mock::{MockClassifier, MockSettings};
pub use types::{
    CatalogEntry, Classification, ClassifyError, DecodedPreview, EngineEvent, FailureKind,
    RankedLabel, RequestId, UploadFile,
};
