//! LeafID core: pure state machine and view-model helpers for the upload-and-classify widget.
pub mod catalog;
mod effect;
mod error;
mod msg;
mod prediction;
mod selection;
mod state;
mod update;
mod view_model;

pub use catalog::{FeatureInfo, PlantInfo};
pub use effect::Effect;
pub use error::{LookupKind, Notice, Severity, WidgetError};
pub use msg::Msg;
pub use prediction::{rounded_percent, PredictionResult, RankedLabel};
pub use selection::{
    format_file_size, validate_selection, FileCandidate, SelectionSource, MAX_UPLOAD_BYTES,
};
pub use state::{
    AppState, InfoSource, Modal, Panel, PreviewImage, SelectedFile, SelectionSeq, DEMO_NOTICE,
};
pub use update::update;
pub use view_model::{
    AlternativeView, AppViewModel, ModalView, PanelView, ResultView, CONFIDENCE_BAR_CELLS,
    IDLE_HINT,
};
