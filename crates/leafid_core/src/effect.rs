use crate::{SelectedFile, SelectionSeq};

/// Work the host must perform on behalf of the core.
///
/// Completions come back as [`crate::Msg`]s tagged with the same `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    DecodePreview { seq: SelectionSeq, file: SelectedFile },
    Classify { seq: SelectionSeq, file: SelectedFile },
    FetchPlantInfo { name: String },
}
