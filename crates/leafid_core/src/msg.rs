use crate::{FileCandidate, PredictionResult, PreviewImage, SelectionSeq, SelectionSource, WidgetError};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User offered a file through the picker, a drop, or the file input.
    FileChosen {
        source: SelectionSource,
        file: FileCandidate,
    },
    /// Decoder finished reading the selection tagged `seq`.
    PreviewDecoded {
        seq: SelectionSeq,
        result: Result<PreviewImage, String>,
    },
    /// User clicked the process button on the preview panel.
    SubmitClicked,
    /// User clicked cancel on the preview panel.
    CancelClicked,
    /// User asked to classify another image from the result panel.
    ResetClicked,
    /// Classifier finished for the selection tagged `seq`.
    PredictionFinished {
        seq: SelectionSeq,
        result: Result<PredictionResult, WidgetError>,
    },
    /// User clicked a plant card.
    PlantCardClicked(String),
    /// Remote plant info arrived. `Ok(None)` is the service's not-found answer.
    PlantInfoFetched {
        name: String,
        result: Result<Option<Vec<String>>, String>,
    },
    /// User clicked a feature card.
    FeatureCardClicked(String),
    /// Explicit close control on the open modal.
    CloseModalClicked,
    /// Click that landed outside the modal content.
    OutsideModalClicked,
    EscapePressed,
    /// User dismissed the pending notice.
    NoticeAcknowledged,
    /// Animation tick from the host.
    Tick,
}
