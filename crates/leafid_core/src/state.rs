use std::sync::Arc;

use crate::view_model::{
    AlternativeView, AppViewModel, ModalView, PanelView, ResultView, IDLE_HINT,
};
use crate::{
    format_file_size, rounded_percent, FileCandidate, Notice, PredictionResult, Severity,
    WidgetError,
};

/// Identifies one selection. Work started under an older value is stale.
pub type SelectionSeq = u64;

const LOADING_CAPTION: &str = "Analyzing your image";
const LOADING_FRAMES: u8 = 4;

/// Shown after each result when predictions are simulated.
pub const DEMO_NOTICE: &str = "Demo Mode: This is a simulated prediction! \
For real plant identification, configure the Remote backend.";

/// The mutually exclusive panels of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Idle,
    Previewing,
    Loading,
    ResultShown,
}

/// Where plant modals get their content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoSource {
    /// The compiled-in catalog; lookups resolve immediately.
    #[default]
    Static,
    /// The classification service's plant info endpoint.
    Remote,
}

/// A validated selection, tagged with the sequence it was accepted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub seq: SelectionSeq,
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub content: Arc<[u8]>,
}

/// Displayable form of the selected image, produced by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub format: String,
    /// `data:` URI of a downscaled thumbnail.
    pub thumbnail_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Plant { name: String, uses: Vec<String> },
    Feature { title: String, body: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    panel: Panel,
    seq: SelectionSeq,
    selected: Option<SelectedFile>,
    preview: Option<PreviewImage>,
    result: Option<PredictionResult>,
    modal: Option<Modal>,
    notice: Option<Notice>,
    info_source: InfoSource,
    pending_plant_lookup: Option<String>,
    demo_notice: bool,
    loading_frame: u8,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info_source(info_source: InfoSource) -> Self {
        Self {
            info_source,
            ..Self::default()
        }
    }

    /// Announces every result as simulated.
    pub fn with_demo_notice(mut self, enabled: bool) -> Self {
        self.demo_notice = enabled;
        self
    }

    pub fn demo_notice(&self) -> bool {
        self.demo_notice
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn current_seq(&self) -> SelectionSeq {
        self.seq
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn info_source(&self) -> InfoSource {
        self.info_source
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            panel: self.panel_view(),
            modal: self.modal.as_ref().map(modal_view),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The only place panel visibility changes.
    ///
    /// Entering `Idle` drops the selection and everything derived from it.
    pub(crate) fn transition(&mut self, next: Panel) {
        if next == Panel::Idle {
            self.selected = None;
            self.preview = None;
            self.result = None;
        }
        if next != Panel::ResultShown {
            self.result = None;
        }
        if self.panel == Panel::Loading || next == Panel::Loading {
            self.loading_frame = 0;
        }
        self.panel = next;
        self.mark_dirty();
    }

    /// Invalidates in-flight work and returns to the upload panel.
    pub(crate) fn reset_to_idle(&mut self) {
        self.seq += 1;
        self.transition(Panel::Idle);
    }

    pub(crate) fn accept_selection(&mut self, file: FileCandidate) -> SelectedFile {
        self.seq += 1;
        let selected = SelectedFile {
            seq: self.seq,
            name: file.name,
            media_type: file.media_type,
            size: file.size,
            content: file.content,
        };
        self.selected = Some(selected.clone());
        self.mark_dirty();
        selected
    }

    pub(crate) fn is_current(&self, seq: SelectionSeq) -> bool {
        seq == self.seq && self.selected.is_some()
    }

    pub(crate) fn drop_selection(&mut self) {
        self.selected = None;
        self.mark_dirty();
    }

    pub(crate) fn set_preview(&mut self, preview: PreviewImage) {
        self.preview = Some(preview);
    }

    pub(crate) fn set_result(&mut self, result: PredictionResult) {
        self.result = Some(result);
    }

    pub(crate) fn raise(&mut self, err: &WidgetError) {
        self.notice = Some(Notice::from(err));
        self.mark_dirty();
    }

    pub(crate) fn inform(&mut self, text: &str) {
        self.notice = Some(Notice {
            severity: Severity::Info,
            text: text.to_string(),
        });
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
        self.mark_dirty();
    }

    pub(crate) fn close_modal(&mut self) {
        if self.modal.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_pending_plant_lookup(&mut self, name: Option<String>) {
        self.pending_plant_lookup = name;
    }

    pub(crate) fn pending_plant_lookup(&self) -> Option<&str> {
        self.pending_plant_lookup.as_deref()
    }

    pub(crate) fn advance_loading_frame(&mut self) {
        self.loading_frame = (self.loading_frame + 1) % LOADING_FRAMES;
        self.mark_dirty();
    }

    fn panel_view(&self) -> PanelView {
        match self.panel {
            Panel::Idle => PanelView::Idle { hint: IDLE_HINT },
            Panel::Previewing => match &self.selected {
                Some(file) => PanelView::Previewing {
                    file_name_label: format!("File: {}", file.name),
                    file_size_label: format!("Size: {}", format_file_size(file.size)),
                    preview: self.preview.clone(),
                },
                None => PanelView::Idle { hint: IDLE_HINT },
            },
            Panel::Loading => PanelView::Loading {
                caption: format!(
                    "{LOADING_CAPTION}{}",
                    ".".repeat(usize::from(self.loading_frame))
                ),
            },
            Panel::ResultShown => match &self.result {
                Some(result) => PanelView::ResultShown(result_view(result, self.preview.as_ref())),
                None => PanelView::Idle { hint: IDLE_HINT },
            },
        }
    }
}

fn result_view(result: &PredictionResult, preview: Option<&PreviewImage>) -> ResultView {
    let percent = rounded_percent(result.confidence);
    ResultView {
        label: result.label.clone(),
        confidence_percent: percent,
        confidence_label: format!("{percent}%"),
        uses: result.uses.clone(),
        alternatives: result
            .top_predictions
            .iter()
            .filter(|ranked| ranked.label != result.label)
            .map(|ranked| {
                let percent = rounded_percent(ranked.confidence);
                AlternativeView {
                    label: ranked.label.clone(),
                    percent,
                    percent_label: format!("{percent}%"),
                }
            })
            .collect(),
        uploaded_image: preview.cloned(),
    }
}

fn modal_view(modal: &Modal) -> ModalView {
    match modal {
        Modal::Plant { name, uses } => ModalView::Plant {
            title: name.clone(),
            uses: uses.clone(),
        },
        Modal::Feature { title, body } => ModalView::Feature {
            title: title.clone(),
            body: body.clone(),
        },
    }
}
