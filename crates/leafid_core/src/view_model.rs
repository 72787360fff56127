use crate::{Notice, Panel, PreviewImage};

pub const IDLE_HINT: &str = "Drag & drop a leaf image here, or click to browse.";

/// Width of the confidence bar in cells when rendered as text.
pub const CONFIDENCE_BAR_CELLS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub panel: PanelView,
    pub modal: Option<ModalView>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

/// Exactly one panel, carrying only the data that panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Idle {
        hint: &'static str,
    },
    Previewing {
        file_name_label: String,
        file_size_label: String,
        preview: Option<PreviewImage>,
    },
    Loading {
        caption: String,
    },
    ResultShown(ResultView),
}

impl PanelView {
    pub fn panel(&self) -> Panel {
        match self {
            PanelView::Idle { .. } => Panel::Idle,
            PanelView::Previewing { .. } => Panel::Previewing,
            PanelView::Loading { .. } => Panel::Loading,
            PanelView::ResultShown(_) => Panel::ResultShown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub label: String,
    pub confidence_percent: u8,
    pub confidence_label: String,
    pub uses: Vec<String>,
    pub alternatives: Vec<AlternativeView>,
    pub uploaded_image: Option<PreviewImage>,
}

impl ResultView {
    /// Number of filled cells out of `total` for the confidence bar.
    pub fn bar_fill(&self, total: usize) -> usize {
        (usize::from(self.confidence_percent) * total + 50) / 100
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeView {
    pub label: String,
    pub percent: u8,
    pub percent_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Plant { title: String, uses: Vec<String> },
    Feature { title: String, body: String },
}
