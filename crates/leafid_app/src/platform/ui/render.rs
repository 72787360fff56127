use leafid_core::{
    AlternativeView, AppViewModel, ModalView, Notice, PanelView, PreviewImage, ResultView,
    Severity, CONFIDENCE_BAR_CELLS,
};

use super::constants::*;

/// Text lines for one frame of the widget.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![SEPARATOR.to_string()];

    match &view.panel {
        PanelView::Idle { hint } => lines.push((*hint).to_string()),
        PanelView::Previewing {
            file_name_label,
            file_size_label,
            preview,
        } => {
            lines.push(file_name_label.clone());
            lines.push(file_size_label.clone());
            if let Some(preview) = preview {
                lines.push(preview_line(preview));
            }
            lines.push("[submit] to identify, [cancel] to discard".to_string());
        }
        PanelView::Loading { caption } => lines.push(caption.clone()),
        PanelView::ResultShown(result) => render_result(result, &mut lines),
    }

    if let Some(modal) = &view.modal {
        render_modal(modal, &mut lines);
    }
    if let Some(notice) = &view.notice {
        lines.push(notice_line(notice));
    }
    lines
}

fn preview_line(preview: &PreviewImage) -> String {
    format!(
        "Preview: {}x{} {}",
        preview.width, preview.height, preview.format
    )
}

fn render_result(result: &ResultView, lines: &mut Vec<String>) {
    lines.push(format!("Identified: {}", result.label));
    lines.push(format!(
        "Confidence: [{}] {}",
        confidence_bar(result),
        result.confidence_label
    ));
    if let Some(image) = &result.uploaded_image {
        lines.push(preview_line(image));
    }

    lines.push("Medicinal uses:".to_string());
    for use_line in &result.uses {
        lines.push(format!("  - {use_line}"));
    }

    if !result.alternatives.is_empty() {
        lines.push("Other possibilities:".to_string());
        lines.extend(result.alternatives.iter().map(alternative_line));
    }
    lines.push("[reset] to classify another image".to_string());
}

fn confidence_bar(result: &ResultView) -> String {
    let filled = result.bar_fill(CONFIDENCE_BAR_CELLS).min(CONFIDENCE_BAR_CELLS);
    let mut bar = String::with_capacity(CONFIDENCE_BAR_CELLS);
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(CONFIDENCE_BAR_CELLS - filled));
    bar
}

fn alternative_line(alt: &AlternativeView) -> String {
    format!("  {} ({})", alt.label, alt.percent_label)
}

fn render_modal(modal: &ModalView, lines: &mut Vec<String>) {
    lines.push(SEPARATOR.to_string());
    match modal {
        ModalView::Plant { title, uses } => {
            lines.push(format!("== {title} =="));
            lines.extend(uses.iter().map(|u| format!("  - {u}")));
        }
        ModalView::Feature { title, body } => {
            lines.push(format!("== {title} =="));
            lines.push(body.clone());
        }
    }
    lines.push("[close] / [esc] / [outside] to dismiss".to_string());
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    format!("[{tag}] {}", notice.text)
}
