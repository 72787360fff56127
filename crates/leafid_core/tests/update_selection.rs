use std::sync::Once;

use leafid_core::{
    update, AppState, Effect, FileCandidate, Msg, Panel, PanelView, PreviewImage, SelectionSeq,
    SelectionSource, Severity, MAX_UPLOAD_BYTES,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(leafid_logging::initialize_for_tests);
}

fn png(name: &str) -> FileCandidate {
    FileCandidate::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

fn preview() -> PreviewImage {
    PreviewImage {
        width: 4,
        height: 3,
        format: "png".to_string(),
        thumbnail_uri: "data:image/png;base64,AAAA".to_string(),
    }
}

fn choose(state: AppState, file: FileCandidate) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileChosen {
            source: SelectionSource::Picker,
            file,
        },
    )
}

fn decoded(state: AppState, seq: SelectionSeq) -> AppState {
    update(
        state,
        Msg::PreviewDecoded {
            seq,
            result: Ok(preview()),
        },
    )
    .0
}

#[test]
fn valid_file_requests_decode_then_previews() {
    init_logging();
    let (mut state, effects) = choose(AppState::new(), png("leaf.png"));

    assert_eq!(state.panel(), Panel::Idle);
    assert!(state.consume_dirty());
    let seq = match effects.as_slice() {
        [Effect::DecodePreview { seq, file }] => {
            assert_eq!(file.name, "leaf.png");
            assert_eq!(file.seq, *seq);
            *seq
        }
        other => panic!("unexpected effects: {other:?}"),
    };

    let state = decoded(state, seq);
    assert_eq!(state.panel(), Panel::Previewing);
    match state.view().panel {
        PanelView::Previewing {
            file_name_label,
            file_size_label,
            preview,
        } => {
            assert_eq!(file_name_label, "File: leaf.png");
            assert_eq!(file_size_label, "Size: 4 Bytes");
            assert_eq!(preview.map(|p| (p.width, p.height)), Some((4, 3)));
        }
        other => panic!("expected preview panel, got {other:?}"),
    }
}

#[test]
fn every_source_shares_validation() {
    init_logging();
    for source in [
        SelectionSource::Picker,
        SelectionSource::Drop,
        SelectionSource::InputChange,
    ] {
        let (state, effects) = update(
            AppState::new(),
            Msg::FileChosen {
                source,
                file: FileCandidate::new("notes.txt", "text/plain", b"hi".to_vec()),
            },
        );
        assert!(effects.is_empty(), "{source:?} should reject");
        assert!(state.selected().is_none());
    }
}

#[test]
fn non_image_is_rejected_without_state_change() {
    init_logging();
    let (state, effects) = choose(AppState::new(), png("a.png"));
    let seq = match &effects[0] {
        Effect::DecodePreview { seq, .. } => *seq,
        other => panic!("unexpected effect {other:?}"),
    };
    let mut state = decoded(state, seq);
    state.consume_dirty();

    for media_type in ["application/pdf", "text/html", "", "video/mp4", "IMAGE/PNG"] {
        let (next, effects) = choose(
            state.clone(),
            FileCandidate::new("doc", media_type, vec![1, 2, 3]),
        );
        assert!(effects.is_empty());
        assert_eq!(next.panel(), Panel::Previewing);
        assert_eq!(next.current_seq(), seq);
        assert_eq!(next.selected().map(|f| f.name.as_str()), Some("a.png"));
        let notice = next.notice().expect("notice raised");
        assert_eq!(notice.text, "Please select a valid image file.");
        assert_eq!(notice.severity, Severity::Warning);
    }
}

#[test]
fn oversized_file_is_rejected() {
    init_logging();
    let mut file = png("huge.png");
    file.size = MAX_UPLOAD_BYTES + 1;

    let (state, effects) = choose(AppState::new(), file);
    assert!(effects.is_empty());
    assert_eq!(state.panel(), Panel::Idle);
    assert!(state.selected().is_none());
    assert_eq!(
        state.notice().map(|n| n.text.as_str()),
        Some("Please select an image smaller than 10MB.")
    );
}

#[test]
fn file_at_exact_limit_is_accepted() {
    init_logging();
    let mut file = png("limit.png");
    file.size = MAX_UPLOAD_BYTES;

    let (state, effects) = choose(AppState::new(), file);
    assert_eq!(effects.len(), 1);
    assert!(state.notice().is_none());
}

#[test]
fn decode_failure_surfaces_error_and_stays_idle() {
    init_logging();
    let (state, effects) = choose(AppState::new(), png("broken.png"));
    let seq = match &effects[0] {
        Effect::DecodePreview { seq, .. } => *seq,
        other => panic!("unexpected effect {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::PreviewDecoded {
            seq,
            result: Err("truncated stream".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.panel(), Panel::Idle);
    assert!(state.selected().is_none());
    let notice = state.notice().expect("notice raised");
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(
        notice.text,
        "Error reading the selected file. Please try again."
    );
}

#[test]
fn stale_decode_is_ignored() {
    init_logging();
    let (state, first) = choose(AppState::new(), png("a.png"));
    let (state, second) = choose(state, png("b.png"));
    let (seq_a, seq_b) = match (&first[0], &second[0]) {
        (Effect::DecodePreview { seq: a, .. }, Effect::DecodePreview { seq: b, .. }) => (*a, *b),
        other => panic!("unexpected effects {other:?}"),
    };
    assert!(seq_b > seq_a);

    let state = decoded(state, seq_a);
    assert_eq!(state.panel(), Panel::Idle);

    let state = decoded(state, seq_b);
    assert_eq!(state.panel(), Panel::Previewing);
    assert_eq!(state.selected().map(|f| f.name.as_str()), Some("b.png"));
}

#[test]
fn cancel_returns_to_idle_and_invalidates_selection() {
    init_logging();
    let (state, effects) = choose(AppState::new(), png("a.png"));
    let seq = match &effects[0] {
        Effect::DecodePreview { seq, .. } => *seq,
        other => panic!("unexpected effect {other:?}"),
    };
    let state = decoded(state, seq);

    let (state, effects) = update(state, Msg::CancelClicked);
    assert!(effects.is_empty());
    assert_eq!(state.panel(), Panel::Idle);
    assert!(state.selected().is_none());
    assert!(state.current_seq() > seq);
    assert!(matches!(state.view().panel, PanelView::Idle { .. }));
}

#[test]
fn notice_is_cleared_on_acknowledge() {
    init_logging();
    let (state, _) = choose(
        AppState::new(),
        FileCandidate::new("x.txt", "text/plain", vec![]),
    );
    assert!(state.notice().is_some());

    let (mut state, _) = update(state, Msg::NoticeAcknowledged);
    assert!(state.notice().is_none());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::NoticeAcknowledged);
    assert!(!state.consume_dirty());
}
