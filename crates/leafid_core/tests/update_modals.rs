use std::sync::Once;

use leafid_core::{
    catalog, update, AppState, Effect, FileCandidate, InfoSource, ModalView, Msg, Panel,
    SelectionSource, Severity,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(leafid_logging::initialize_for_tests);
}

fn open_plant(state: AppState, name: &str) -> AppState {
    update(state, Msg::PlantCardClicked(name.to_string())).0
}

#[test]
fn known_plant_opens_modal_with_uses() {
    init_logging();
    let state = open_plant(AppState::new(), "Neem Tree");

    match state.view().modal {
        Some(ModalView::Plant { title, uses }) => {
            assert_eq!(title, "Neem Tree");
            let expected: Vec<String> = catalog::plant("Neem Tree")
                .unwrap()
                .uses
                .iter()
                .map(|u| u.to_string())
                .collect();
            assert_eq!(uses, expected);
        }
        other => panic!("expected plant modal, got {other:?}"),
    }
    assert!(state.notice().is_none());
}

#[test]
fn reopening_same_plant_renders_identically() {
    init_logging();
    let first = open_plant(AppState::new(), "Gotu Kola");
    let first_view = first.view().modal;

    let (closed, _) = update(first, Msg::CloseModalClicked);
    let second = open_plant(closed, "Gotu Kola");
    assert_eq!(second.view().modal, first_view);

    let third = open_plant(second, "Gotu Kola");
    assert_eq!(third.view().modal, first_view);
}

#[test]
fn unknown_plant_raises_notice_without_modal() {
    init_logging();
    let state = open_plant(AppState::new(), "Peppermint");

    assert!(state.view().modal.is_none());
    assert_eq!(
        state.notice().map(|n| n.text.as_str()),
        Some("Plant information not found.")
    );
}

#[test]
fn feature_cards_open_feature_modal() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FeatureCardClicked("plant-types".to_string()),
    );
    match state.view().modal {
        Some(ModalView::Feature { title, body }) => {
            assert_eq!(title, "10 Plant Types Database");
            assert!(body.contains("Neem Tree"));
        }
        other => panic!("expected feature modal, got {other:?}"),
    }

    let (state, _) = update(AppState::new(), Msg::FeatureCardClicked("nope".to_string()));
    assert!(state.view().modal.is_none());
    assert_eq!(
        state.notice().map(|n| n.text.as_str()),
        Some("Feature information not found.")
    );
}

#[test]
fn every_dismissal_yields_the_same_hidden_state() {
    init_logging();
    let open = open_plant(AppState::new(), "Holy Basil");

    let dismissed: Vec<_> = [
        Msg::CloseModalClicked,
        Msg::OutsideModalClicked,
        Msg::EscapePressed,
    ]
    .into_iter()
    .map(|msg| {
        let (mut state, effects) = update(open.clone(), msg);
        assert!(effects.is_empty());
        assert!(state.consume_dirty());
        state
    })
    .collect();

    assert!(dismissed.iter().all(|state| state.modal().is_none()));
    assert_eq!(dismissed[0], dismissed[1]);
    assert_eq!(dismissed[1], dismissed[2]);
}

#[test]
fn escape_without_modal_changes_nothing() {
    init_logging();
    let mut state = AppState::new();
    state.consume_dirty();
    let (mut next, _) = update(state.clone(), Msg::EscapePressed);
    assert!(!next.consume_dirty());
    assert_eq!(next, state);
}

#[test]
fn dismissing_modal_leaves_classification_untouched() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::FileChosen {
            source: SelectionSource::Picker,
            file: FileCandidate::new("leaf.png", "image/png", vec![1, 2]),
        },
    );
    let seq = match effects.as_slice() {
        [Effect::DecodePreview { seq, .. }] => *seq,
        other => panic!("unexpected effects {other:?}"),
    };
    let state = open_plant(state, "Lemongrass");
    let (state, _) = update(state, Msg::EscapePressed);

    assert_eq!(state.current_seq(), seq);
    assert_eq!(state.selected().map(|f| f.name.as_str()), Some("leaf.png"));
    assert_eq!(state.panel(), Panel::Idle);
}

#[test]
fn remote_source_requests_lookup_and_ignores_stale_answers() {
    init_logging();
    let state = AppState::with_info_source(InfoSource::Remote);
    let (state, effects) = update(state, Msg::PlantCardClicked("Neem Tree".to_string()));
    assert_eq!(
        effects,
        vec![Effect::FetchPlantInfo {
            name: "Neem Tree".to_string()
        }]
    );
    assert!(state.view().modal.is_none());

    let (state, _) = update(state, Msg::PlantCardClicked("Lemongrass".to_string()));
    let (state, _) = update(
        state,
        Msg::PlantInfoFetched {
            name: "Neem Tree".to_string(),
            result: Ok(Some(vec!["Dental care".to_string()])),
        },
    );
    assert!(state.view().modal.is_none());

    let (state, _) = update(
        state,
        Msg::PlantInfoFetched {
            name: "Lemongrass".to_string(),
            result: Ok(Some(vec!["Fever reduction".to_string()])),
        },
    );
    assert_eq!(
        state.view().modal,
        Some(ModalView::Plant {
            title: "Lemongrass".to_string(),
            uses: vec!["Fever reduction".to_string()],
        })
    );
}

#[test]
fn remote_not_found_and_failure_raise_notices() {
    init_logging();
    let state = AppState::with_info_source(InfoSource::Remote);
    let (state, _) = update(state, Msg::PlantCardClicked("Mint".to_string()));
    let (state, _) = update(
        state,
        Msg::PlantInfoFetched {
            name: "Mint".to_string(),
            result: Ok(None),
        },
    );
    assert!(state.view().modal.is_none());
    assert_eq!(
        state.notice().map(|n| n.text.as_str()),
        Some("Plant information not found.")
    );

    let (state, _) = update(state, Msg::NoticeAcknowledged);
    let (state, _) = update(state, Msg::PlantCardClicked("Neem Tree".to_string()));
    let (state, _) = update(
        state,
        Msg::PlantInfoFetched {
            name: "Neem Tree".to_string(),
            result: Err("connection reset".to_string()),
        },
    );
    assert!(state.view().modal.is_none());
    let notice = state.notice().expect("lookup failure notice");
    assert_eq!(notice.text, "Error loading plant information.");
    assert_eq!(notice.severity, Severity::Error);
}
