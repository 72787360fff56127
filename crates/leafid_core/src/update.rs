use crate::catalog;
use crate::state::DEMO_NOTICE;
use crate::{
    validate_selection, AppState, Effect, InfoSource, LookupKind, Modal, Msg, Panel, WidgetError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen { source: _, file } => {
            if let Err(err) = validate_selection(&file) {
                state.raise(&err);
                return (state, Vec::new());
            }
            // Anything shown for an earlier file goes away; its in-flight work turns stale.
            if state.panel() != Panel::Idle {
                state.transition(Panel::Idle);
            }
            let selected = state.accept_selection(file);
            vec![Effect::DecodePreview {
                seq: selected.seq,
                file: selected,
            }]
        }
        Msg::PreviewDecoded { seq, result } => {
            if !state.is_current(seq) {
                return (state, Vec::new());
            }
            match result {
                Ok(preview) => {
                    state.set_preview(preview);
                    state.transition(Panel::Previewing);
                }
                Err(reason) => {
                    state.raise(&WidgetError::DecodeFailure { reason });
                    state.drop_selection();
                }
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            let file = match (state.panel(), state.selected()) {
                (Panel::Previewing, Some(file)) => file.clone(),
                _ => return (state, Vec::new()),
            };
            state.transition(Panel::Loading);
            vec![Effect::Classify {
                seq: file.seq,
                file,
            }]
        }
        Msg::CancelClicked => {
            if state.panel() == Panel::Previewing {
                state.reset_to_idle();
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if matches!(state.panel(), Panel::Previewing | Panel::ResultShown) {
                state.reset_to_idle();
            }
            Vec::new()
        }
        Msg::PredictionFinished { seq, result } => {
            if !state.is_current(seq) || state.panel() != Panel::Loading {
                return (state, Vec::new());
            }
            match result {
                Ok(prediction) => {
                    state.set_result(prediction);
                    state.transition(Panel::ResultShown);
                    if state.demo_notice() {
                        state.inform(DEMO_NOTICE);
                    }
                }
                Err(err) => {
                    state.raise(&err);
                    state.reset_to_idle();
                }
            }
            Vec::new()
        }
        Msg::PlantCardClicked(name) => match state.info_source() {
            InfoSource::Static => {
                show_static_plant(&mut state, &name);
                Vec::new()
            }
            InfoSource::Remote => {
                state.set_pending_plant_lookup(Some(name.clone()));
                vec![Effect::FetchPlantInfo { name }]
            }
        },
        Msg::PlantInfoFetched { name, result } => {
            if state.pending_plant_lookup() != Some(name.as_str()) {
                return (state, Vec::new());
            }
            state.set_pending_plant_lookup(None);
            match result {
                Ok(Some(uses)) => state.open_modal(Modal::Plant { name, uses }),
                Ok(None) => state.raise(&WidgetError::LookupMiss {
                    kind: LookupKind::Plant,
                    name,
                }),
                Err(reason) => state.raise(&WidgetError::PlantInfoUnavailable { name, reason }),
            }
            Vec::new()
        }
        Msg::FeatureCardClicked(key) => {
            match catalog::feature(&key) {
                Some(feature) => state.open_modal(Modal::Feature {
                    title: feature.title.to_string(),
                    body: feature.body.to_string(),
                }),
                None => state.raise(&WidgetError::LookupMiss {
                    kind: LookupKind::Feature,
                    name: key,
                }),
            }
            Vec::new()
        }
        Msg::CloseModalClicked | Msg::OutsideModalClicked | Msg::EscapePressed => {
            state.close_modal();
            Vec::new()
        }
        Msg::NoticeAcknowledged => {
            state.clear_notice();
            Vec::new()
        }
        Msg::Tick => {
            if state.panel() == Panel::Loading {
                state.advance_loading_frame();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn show_static_plant(state: &mut AppState, name: &str) {
    match catalog::plant(name) {
        Some(plant) => state.open_modal(Modal::Plant {
            name: plant.name.to_string(),
            uses: plant.uses.iter().map(|u| u.to_string()).collect(),
        }),
        None => state.raise(&WidgetError::LookupMiss {
            kind: LookupKind::Plant,
            name: name.to_string(),
        }),
    }
}
