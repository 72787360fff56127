use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use bytes::Bytes;
use leafid_core::{catalog, Effect, Msg, PredictionResult, PreviewImage, RankedLabel, SelectedFile, WidgetError};
use leafid_engine::{
    CatalogEntry, Classification, Classifier, ClassifyError, EngineEvent, EngineHandle,
    FailureKind, MockClassifier, RemoteClassifier, UploadFile,
};
use leafid_logging::{leaf_info, leaf_warn};

use super::app::LoopEvent;
use super::config::AppConfig;

const EVENT_POLL: Duration = Duration::from_millis(100);

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(classifier: Arc<dyn Classifier>, tx: mpsc::Sender<LoopEvent>) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(classifier).context("failed to start engine thread")?;
        let runner = Self { engine };
        runner.spawn_event_loop(tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DecodePreview { seq, file } => {
                    leaf_info!("DecodePreview seq={} name={} size={}", seq, file.name, file.size);
                    self.engine.decode(seq, upload_file(&file));
                }
                Effect::Classify { seq, file } => {
                    leaf_info!("Classify seq={} name={}", seq, file.name);
                    self.engine.classify(seq, upload_file(&file));
                }
                Effect::FetchPlantInfo { name } => {
                    leaf_info!("FetchPlantInfo name={}", name);
                    self.engine.plant_info(name);
                }
            }
        }
    }

    fn spawn_event_loop(&self, tx: mpsc::Sender<LoopEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(EVENT_POLL) {
                if tx.send(LoopEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

/// Picks the classifier the config asks for.
pub fn build_classifier(config: &AppConfig) -> anyhow::Result<Arc<dyn Classifier>> {
    if let Some(settings) = config.remote_settings() {
        leaf_info!("Using remote classifier at {}", settings.base_url);
        let remote = RemoteClassifier::new(settings).context("invalid remote backend")?;
        return Ok(Arc::new(remote));
    }
    let settings = config.mock_settings().unwrap_or_default();
    leaf_info!(
        "Using mock classifier, delay {:?}..{:?}",
        settings.min_delay,
        settings.max_delay
    );
    let mock = MockClassifier::new(catalog_entries(), settings).context("invalid mock backend")?;
    Ok(Arc::new(mock))
}

fn catalog_entries() -> Vec<CatalogEntry> {
    catalog::PLANTS
        .iter()
        .map(|plant| CatalogEntry {
            label: plant.name.to_string(),
            uses: plant.uses.iter().map(|u| u.to_string()).collect(),
        })
        .collect()
}

fn upload_file(file: &SelectedFile) -> UploadFile {
    UploadFile {
        name: file.name.clone(),
        media_type: file.media_type.clone(),
        content: Bytes::copy_from_slice(&file.content),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PreviewDecoded { request_id, result } => Msg::PreviewDecoded {
            seq: request_id,
            result: result
                .map(|preview| PreviewImage {
                    width: preview.width,
                    height: preview.height,
                    format: preview.format,
                    thumbnail_uri: preview.thumbnail_uri,
                })
                .map_err(|err| {
                    leaf_warn!("Preview {} failed: {}", request_id, err);
                    err.to_string()
                }),
        },
        EngineEvent::ClassifyCompleted { request_id, result } => Msg::PredictionFinished {
            seq: request_id,
            result: result.map(to_prediction).map_err(|err| {
                leaf_warn!("Classification {} failed: {}", request_id, err);
                to_widget_error(err)
            }),
        },
        EngineEvent::PlantInfoCompleted { name, result } => {
            let result = result.map_err(|err| {
                leaf_warn!("Plant info for {} failed: {}", name, err);
                err.to_string()
            });
            Msg::PlantInfoFetched { name, result }
        }
    }
}

fn to_prediction(classification: Classification) -> PredictionResult {
    PredictionResult {
        label: classification.label,
        confidence: classification.confidence,
        uses: classification.uses,
        top_predictions: classification
            .ranked
            .into_iter()
            .map(|r| RankedLabel {
                label: r.label,
                confidence: r.confidence,
            })
            .collect(),
    }
}

fn to_widget_error(err: ClassifyError) -> WidgetError {
    match err.kind {
        FailureKind::Rejected => WidgetError::ServerRejection {
            message: err.message,
        },
        _ => WidgetError::NetworkFailure {
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_failure(kind: FailureKind, message: &str) -> EngineEvent {
        EngineEvent::ClassifyCompleted {
            request_id: 4,
            result: Err(ClassifyError {
                kind,
                message: message.to_string(),
            }),
        }
    }

    #[test]
    fn rejection_keeps_the_service_message() {
        let msg = map_event(classify_failure(FailureKind::Rejected, "Unsupported image"));
        assert_eq!(
            msg,
            Msg::PredictionFinished {
                seq: 4,
                result: Err(WidgetError::ServerRejection {
                    message: "Unsupported image".to_string()
                }),
            }
        );
    }

    #[test]
    fn transport_failures_become_network_errors() {
        for kind in [FailureKind::Timeout, FailureKind::HttpStatus(502), FailureKind::Network] {
            let msg = map_event(classify_failure(kind, "boom"));
            match msg {
                Msg::PredictionFinished {
                    seq: 4,
                    result: Err(WidgetError::NetworkFailure { .. }),
                } => {}
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn classification_maps_to_prediction() {
        let event = EngineEvent::ClassifyCompleted {
            request_id: 9,
            result: Ok(Classification {
                label: "Neem".to_string(),
                confidence: 91.0,
                uses: vec!["Skin care".to_string()],
                ranked: vec![
                    leafid_engine::RankedLabel {
                        label: "Neem".to_string(),
                        confidence: 91.0,
                    },
                    leafid_engine::RankedLabel {
                        label: "Tulsi".to_string(),
                        confidence: 30.0,
                    },
                ],
            }),
        };
        let Msg::PredictionFinished { seq, result } = map_event(event) else {
            panic!("expected prediction");
        };
        assert_eq!(seq, 9);
        let prediction = result.unwrap();
        assert_eq!(prediction.label, "Neem");
        assert_eq!(prediction.top_predictions.len(), 2);
        assert_eq!(prediction.top_predictions[1].label, "Tulsi");
    }

    #[test]
    fn plant_info_miss_passes_through() {
        let msg = map_event(EngineEvent::PlantInfoCompleted {
            name: "Fern".to_string(),
            result: Ok(None),
        });
        assert_eq!(
            msg,
            Msg::PlantInfoFetched {
                name: "Fern".to_string(),
                result: Ok(None),
            }
        );
    }

    #[test]
    fn catalog_covers_every_plant() {
        let entries = catalog_entries();
        assert_eq!(entries.len(), catalog::PLANTS.len());
        assert!(entries.iter().all(|e| !e.uses.is_empty()));
    }
}
