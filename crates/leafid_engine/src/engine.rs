use std::io;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use leafid_logging::{leaf_debug, leaf_warn};

use crate::classify::Classifier;
use crate::{decode_preview, DecodeError, EngineEvent, RequestId, UploadFile};

enum EngineCommand {
    Decode { request_id: RequestId, file: UploadFile },
    Classify { request_id: RequestId, file: UploadFile },
    PlantInfo { name: String },
}

/// Runs decode and classification off the caller's thread.
///
/// Commands go to a dedicated thread owning a tokio runtime; every command
/// becomes its own task, so completions may arrive in any order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(classifier: Arc<dyn Classifier>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("leafid-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let classifier = classifier.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(classifier.as_ref(), command, event_tx).await;
                    });
                }
                leaf_debug!("Engine command channel closed; shutting down");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn decode(&self, request_id: RequestId, file: UploadFile) {
        self.send(EngineCommand::Decode { request_id, file });
    }

    pub fn classify(&self, request_id: RequestId, file: UploadFile) {
        self.send(EngineCommand::Classify { request_id, file });
    }

    pub fn plant_info(&self, name: impl Into<String>) {
        self.send(EngineCommand::PlantInfo { name: name.into() });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.receiver().try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.receiver().recv_timeout(timeout).ok()
    }

    fn receiver(&self) -> std::sync::MutexGuard<'_, mpsc::Receiver<EngineEvent>> {
        self.event_rx.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            leaf_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    classifier: &dyn Classifier,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Decode { request_id, file } => {
            let content = file.content.clone();
            let result = tokio::task::spawn_blocking(move || decode_preview(&content))
                .await
                .unwrap_or_else(|err| Err(DecodeError::Corrupt(err.to_string())));
            EngineEvent::PreviewDecoded { request_id, result }
        }
        EngineCommand::Classify { request_id, file } => {
            let result = classifier.classify(&file).await;
            EngineEvent::ClassifyCompleted { request_id, result }
        }
        EngineCommand::PlantInfo { name } => {
            let result = classifier.plant_info(&name).await;
            EngineEvent::PlantInfoCompleted { name, result }
        }
    };
    let _ = event_tx.send(event);
}
