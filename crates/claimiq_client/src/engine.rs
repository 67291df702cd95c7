use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use serde_json::Value;

use crate::{
    Answer, ApiError, ApiFailure, ClientSettings, DocumentApi, HttpApiClient, QueryId,
    UploadReceipt,
};

enum ClientCommand {
    Upload {
        path: String,
        name: String,
    },
    Query {
        query_id: QueryId,
        text: String,
        collection_name: String,
    },
    Health,
}

#[derive(Debug)]
pub enum ClientEvent {
    UploadCompleted {
        result: Result<UploadReceipt, ApiError>,
    },
    QueryCompleted {
        query_id: QueryId,
        result: Result<Answer, ApiError>,
    },
    HealthChecked {
        result: Result<Value, ApiError>,
    },
}

/// Handle to the background runtime executing API calls. Each command runs
/// as an independent task, so overlapping queries complete in whatever order
/// the backend answers.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let api: Arc<dyn DocumentApi> = Arc::new(HttpApiClient::new(settings)?);
        Ok(Self::with_api(api))
    }

    /// Runs against any `DocumentApi` implementation; used by tests to
    /// substitute the backend.
    pub fn with_api(api: Arc<dyn DocumentApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn upload(&self, path: impl Into<String>, name: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::Upload {
            path: path.into(),
            name: name.into(),
        });
    }

    pub fn query(
        &self,
        query_id: QueryId,
        text: impl Into<String>,
        collection_name: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(ClientCommand::Query {
            query_id,
            text: text.into(),
            collection_name: collection_name.into(),
        });
    }

    pub fn health(&self) {
        let _ = self.cmd_tx.send(ClientCommand::Health);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn DocumentApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Upload { path, name } => {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => api.upload(&name, bytes).await,
                Err(err) => Err(ApiError::new(ApiFailure::Io, err.to_string())),
            };
            let _ = event_tx.send(ClientEvent::UploadCompleted { result });
        }
        ClientCommand::Query {
            query_id,
            text,
            collection_name,
        } => {
            let result = api.query(&text, &collection_name).await;
            let _ = event_tx.send(ClientEvent::QueryCompleted { query_id, result });
        }
        ClientCommand::Health => {
            let result = api.health().await;
            let _ = event_tx.send(ClientEvent::HealthChecked { result });
        }
    }
}
