use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use claimiq_client::{ApiError, ClientEvent, ClientHandle, ClientSettings};
use claimiq_core::{Effect, Msg, QueryAnswer, UploadReceipt};
use client_logging::{client_info, client_warn};

use super::app::ShellEvent;

/// Bridges core effects to the client engine and engine events back to core
/// messages.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, tx: mpsc::Sender<ShellEvent>) -> Result<Self, ApiError> {
        let client = ClientHandle::new(settings)?;
        let runner = Self { client };
        runner.spawn_event_loop(tx);
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UploadFile { path, name } => {
                    client_info!("UploadFile name={} path={}", name, path);
                    self.client.upload(path, name);
                }
                Effect::SendQuery {
                    query_id,
                    text,
                    collection_name,
                } => {
                    client_info!("SendQuery id={} chars={}", query_id, text.len());
                    self.client.query(query_id, text, collection_name);
                }
                Effect::CheckHealth => {
                    self.client.health();
                }
            }
        }
    }

    fn spawn_event_loop(&self, tx: mpsc::Sender<ShellEvent>) {
        let client = self.client.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                let msg = match event {
                    ClientEvent::UploadCompleted { result } => Msg::UploadFinished {
                        result: map_upload(result),
                    },
                    ClientEvent::QueryCompleted { query_id, result } => Msg::QueryFinished {
                        query_id,
                        result: map_answer(query_id, result),
                    },
                    ClientEvent::HealthChecked { result } => Msg::HealthChecked {
                        result: result.map(|_| ()).map_err(|err| err.to_string()),
                    },
                };
                if tx.send(ShellEvent::Core(msg)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_upload(
    result: Result<claimiq_client::UploadReceipt, ApiError>,
) -> Result<UploadReceipt, String> {
    match result {
        Ok(receipt) => Ok(UploadReceipt {
            file_id: receipt.file_id,
            file_name: receipt.file_name,
        }),
        Err(err) => {
            client_warn!("upload failed: {}", err);
            Err(err.to_string())
        }
    }
}

fn map_answer(
    query_id: claimiq_core::QueryId,
    result: Result<claimiq_client::Answer, ApiError>,
) -> Result<QueryAnswer, String> {
    match result {
        Ok(answer) => Ok(QueryAnswer {
            response: answer.response,
            thinking: Some(answer.thinking),
        }),
        Err(err) => {
            client_warn!("query {} failed: {}", query_id, err);
            Err(err.to_string())
        }
    }
}
