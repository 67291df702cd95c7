use crate::{AppState, Effect, Msg, UploadState, MAX_UPLOAD_BYTES, PDF_MIME};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(None) => Vec::new(),
        Msg::FileChosen(Some(candidate)) => {
            // One upload at a time, and a succeeded upload is replaced only
            // through an explicit Change File.
            if matches!(
                state.upload_state(),
                UploadState::Uploading { .. } | UploadState::Succeeded(_)
            ) {
                return (state, Vec::new());
            }
            match validate_candidate(&candidate) {
                Err(reason) => {
                    state.fail_upload(reason);
                    Vec::new()
                }
                Ok(()) => {
                    let effect = Effect::UploadFile {
                        path: candidate.path.clone(),
                        name: candidate.name.clone(),
                    };
                    state.begin_upload(candidate);
                    vec![effect]
                }
            }
        }
        Msg::DragEntered => {
            state.set_dragging(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_dragging(false);
            Vec::new()
        }
        Msg::UploadFinished { result } => {
            match result {
                Ok(receipt) => state.complete_upload(receipt),
                Err(detail) => state.fail_upload(format!("Upload failed: {detail}")),
            }
            Vec::new()
        }
        Msg::ChangeFileClicked => {
            state.reset_upload();
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::QuerySubmitted => {
            let text = state.input().trim().to_string();
            if text.is_empty() || !state.chat_enabled() {
                return (state, Vec::new());
            }
            let collection_name = state.config().collection_name.clone();
            let query_id = state.begin_query(text.clone());
            vec![Effect::SendQuery {
                query_id,
                text,
                collection_name,
            }]
        }
        Msg::QueryFinished { query_id, result } => {
            state.finish_query(query_id, result);
            Vec::new()
        }
        Msg::ReasoningToggled { index } => {
            state.toggle_reasoning(index);
            Vec::new()
        }
        Msg::HealthRequested => vec![Effect::CheckHealth],
        Msg::HealthChecked { result } => {
            state.set_health(result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Pre-network validation, in fixed order: type, then size.
fn validate_candidate(candidate: &crate::FileCandidate) -> Result<(), String> {
    if candidate.mime_type != PDF_MIME {
        return Err("Please select a PDF file".to_string());
    }
    if candidate.size_bytes > MAX_UPLOAD_BYTES {
        return Err("File size must be less than 10MB".to_string());
    }
    Ok(())
}
