use std::collections::BTreeSet;

use crate::view_model::{AppViewModel, ChatView, MessageRow, UploadView};

pub type QueryId = u64;

/// The exact MIME type accepted by upload validation.
pub const PDF_MIME: &str = "application/pdf";

/// Upload size ceiling in bytes (10 MB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Transcript text shown when a query fails; the underlying error detail
/// goes into the reasoning field of the same message.
pub const QUERY_FAILURE_NOTICE: &str =
    "Sorry, something went wrong while answering that. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Entries are append-only and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub reasoning: Option<String>,
    pub is_error: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            reasoning: None,
            is_error: false,
        }
    }

    pub fn assistant(content: impl Into<String>, reasoning: Option<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            reasoning,
            is_error: false,
        }
    }

    pub fn assistant_error(content: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            reasoning: detail,
            is_error: true,
        }
    }
}

/// A locally selected file before validation and upload. The path is an
/// opaque handle for the engine; the core never reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: String,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// Server acknowledgement of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub file_id: String,
    pub file_name: String,
}

/// Answer payload for a completed query. `thinking` is filled by the client
/// (with a fallback when the server omits it), so it is normally present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer {
    pub response: String,
    pub thinking: Option<String>,
}

/// Descriptor of the successfully uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub file_id: String,
    pub upload_succeeded: bool,
}

impl UploadedFile {
    /// The only constructor: a descriptor exists exactly when an upload
    /// succeeded, so `file_id` is always paired with `upload_succeeded`.
    fn from_receipt(candidate: &FileCandidate, file_id: String) -> Self {
        Self {
            name: candidate.name.clone(),
            size_bytes: candidate.size_bytes,
            mime_type: candidate.mime_type.clone(),
            file_id,
            upload_succeeded: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    /// Purely visual drag-over highlight; no effect on validation.
    Dragging,
    Uploading {
        candidate: FileCandidate,
    },
    Succeeded(UploadedFile),
    Failed {
        reason: String,
    },
}

/// Construction-time configuration for the conversation. The defaults match
/// the production greeting and collection literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub greeting: String,
    pub greeting_reasoning: Option<String>,
    pub collection_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Hello! I'm ready to help you analyze your claim document. \
                       Please feel free to ask me any questions about the uploaded PDF."
                .to_string(),
            greeting_reasoning: Some(
                "I'm initialized and ready to process queries about the uploaded document \
                 using vector similarity search and document retrieval techniques."
                    .to_string(),
            ),
            collection_name: "pdf_collection".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Healthy,
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    config: ChatConfig,
    upload: UploadState,
    messages: Vec<Message>,
    input: String,
    expanded_reasoning: BTreeSet<usize>,
    pending_queries: BTreeSet<QueryId>,
    next_query_id: QueryId,
    health: BackendHealth,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ChatConfig::default())
    }
}

impl AppState {
    pub fn new(config: ChatConfig) -> Self {
        let greeting =
            Message::assistant(config.greeting.clone(), config.greeting_reasoning.clone());
        Self {
            config,
            upload: UploadState::Idle,
            messages: vec![greeting],
            input: String::new(),
            expanded_reasoning: BTreeSet::new(),
            pending_queries: BTreeSet::new(),
            next_query_id: 0,
            health: BackendHealth::Unknown,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let (dragging, uploading, error, uploaded) = match &self.upload {
            UploadState::Idle => (false, false, None, None),
            UploadState::Dragging => (true, false, None, None),
            UploadState::Uploading { .. } => (false, true, None, None),
            UploadState::Succeeded(file) => (false, false, None, Some(file.clone())),
            UploadState::Failed { reason } => (false, false, Some(reason.clone()), None),
        };
        let can_change_file = uploaded.is_some();

        let messages = self
            .messages
            .iter()
            .enumerate()
            .map(|(index, message)| MessageRow {
                role: message.role,
                content: message.content.clone(),
                reasoning: message.reasoning.clone(),
                is_error: message.is_error,
                reasoning_expanded: self.expanded_reasoning.contains(&index),
            })
            .collect();

        AppViewModel {
            upload: UploadView {
                dragging,
                uploading,
                error,
                uploaded,
                can_change_file,
            },
            chat: ChatView {
                enabled: self.chat_enabled(),
                busy: !self.pending_queries.is_empty(),
                input: self.input.clone(),
                messages,
            },
            health: self.health.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it. The shell re-renders only when
    /// this returns true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn chat_enabled(&self) -> bool {
        matches!(self.upload, UploadState::Succeeded(_))
    }

    pub(crate) fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn upload_state(&self) -> &UploadState {
        &self.upload
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        let next = match (&self.upload, dragging) {
            (UploadState::Idle, true) => Some(UploadState::Dragging),
            (UploadState::Dragging, false) => Some(UploadState::Idle),
            _ => None,
        };
        if let Some(next) = next {
            self.upload = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_upload(&mut self, candidate: FileCandidate) {
        self.upload = UploadState::Uploading { candidate };
        self.mark_dirty();
    }

    pub(crate) fn complete_upload(&mut self, receipt: UploadReceipt) {
        let UploadState::Uploading { candidate } = &self.upload else {
            // Stale completion, e.g. after a reset raced the engine.
            return;
        };
        let file = UploadedFile::from_receipt(candidate, receipt.file_id);
        self.upload = UploadState::Succeeded(file);
        self.mark_dirty();
    }

    pub(crate) fn fail_upload(&mut self, reason: String) {
        self.upload = UploadState::Failed { reason };
        self.mark_dirty();
    }

    pub(crate) fn reset_upload(&mut self) {
        match self.upload {
            UploadState::Succeeded(_) | UploadState::Failed { .. } => {
                self.upload = UploadState::Idle;
                self.mark_dirty();
            }
            _ => {}
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Appends the user message, clears the input and records the query as
    /// pending. Returns the id used to correlate the completion.
    pub(crate) fn begin_query(&mut self, text: String) -> QueryId {
        self.messages.push(Message::user(text));
        self.input.clear();
        self.next_query_id += 1;
        let query_id = self.next_query_id;
        self.pending_queries.insert(query_id);
        self.mark_dirty();
        query_id
    }

    /// Appends exactly one assistant message for a pending query. Unknown or
    /// already-completed ids are dropped so a completion can never append
    /// twice.
    pub(crate) fn finish_query(&mut self, query_id: QueryId, result: Result<QueryAnswer, String>) {
        if !self.pending_queries.remove(&query_id) {
            return;
        }
        let message = match result {
            Ok(answer) => Message::assistant(answer.response, answer.thinking),
            Err(detail) => Message::assistant_error(QUERY_FAILURE_NOTICE, Some(detail)),
        };
        self.messages.push(message);
        self.mark_dirty();
    }

    pub(crate) fn toggle_reasoning(&mut self, index: usize) {
        let has_reasoning = self
            .messages
            .get(index)
            .is_some_and(|message| {
                message.role == Role::Assistant
                    && message.reasoning.as_deref().is_some_and(|r| !r.is_empty())
            });
        if !has_reasoning {
            return;
        }
        if !self.expanded_reasoning.remove(&index) {
            self.expanded_reasoning.insert(index);
        }
        self.mark_dirty();
    }

    pub(crate) fn set_health(&mut self, result: Result<(), String>) {
        let next = match result {
            Ok(()) => BackendHealth::Healthy,
            Err(detail) => BackendHealth::Unreachable(detail),
        };
        if self.health != next {
            self.health = next;
            self.mark_dirty();
        }
    }
}
