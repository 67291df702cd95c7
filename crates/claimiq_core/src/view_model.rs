use crate::{BackendHealth, Role, UploadedFile};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub upload: UploadView,
    pub chat: ChatView,
    pub health: BackendHealth,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadView {
    pub dragging: bool,
    pub uploading: bool,
    pub error: Option<String>,
    /// The descriptor the page composition observes; `None` until an upload
    /// succeeds and again after Change File.
    pub uploaded: Option<UploadedFile>,
    pub can_change_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatView {
    pub enabled: bool,
    pub busy: bool,
    pub input: String,
    pub messages: Vec<MessageRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub role: Role,
    pub content: String,
    pub reasoning: Option<String>,
    pub is_error: bool,
    pub reasoning_expanded: bool,
}
