//! Claim IQ core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, BackendHealth, ChatConfig, FileCandidate, Message, QueryAnswer, QueryId, Role,
    UploadReceipt, UploadState, UploadedFile, MAX_UPLOAD_BYTES, PDF_MIME, QUERY_FAILURE_NOTICE,
};
pub use update::update;
pub use view_model::{AppViewModel, ChatView, MessageRow, UploadView};
