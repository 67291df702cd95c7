//! Claim IQ client: HTTP API operations and effect execution.
mod api;
mod engine;
mod types;

pub use api::{
    ClientSettings, DocumentApi, HttpApiClient, DEFAULT_BASE_URL, DEFAULT_COLLECTION,
    REASONING_FALLBACK,
};
pub use engine::{ClientEvent, ClientHandle};
pub use types::{Answer, ApiError, ApiFailure, QueryId, UploadReceipt};
