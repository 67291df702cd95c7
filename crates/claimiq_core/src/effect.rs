#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UploadFile { path: String, name: String },
    SendQuery {
        query_id: crate::QueryId,
        text: String,
        collection_name: String,
    },
    CheckHealth,
}
