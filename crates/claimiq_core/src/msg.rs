#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file via the picker or dropped one on the upload target.
    /// `None` means the selection produced no file and is ignored.
    FileChosen(Option<crate::FileCandidate>),
    /// Pointer dragging a file entered the upload target.
    DragEntered,
    /// Pointer dragging a file left the upload target.
    DragLeft,
    /// Engine completion for the in-flight upload.
    UploadFinished {
        result: Result<crate::UploadReceipt, String>,
    },
    /// User clicked Change File (or dismissed an upload error).
    ChangeFileClicked,
    /// User edited the chat input box.
    InputChanged(String),
    /// User submitted the current chat input.
    QuerySubmitted,
    /// Engine completion for a query.
    QueryFinished {
        query_id: crate::QueryId,
        result: Result<crate::QueryAnswer, String>,
    },
    /// User toggled the reasoning panel of the message at `index`.
    ReasoningToggled { index: usize },
    /// Ask the engine to probe the backend.
    HealthRequested,
    /// Engine completion for a health probe.
    HealthChecked { result: Result<(), String> },
    /// Fallback for placeholder wiring.
    NoOp,
}
