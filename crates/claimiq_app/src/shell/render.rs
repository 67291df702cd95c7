use claimiq_core::{AppViewModel, BackendHealth, MessageRow, Role};

pub fn print_banner() {
    println!("Claim IQ — intelligent claims analysis assistant");
    print_help();
}

pub fn print_help() {
    println!("  /upload <path>   upload a claim PDF (max 10MB)");
    println!("  /change          discard the uploaded file");
    println!("  /reasoning <n>   expand or collapse a message's reasoning");
    println!("  /health          probe the backend");
    println!("  /quit            exit");
    println!("  anything else is asked about the uploaded document");
}

/// Shell-level notices (status changes, hints, local errors).
pub fn print_notice(text: &str) {
    println!("* {text}");
}

/// Prints transcript rows appended since the last render; returns the new
/// row count.
pub fn print_new_messages(view: &AppViewModel, already_printed: usize) -> usize {
    for (index, row) in view.chat.messages.iter().enumerate().skip(already_printed) {
        print_message(index, row);
    }
    view.chat.messages.len()
}

fn print_message(index: usize, row: &MessageRow) {
    let speaker = match (row.role, row.is_error) {
        (Role::User, _) => "you",
        (Role::Assistant, false) => "assistant",
        (Role::Assistant, true) => "assistant (error)",
    };
    println!("[{index}] {speaker}: {}", row.content);
    match (&row.reasoning, row.reasoning_expanded) {
        (Some(reasoning), true) => println!("      reasoning: {reasoning}"),
        (Some(_), false) => println!("      (reasoning hidden — /reasoning {index})"),
        (None, _) => {}
    }
}

/// Prints the current reasoning panel of one message, after a toggle.
pub fn print_reasoning(view: &AppViewModel, index: usize) {
    let Some(row) = view.chat.messages.get(index) else {
        print_notice(&format!("no message {index}"));
        return;
    };
    match (&row.reasoning, row.reasoning_expanded) {
        (Some(reasoning), true) => println!("      reasoning: {reasoning}"),
        (Some(_), false) => println!("      (reasoning collapsed)"),
        (None, _) => print_notice(&format!("message {index} has no reasoning")),
    }
}

pub fn status_line(view: &AppViewModel) -> String {
    let upload = if view.upload.uploading {
        "uploading...".to_string()
    } else if let Some(error) = &view.upload.error {
        error.clone()
    } else if let Some(file) = &view.upload.uploaded {
        format!(
            "{} ({:.2} MB, id {})",
            file.name,
            file.size_bytes as f64 / 1024.0 / 1024.0,
            file.file_id
        )
    } else {
        "none (use /upload <path>)".to_string()
    };
    let backend = match &view.health {
        BackendHealth::Unknown => "unknown".to_string(),
        BackendHealth::Healthy => "healthy".to_string(),
        BackendHealth::Unreachable(detail) => format!("unreachable ({detail})"),
    };
    format!("Document: {upload} | Backend: {backend}")
}

pub fn print_status(view: &AppViewModel) {
    print_notice(&status_line(view));
}
