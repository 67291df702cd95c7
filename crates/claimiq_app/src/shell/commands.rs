use std::fs;
use std::io;
use std::path::Path;

use claimiq_core::FileCandidate;

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Upload(String),
    ChangeFile,
    Reasoning(usize),
    Health,
    Help,
    Quit,
    /// Anything that is not a slash command is a chat query.
    Say(String),
    Empty,
}

pub fn parse_line(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellCommand::Empty;
    }
    if !trimmed.starts_with('/') {
        return ShellCommand::Say(trimmed.to_string());
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };
    match command {
        "/upload" if !rest.is_empty() => ShellCommand::Upload(rest.to_string()),
        "/change" => ShellCommand::ChangeFile,
        "/reasoning" => match rest.parse() {
            Ok(index) => ShellCommand::Reasoning(index),
            Err(_) => ShellCommand::Help,
        },
        "/health" => ShellCommand::Health,
        "/quit" | "/exit" => ShellCommand::Quit,
        _ => ShellCommand::Help,
    }
}

/// Stats a local path into the candidate the state machine validates. MIME
/// comes from the extension, matching what a browser picker would report.
pub fn candidate_from_path(path: &str) -> io::Result<FileCandidate> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"));
    }
    let name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(FileCandidate {
        path: path.to_string(),
        name,
        size_bytes: metadata.len(),
        mime_type: mime_for_path(path).to_string(),
    })
}

fn mime_for_path(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
