use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use claimiq_client::ClientSettings;
use claimiq_core::{update, AppState, ChatConfig, Msg};
use client_logging::client_info;

use super::commands::{self, ShellCommand};
use super::effects::EffectRunner;
use super::{logging, render};

/// Environment override for the backend base URL.
const API_URL_ENV: &str = "CLAIMIQ_API_URL";

pub(super) enum ShellEvent {
    Core(Msg),
    Command(ShellCommand),
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize();

    let mut settings = ClientSettings::default();
    if let Ok(value) = std::env::var(API_URL_ENV) {
        let value = value.trim();
        if !value.is_empty() {
            settings.base_url = value.to_string();
        }
    }
    client_info!("backend base url: {}", settings.base_url);

    let (tx, rx) = mpsc::channel::<ShellEvent>();
    let runner = EffectRunner::new(settings, tx.clone())
        .map_err(|err| anyhow::anyhow!("failed to start client engine: {err}"))?;
    spawn_stdin_reader(tx);

    let mut state = AppState::new(ChatConfig::default());
    render::print_banner();

    let mut printed = render::print_new_messages(&state.view(), 0);
    let mut last_status = String::new();
    let mut last_busy = false;

    // Probe the backend once at startup.
    dispatch(&mut state, Msg::HealthRequested, &runner);

    while let Ok(event) = rx.recv() {
        match event {
            ShellEvent::Core(msg) => dispatch(&mut state, msg, &runner),
            ShellEvent::Command(command) => {
                if !handle_command(&mut state, command, &runner) {
                    break;
                }
            }
        }
        refresh(&mut state, &mut printed, &mut last_status, &mut last_busy);
    }

    client_info!("session ended");
    Ok(())
}

fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.run(effects);
}

/// Returns false when the session should end.
fn handle_command(state: &mut AppState, command: ShellCommand, runner: &EffectRunner) -> bool {
    match command {
        ShellCommand::Quit => return false,
        ShellCommand::Empty => {}
        ShellCommand::Help => render::print_help(),
        ShellCommand::Health => dispatch(state, Msg::HealthRequested, runner),
        ShellCommand::ChangeFile => dispatch(state, Msg::ChangeFileClicked, runner),
        ShellCommand::Reasoning(index) => {
            dispatch(state, Msg::ReasoningToggled { index }, runner);
            render::print_reasoning(&state.view(), index);
        }
        ShellCommand::Upload(path) => match commands::candidate_from_path(&path) {
            Ok(candidate) => dispatch(state, Msg::FileChosen(Some(candidate)), runner),
            Err(err) => render::print_notice(&format!("Cannot read {path}: {err}")),
        },
        ShellCommand::Say(text) => {
            if state.chat_enabled() {
                dispatch(state, Msg::InputChanged(text), runner);
                dispatch(state, Msg::QuerySubmitted, runner);
            } else {
                render::print_notice("Upload a PDF first: /upload <path>");
            }
        }
    }
    true
}

fn refresh(
    state: &mut AppState,
    printed: &mut usize,
    last_status: &mut String,
    last_busy: &mut bool,
) {
    if !state.consume_dirty() {
        return;
    }
    let view = state.view();
    *printed = render::print_new_messages(&view, *printed);

    let status = render::status_line(&view);
    if status != *last_status {
        *last_status = status;
        render::print_status(&view);
    }

    if view.chat.busy != *last_busy {
        *last_busy = view.chat.busy;
        if view.chat.busy {
            render::print_notice("assistant is thinking...");
        }
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = commands::parse_line(&line);
            let quit = command == ShellCommand::Quit;
            if tx.send(ShellEvent::Command(command)).is_err() || quit {
                return;
            }
        }
        // EOF ends the session like an explicit /quit.
        let _ = tx.send(ShellEvent::Command(ShellCommand::Quit));
    });
}
