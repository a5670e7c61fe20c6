use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use client_logging::{client_error, client_info};
use console::{style, Term};
use docx_client_core::{update, AppState, Msg};
use docx_client_engine::probe_service;

use super::config::{self, Cli};
use super::effects::EffectRunner;
use super::input::{self, Binding, Command};
use super::ui;
use super::ui::render::RenderCache;

/// Everything the single dispatch loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A line typed by the user.
    Input(String),
    /// Standard input reached end of file.
    InputClosed,
    /// A message produced by the engine, a timer or the clipboard.
    Msg(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli)?;
    if !config.color {
        console::set_colors_enabled(false);
    }
    client_logging::initialize(config.log_destination, config.log_level, &config.log_file);
    client_info!("Using conversion endpoint {}", config.upload.endpoint);

    if cli.check {
        return check_service(&config);
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(&config, event_tx.clone())?;
    let mut app = App::new(effects);

    app.render();
    if let Some(path) = cli.file.clone() {
        let _ = app.handle_command(Command::Pick(path));
    }
    spawn_input_reader(event_tx);

    let mut input_closed = false;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Input(line) => {
                if app.handle_line(&line) == Flow::Quit {
                    break;
                }
            }
            AppEvent::InputClosed => input_closed = true,
            AppEvent::Msg(msg) => app.dispatch(msg),
        }
        // Scripted input: stay until the last conversion resolves.
        if input_closed && !app.is_busy() {
            break;
        }
    }

    client_info!("Session ended");
    Ok(())
}

fn check_service(config: &config::ClientConfig) -> anyhow::Result<()> {
    match probe_service(config.upload.clone()) {
        Ok(status) => {
            println!("{} service status: {status}", style("✓").green());
            Ok(())
        }
        Err(failure) => {
            client_error!("Health check failed: {failure}");
            anyhow::bail!("conversion service unreachable: {failure}")
        }
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    state: AppState,
    effects: EffectRunner,
    cache: RenderCache,
    term: Term,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
            cache: RenderCache::default(),
            term: Term::stdout(),
        }
    }

    fn is_busy(&self) -> bool {
        self.state.view().busy
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match input::parse_command(line) {
            Ok(Some(command)) => self.handle_command(command),
            Ok(None) => Flow::Continue,
            Err(hint) => {
                self.say(&hint);
                Flow::Continue
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match input::bind(command, &self.state.view()) {
            Binding::Dispatch(msg) => {
                self.dispatch(msg);
                Flow::Continue
            }
            Binding::DispatchWithHint(msg, hint) => {
                self.dispatch(msg);
                self.say(&hint);
                Flow::Continue
            }
            Binding::Rejected(reason) => {
                self.say(&reason);
                Flow::Continue
            }
            Binding::Help => {
                self.say(ui::constants::HELP);
                Flow::Continue
            }
            Binding::Quit => Flow::Quit,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.effects.run(effects, &mut self.cache);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty || self.cache.selection.is_some() {
            self.render();
        }
    }

    fn render(&mut self) {
        if std::mem::take(&mut self.cache.reveal) && self.term.is_term() {
            let _ = self.term.clear_screen();
        }
        let lines = ui::render::render(&self.state.view(), &self.cache);
        self.cache.selection = None;

        let mut out = io::stdout().lock();
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out);
        let _ = out.flush();
    }

    fn say(&self, text: &str) {
        let _ = self.term.write_line(&style(text).dim().to_string());
    }
}
