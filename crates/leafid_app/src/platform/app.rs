use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use leafid_core::{update, AppState, AppViewModel, Msg, Panel, PanelView};
use leafid_logging::{leaf_debug, leaf_info, leaf_warn};

use super::config::{self, AppConfig, DEFAULT_CONFIG_FILE};
use super::effects::{build_classifier, EffectRunner};
use super::logging;
use super::ui::{self, input::Command};

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    Msg(Msg),
    Help,
    Quit,
    InputError(String),
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let loaded = config::load(&config_path)?;
    let config = loaded.clone().unwrap_or_default();

    logging::initialize(config.log_destination);
    match loaded {
        Some(_) => leaf_info!("Loaded config from {}", config_path.display()),
        None => leaf_info!("No config at {}; using defaults", config_path.display()),
    }

    let (tx, rx) = mpsc::channel::<LoopEvent>();
    let classifier = build_classifier(&config)?;
    let effects = EffectRunner::new(classifier, tx.clone())?;

    spawn_stdin_reader(tx.clone());
    spawn_ticker(tx, config.tick_interval());

    let mut app = App::new(&config, effects);
    app.run(rx);
    leaf_info!("Shutting down");
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => match ui::input::parse(&line) {
                    Ok(Some(Command::Msg(msg))) => LoopEvent::Msg(msg),
                    Ok(Some(Command::Help)) => LoopEvent::Help,
                    Ok(Some(Command::Quit)) => LoopEvent::Quit,
                    Ok(None) => continue,
                    Err(err) => LoopEvent::InputError(format!("{err:#}")),
                },
                Err(err) => {
                    leaf_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(LoopEvent::Quit);
    });
}

fn spawn_ticker(tx: mpsc::Sender<LoopEvent>, interval: Duration) {
    thread::spawn(move || {
        while tx.send(LoopEvent::Msg(Msg::Tick)).is_ok() {
            thread::sleep(interval);
        }
    });
}

struct App {
    state: AppState,
    effects: EffectRunner,
    screen: Screen,
}

impl App {
    fn new(config: &AppConfig, effects: EffectRunner) -> Self {
        Self {
            state: AppState::with_info_source(config.info_source())
                .with_demo_notice(config.demo_notice_enabled()),
            effects,
            screen: Screen::default(),
        }
    }

    fn run(&mut self, rx: mpsc::Receiver<LoopEvent>) {
        println!("{}", ui::constants::TITLE);
        let initial = self.state.view();
        self.screen.draw(&initial);
        self.screen.prompt();

        while let Ok(event) = rx.recv() {
            match event {
                LoopEvent::Msg(msg) => self.dispatch(msg),
                LoopEvent::Help => {
                    self.screen.finish_caption();
                    for line in ui::constants::HELP_LINES {
                        println!("  {line}");
                    }
                    self.screen.prompt();
                }
                LoopEvent::InputError(text) => {
                    self.screen.finish_caption();
                    println!("{text}");
                    self.screen.prompt();
                }
                LoopEvent::Quit => break,
            }
        }
        self.screen.finish_caption();
    }

    fn dispatch(&mut self, msg: Msg) {
        if !matches!(msg, Msg::Tick) {
            leaf_debug!("dispatch {:?}", MsgLabel(&msg));
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.effects.enqueue(effects);
        if !was_dirty {
            return;
        }
        self.screen.draw(&view);
        if view.notice.is_some() {
            // Printed notices need no dismissal; clear without redrawing.
            let state = std::mem::take(&mut self.state);
            let (mut state, _) = update(state, Msg::NoticeAcknowledged);
            state.consume_dirty();
            self.state = state;
        }
        self.screen.prompt();
    }
}

/// Short log label that keeps file contents out of the log.
struct MsgLabel<'a>(&'a Msg);

impl std::fmt::Debug for MsgLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Msg::FileChosen { source, file } => {
                write!(f, "FileChosen({source:?}, {}, {} bytes)", file.name, file.size)
            }
            Msg::PreviewDecoded { seq, result } => {
                write!(f, "PreviewDecoded(seq={seq}, ok={})", result.is_ok())
            }
            other => write!(f, "{other:?}"),
        }
    }
}

/// Line-oriented output. Loading captions redraw in place.
#[derive(Default)]
struct Screen {
    last_panel: Option<Panel>,
    caption_open: bool,
}

impl Screen {
    fn draw(&mut self, view: &AppViewModel) {
        let panel = view.panel.panel();
        if let PanelView::Loading { caption } = &view.panel {
            if self.last_panel == Some(Panel::Loading) && view.modal.is_none() && view.notice.is_none()
            {
                print!("\r{caption:<24}");
                let _ = io::stdout().flush();
                self.caption_open = true;
                return;
            }
        }
        self.finish_caption();
        for line in ui::render::render(view) {
            println!("{line}");
        }
        self.last_panel = Some(panel);
    }

    fn prompt(&mut self) {
        if self.last_panel == Some(Panel::Loading) {
            return;
        }
        print!("{}", ui::constants::PROMPT);
        let _ = io::stdout().flush();
    }

    fn finish_caption(&mut self) {
        if self.caption_open {
            println!();
            self.caption_open = false;
        }
    }
}
