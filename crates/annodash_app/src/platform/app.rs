use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use annodash_core::{update, AppState, DashboardSettings, Msg};
use annodash_logging::{dash_debug, dash_info, dash_warn};
use anyhow::Context;
use chrono::Local;

use super::cli::Args;
use super::config::{AppConfig, ConfigOrigin};
use super::effects::{EffectExecutor, EffectRunner};
use super::logging;
use super::ui;
use super::ui::input::InputCommand;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the dispatcher loop reacts to, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Input(String),
    InputClosed,
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let (config, origin) = AppConfig::load(args.config.as_deref())?;
    let settings = config.apply_args(&args).resolve()?;
    logging::initialize(
        settings.log_destination,
        settings.log_level,
        &settings.log_file,
    );
    match origin {
        ConfigOrigin::Defaults => dash_info!("No config file given; using defaults"),
        ConfigOrigin::Missing(path) => dash_info!("No config at {:?}; using defaults", path),
        ConfigOrigin::File(path) => dash_info!("Loaded config from {:?}", path),
    }
    dash_info!("Starting annodash with {:?}", settings.dashboard);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(settings.client.clone(), event_tx.clone())
        .context("failed to start the request engine")?;

    spawn_input_reader(event_tx.clone());
    spawn_ticker(event_tx.clone());
    let _ = event_tx.send(AppEvent::Msg(Msg::Started));
    drop(event_tx);

    let mut dashboard = Dashboard::new(settings.dashboard, &runner, io::stdout().lock());
    dashboard.show_help()?;
    for event in event_rx {
        let keep_going = match event {
            AppEvent::Msg(msg) => {
                dashboard.dispatch(msg)?;
                true
            }
            AppEvent::Input(line) => dashboard.handle_input(&line)?,
            AppEvent::InputClosed => false,
        };
        if !keep_going {
            break;
        }
    }

    dash_info!("Shutting down");
    runner.shutdown();
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_lines(stdin.lock(), &tx);
        let _ = tx.send(AppEvent::InputClosed);
    });
}

/// Forwards lines until EOF; invalid UTF-8 is replaced, not fatal.
fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::Sender<AppEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.send(AppEvent::Input(line)).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
                dash_warn!("Reading stdin failed: {}", err);
                return;
            }
        }
    }
}

// Background tick to drive banner timing.
fn spawn_ticker(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let mut last = Instant::now();
        loop {
            thread::sleep(TICK_INTERVAL);
            let now = Instant::now();
            let elapsed = now.duration_since(last);
            last = now;
            if tx.send(AppEvent::Msg(Msg::Tick { elapsed })).is_err() {
                return;
            }
        }
    });
}

/// Owns the state and applies messages one at a time.
pub struct Dashboard<'a, E: EffectExecutor, W: Write> {
    settings: DashboardSettings,
    state: AppState,
    executor: &'a E,
    out: W,
    refreshed_at: Option<String>,
}

impl<'a, E: EffectExecutor, W: Write> Dashboard<'a, E, W> {
    pub fn new(settings: DashboardSettings, executor: &'a E, out: W) -> Self {
        Self {
            settings,
            state: AppState::with_settings(settings),
            executor,
            out,
            refreshed_at: None,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        self.apply(msg).map(|_| ())
    }

    /// Returns whether the screen was redrawn.
    fn apply(&mut self, msg: Msg) -> io::Result<bool> {
        let applied_load = match &msg {
            Msg::TasksLoaded {
                generation,
                result: Ok(_),
            } => Some(*generation),
            _ => None,
        };

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if applied_load.is_some_and(|generation| state.view().tasks.generation == generation) {
            self.refreshed_at = Some(Local::now().format("%H:%M:%S").to_string());
        }
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.executor.run(effects);
        if was_dirty {
            self.render()?;
        }
        Ok(was_dirty)
    }

    /// Returns false when the user asked to quit.
    pub fn handle_input(&mut self, line: &str) -> io::Result<bool> {
        let view = self.state.view();
        match ui::input::parse_command(line, &view) {
            None => self.prompt()?,
            Some(InputCommand::Dispatch(msgs)) => {
                let mut redrawn = false;
                for msg in msgs {
                    redrawn |= self.apply(msg)?;
                }
                if !redrawn {
                    self.prompt()?;
                }
            }
            Some(InputCommand::Help) => self.show_help()?,
            Some(InputCommand::Quit) => return Ok(false),
            Some(InputCommand::Rejected(reason)) => {
                dash_debug!("Rejected input {:?}: {}", line, reason);
                writeln!(self.out, "{reason}")?;
                self.prompt()?;
            }
        }
        Ok(true)
    }

    pub fn show_help(&mut self) -> io::Result<()> {
        for line in ui::layout::help_lines(&self.settings) {
            writeln!(self.out, "{line}")?;
        }
        self.prompt()
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        writeln!(self.out)?;
        for line in ui::render::render(&view, self.refreshed_at.as_deref()) {
            writeln!(self.out, "{line}")?;
        }
        self.prompt()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}", ui::constants::PROMPT)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use annodash_core::{Effect, TaskStatus, UploadTask};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingExecutor {
        effects: RefCell<Vec<Effect>>,
    }

    impl EffectExecutor for RecordingExecutor {
        fn run(&self, effects: Vec<Effect>) {
            self.effects.borrow_mut().extend(effects);
        }
    }

    impl RecordingExecutor {
        fn take(&self) -> Vec<Effect> {
            self.effects.borrow_mut().drain(..).collect()
        }
    }

    fn task(id: &str, status: &str) -> UploadTask {
        UploadTask {
            id: id.to_string(),
            project: "NER".to_string(),
            date: "2021-05-16 12:00:00".to_string(),
            submitted_by: "ana".to_string(),
            description: "d".to_string(),
            task_id: "---".to_string(),
            upload_name: "NER_ana".to_string(),
            status: TaskStatus::from_label(status),
        }
    }

    #[test]
    fn update_command_round_trip_reloads_once() {
        let executor = RecordingExecutor::default();
        let mut out = Vec::new();
        let mut dashboard = Dashboard::new(DashboardSettings::default(), &executor, &mut out);

        dashboard.dispatch(Msg::Started).unwrap();
        assert_eq!(executor.take(), vec![Effect::LoadTasks { generation: 1 }]);
        dashboard
            .dispatch(Msg::TasksLoaded {
                generation: 1,
                result: Ok(vec![task("a", "FINISHED"), task("b", "RUNNING")]),
            })
            .unwrap();
        assert!(dashboard.refreshed_at.is_some());

        assert!(dashboard.handle_input("update 1").unwrap());
        assert_eq!(
            executor.take(),
            vec![Effect::UpdateStatus {
                id: "b".to_string()
            }]
        );

        dashboard
            .dispatch(Msg::StatusUpdated {
                id: "b".to_string(),
                result: Ok(None),
            })
            .unwrap();
        assert_eq!(executor.take(), vec![Effect::LoadTasks { generation: 2 }]);
    }

    #[test]
    fn blank_search_sends_nothing_and_quit_stops() {
        let executor = RecordingExecutor::default();
        let mut out = Vec::new();
        let mut dashboard = Dashboard::new(DashboardSettings::default(), &executor, &mut out);

        assert!(dashboard.handle_input("search    ").unwrap());
        assert!(executor.take().is_empty());
        assert!(dashboard.handle_input("search abc").unwrap());
        assert_eq!(
            executor.take(),
            vec![Effect::LookupAbstract {
                generation: 1,
                query: "abc".to_string()
            }]
        );
        assert!(!dashboard.handle_input("quit").unwrap());
    }

    #[test]
    fn rejected_input_is_reported() {
        let executor = RecordingExecutor::default();
        let mut out = Vec::new();
        {
            let mut dashboard =
                Dashboard::new(DashboardSettings::default(), &executor, &mut out);
            dashboard.handle_input("update 3").unwrap();
        }
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("row 3 is not on this page"));
    }

    #[test]
    fn command_that_changes_nothing_still_prompts() {
        let executor = RecordingExecutor::default();
        let mut dashboard = Dashboard::new(DashboardSettings::default(), &executor, Vec::new());

        assert!(dashboard.handle_input("dismiss").unwrap());
        assert!(dashboard.handle_input("next").unwrap());
        assert!(dashboard.handle_input("").unwrap());

        let printed = String::from_utf8(dashboard.out.clone()).unwrap();
        assert_eq!(printed, ui::constants::PROMPT.repeat(3));
        assert!(executor.take().is_empty());
    }

    #[test]
    fn invalid_utf8_line_does_not_close_input() {
        let (tx, rx) = mpsc::channel();
        forward_lines(io::Cursor::new(b"reload\n\xff\xfe\nquit\n".to_vec()), &tx);
        drop(tx);

        let lines: Vec<String> = rx
            .iter()
            .map(|event| match event {
                AppEvent::Input(line) => line,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "reload\n");
        assert!(lines[1].contains('\u{FFFD}'));
        assert_eq!(lines[2], "quit\n");
    }
}
