use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use taskvox::app::App;
use taskvox::event::AppEvent;
use taskvox::notify::NotificationLayer;
use taskvox::pipeline::TranscribePipeline;
use taskvox::{ConfigManager, DEFAULT_LOG_LEVEL, Recorder, SimulatedTranscriber, ui};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// How long to wait for a key before redrawing; keeps the clock display
/// live without burning CPU.
const TICK: Duration = Duration::from_millis(200);

fn main() -> Result<()> {
    // Load config
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    // save back the config to create the file if it doesn't exist
    config_manager.save(&config)?;

    // Initialize the logger. The terminal is owned by the UI, so logs go
    // to a file next to the config.
    let log_path = config_manager.config_path().with_file_name("taskvox.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file at {log_path:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TASKVOX_LOG")
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .finish()
        .with(config.notifications().then(NotificationLayer::new))
        .init();

    // Set up the recording-to-task pipeline. The simulated backend gets
    // its delay from config; a real backend would be constructed here.
    let (event_sender, event_receiver) = channel();
    let transcriber = Arc::new(SimulatedTranscriber::new(config.processing_delay()));
    let pipeline = TranscribePipeline::new(transcriber, event_sender)?;

    let mut app = App::new(Box::new(Recorder::new()), pipeline, &config);
    app.seed_demo_tasks();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("Taskvox ready");
    let result = run_app(&mut terminal, &mut app, &config, &event_receiver);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &taskvox::Config,
    events: &Receiver<AppEvent>,
) -> Result<()> {
    loop {
        // Apply any completions from the pipeline before drawing.
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::render(frame, app, config))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    KeyCode::Char('r') => app.toggle_recording(),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_completed(),
                    KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                    KeyCode::Tab | KeyCode::Right => app.next_filter(),
                    KeyCode::BackTab | KeyCode::Left => app.prev_filter(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
