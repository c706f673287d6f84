use datamind::analyst::AnalystClient;
use datamind::app::{App, AppMessage};
use datamind::ui;

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set up file-based logging so tracing output never corrupts the TUI.
///
/// Logs go to `~/.datamind/datamind.log`; the filter defaults to info for
/// this crate and is overridable via `RUST_LOG`. Logging is skipped
/// entirely when the home directory cannot be determined.
fn init_logging() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let log_dir = home.join(".datamind");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("datamind.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("datamind=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Main event loop: draw, then wait for either a terminal event or an
/// async result from a spawned backend task.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<AppMessage>,
    events: &mut EventStream,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            maybe_message = rx.recv() => {
                let Some(message) = maybe_message else { break };
                let completed_chat = matches!(message, AppMessage::ChatCompleted { .. });
                app.apply(message);
                // The backend creates the session row on first dispatch, so
                // the sidebar may have a new entry to pick up.
                if completed_chat {
                    app.refresh_sessions();
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("datamind {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    init_logging();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(AnalystClient::new(), tx);
    app.load_history();
    app.refresh_sessions();

    let mut events = EventStream::new();
    let result = run(&mut terminal, &mut app, &mut rx, &mut events).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;

    result
}
