//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, fetch results from background tasks and a
//! periodic tick.

use crate::app::{App, AppEvent};
use crate::feed::{FeedClient, FeedRequestConfig, FeedService};
use anyhow::Result;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::input::handle_input;
use super::render::render;

/// Result of handling a key press event.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Start a new fetch in the background.
    Refresh,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the list screen until the user quits.
///
/// The first fetch starts immediately. Fetches run on spawned tasks and
/// report back through an `mpsc` channel, so input and rendering never wait
/// on the network.
///
/// Installs a panic hook that restores terminal state before unwinding.
pub async fn run<C>(
    app: &mut App,
    service: Arc<FeedService<C>>,
    request: Arc<FeedRequestConfig>,
) -> Result<()>
where
    C: FeedClient + Send + Sync + 'static,
{
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(4);
    spawn_fetch(app, &service, &request, &event_tx);

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.needs_redraw = true;
                        match handle_input(app, key.code, key.modifiers) {
                            Action::Quit => break,
                            Action::Refresh => spawn_fetch(app, &service, &request, &event_tx),
                            Action::Continue => {}
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => app.needs_redraw = true,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event stream error");
                    }
                    None => break,
                    _ => {}
                }
            }

            Some(event) = event_rx.recv() => {
                match event {
                    AppEvent::ArticlesLoaded(result) => app.apply_fetch_result(result),
                }
            }

            _ = tick_interval.tick() => {
                if app.clear_expired_status() {
                    app.needs_redraw = true;
                }
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Start one fetch on a background task.
fn spawn_fetch<C>(
    app: &mut App,
    service: &Arc<FeedService<C>>,
    request: &Arc<FeedRequestConfig>,
    event_tx: &mpsc::Sender<AppEvent>,
) where
    C: FeedClient + Send + Sync + 'static,
{
    app.loading = true;
    app.needs_redraw = true;

    let service = Arc::clone(service);
    let request = Arc::clone(request);
    let tx = event_tx.clone();

    tokio::spawn(async move {
        let result = service.fetch_articles(&request).await;
        if let Err(e) = tx.send(AppEvent::ArticlesLoaded(result)).await {
            tracing::warn!(error = %e, "Failed to deliver fetch result (receiver dropped)");
        }
    });
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
