//! Interactive movie browser TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. The event loop multiplexes
//! terminal input, fetch completions and a tick for toast expiry.

/// Host environment (history, viewport, listeners).
pub mod host;
mod input;
/// Transient notifications.
pub mod notify;
/// Page selector.
pub mod pagination;
/// Keyed query cache.
pub mod query;
/// Search field.
pub mod search_bar;
/// Browser state and actions.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use moviescout_api::tmdb::TmdbApi;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use self::notify::ToastQueue;
use self::state::{Action, BrowserState, Effect, GridLayout};
use crate::config::AppConfig;
use crate::i18n::Localization;

/// How often expired toasts are swept.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the browser until the user quits or navigates back past the start.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<C>(
    client: Arc<C>,
    config: &AppConfig,
    localization: Localization,
) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    let toasts = ToastQueue::new(Duration::from_secs(config.notifications.toast_secs));
    let mut state = BrowserState::new(config, localization, toasts);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &client).await;
    state.teardown();

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result
}

/// Main event loop.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState<ToastQueue>,
    client: &Arc<C>,
) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    let (tx, mut rx) = unbounded_channel::<Action>();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_INTERVAL);

    if run_effects(state.mount(Instant::now()), client, &tx) {
        return Ok(());
    }

    loop {
        let mut layout = GridLayout::default();
        terminal
            .draw(|frame| layout = ui::draw(frame, state))
            .context("failed to draw TUI")?;
        state.set_grid_layout(layout);

        let effects = tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => input::handle_key(state, key, Instant::now()),
                Some(Ok(Event::Mouse(mouse))) => input::handle_mouse(state, mouse, Instant::now()),
                Some(Ok(_)) => Vec::new(),
                Some(Err(e)) => return Err(e).context("failed to read event"),
                None => return Ok(()),
            },
            Some(action) = rx.recv() => state.dispatch(action, Instant::now()),
            _ = tick.tick() => {
                state.notifier_mut().prune(Instant::now());
                Vec::new()
            }
        };

        if run_effects(effects, client, &tx) {
            return Ok(());
        }
    }
}

/// Executes effects. Returns `true` when the browser should exit.
fn run_effects<C>(effects: Vec<Effect>, client: &Arc<C>, tx: &UnboundedSender<Action>) -> bool
where
    C: TmdbApi + Send + Sync + 'static,
{
    for effect in effects {
        match effect {
            Effect::Exit => return true,
            Effect::FetchPage(key) => {
                let client = Arc::clone(client);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let params = key.params();
                    let result = client
                        .movies(key.endpoint, &params)
                        .await
                        .map_err(|e| format!("{e:#}"));
                    if tx.send(Action::PageLoaded { key, result }).is_err() {
                        tracing::debug!("browser closed before page fetch completed");
                    }
                });
            }
            Effect::FetchDetails(key) => {
                let client = Arc::clone(client);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = client
                        .movie_details(key.movie_id, key.language.tag())
                        .await
                        .map_err(|e| format!("{e:#}"));
                    if tx.send(Action::DetailsLoaded { key, result }).is_err() {
                        tracing::debug!("browser closed before details fetch completed");
                    }
                });
            }
        }
    }
    false
}
