//! Browser state: the coordinator that turns user actions and fetch
//! completions into new state plus the effects the event loop must run.
//!
//! Nothing here performs I/O. Fetches are requested through [`Effect`]s and
//! their results come back as [`Action::PageLoaded`] / [`Action::DetailsLoaded`].

use std::time::Instant;

use moviescout_api::tmdb::{
    CatalogEndpoint, MAX_PAGE, MovieDetails, MoviePage, MovieQueryParams, MovieSummary,
    TMDB_WEB_BASE_URL,
};

use super::host::{Host, HostEvent, HistoryEntry, Listener};
use super::notify::{NoticeKind, Notifier};
use super::pagination::Paginator;
use super::query::{Query, QueryPolicy};
use super::search_bar::SearchBar;
use crate::config::AppConfig;
use crate::i18n::{Language, Localization, TranslationKey};

/// What the result grid is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseMode {
    /// Nothing requested yet.
    Idle,
    /// Daily trending feed.
    Trending,
    /// Keyword search.
    Searching {
        /// Submitted (trimmed) query text.
        query: String,
    },
}

/// Cache key of a result page request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    /// Catalog endpoint.
    pub endpoint: CatalogEndpoint,
    /// Query text (empty for trending).
    pub query: String,
    /// One-based page.
    pub page: u32,
    /// Response language.
    pub language: Language,
    /// Adult content flag.
    pub include_adult: bool,
}

impl PageKey {
    /// Request parameters for this key.
    #[must_use]
    pub fn params(&self) -> MovieQueryParams {
        MovieQueryParams::new(self.query.as_str())
            .language(self.language.tag())
            .page(self.page)
            .include_adult(self.include_adult)
    }
}

/// Cache key of a detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailKey {
    /// TMDB movie ID (always > 0).
    pub movie_id: u64,
    /// Response language.
    pub language: Language,
}

/// Grid cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// One card left.
    Left,
    /// One card right.
    Right,
    /// One row up.
    Up,
    /// One row down.
    Down,
}

/// Input to [`BrowserState::dispatch`].
#[derive(Debug, Clone)]
pub enum Action {
    /// Search form submitted.
    SubmitSearch(String),
    /// Trending button pressed.
    SelectTrending,
    /// Page selector picked a zero-based page index.
    PageChange(usize),
    /// A result card was activated.
    ItemClicked(u64),
    /// Modal close button.
    CloseModal,
    /// Viewport now at this position.
    Scrolled(u16),
    /// Scroll-to-top badge activated.
    ScrollToTop,
    /// Platform back gesture.
    NavigateBack,
    /// Language chosen.
    SetLanguage(Language),
    /// Grid cursor moved.
    MoveCursor(CursorMove),
    /// Viewport scrolled by a number of lines (negative is up).
    ScrollBy(i32),
    /// Result page request finished.
    PageLoaded {
        /// Key the request was made for.
        key: PageKey,
        /// Page or error message.
        result: Result<MoviePage, String>,
    },
    /// Detail request finished.
    DetailsLoaded {
        /// Key the request was made for.
        key: DetailKey,
        /// Details or error message.
        result: Result<MovieDetails, String>,
    },
}

/// Work for the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a result page.
    FetchPage(PageKey),
    /// Fetch movie details.
    FetchDetails(DetailKey),
    /// Leave the application.
    Exit,
}

/// Result grid geometry reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Cards per row.
    pub columns: u16,
    /// Height of one card row in lines.
    pub card_height: u16,
    /// Height of the visible grid area in lines.
    pub view_height: u16,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 1,
            card_height: 1,
            view_height: 0,
        }
    }
}

/// Complete browser session state.
#[derive(Debug)]
pub struct BrowserState<N> {
    mode: BrowseMode,
    page: u32,
    selected_id: u64,
    modal_open: bool,
    scroll_up: bool,
    include_adult: bool,
    localization: Localization,
    results: Query<PageKey, MoviePage>,
    details: Query<DetailKey, MovieDetails>,
    host: Host,
    scroll_listener: Option<Listener>,
    pop_listener: Option<Listener>,
    notifier: N,
    search_bar: SearchBar,
    cursor: usize,
    grid: GridLayout,
}

impl<N: Notifier> BrowserState<N> {
    /// Creates the session state from configuration.
    #[must_use]
    pub fn new(config: &AppConfig, localization: Localization, notifier: N) -> Self {
        let stale_after = config.cache.stale_after();
        let capacity = config.cache.capacity;
        let mode = if config.browse.start_with_trending {
            BrowseMode::Trending
        } else {
            BrowseMode::Idle
        };

        Self {
            mode,
            page: 1,
            selected_id: 0,
            modal_open: false,
            scroll_up: false,
            include_adult: config.browse.include_adult,
            localization,
            results: Query::new(QueryPolicy {
                stale_after,
                capacity,
                keep_previous: true,
            }),
            details: Query::new(QueryPolicy {
                stale_after,
                capacity,
                keep_previous: false,
            }),
            host: Host::new(config.browse.scroll_threshold),
            scroll_listener: None,
            pop_listener: None,
            notifier,
            search_bar: SearchBar::default(),
            cursor: 0,
            grid: GridLayout::default(),
        }
    }

    /// Registers the scroll listener and issues the initial fetches.
    pub fn mount(&mut self, now: Instant) -> Vec<Effect> {
        if self.scroll_listener.is_none() {
            self.scroll_listener = Some(self.host.events.add_listener(HostEvent::Scroll));
        }
        self.sync_queries(now)
    }

    /// Deregisters every listener.
    pub fn teardown(&mut self) {
        if let Some(listener) = self.scroll_listener.take() {
            self.host.events.remove_listener(listener);
        }
        if let Some(listener) = self.pop_listener.take() {
            self.host.events.remove_listener(listener);
        }
    }

    /// Applies `action` and returns the effects to execute.
    pub fn dispatch(&mut self, action: Action, now: Instant) -> Vec<Effect> {
        match action {
            Action::SubmitSearch(query) => self.submit_search(&query, now),
            Action::SelectTrending => {
                self.mode = BrowseMode::Trending;
                self.page = 1;
                self.reset_cursor();
                self.sync_with_retry(now)
            }
            Action::PageChange(index) => {
                let page = u32::try_from(index.saturating_add(1)).unwrap_or(MAX_PAGE);
                self.page = page.min(MAX_PAGE);
                self.reset_cursor();
                self.sync_queries(now)
            }
            Action::ItemClicked(movie_id) => self.open_item(movie_id, now),
            Action::CloseModal => {
                self.close_modal();
                Vec::new()
            }
            Action::Scrolled(position) => {
                self.scroll_to(position);
                Vec::new()
            }
            Action::ScrollToTop => {
                self.host.viewport.scroll_to(0);
                self.scroll_up = false;
                Vec::new()
            }
            Action::NavigateBack => self.navigate_back(now),
            Action::SetLanguage(language) => {
                if self.localization.set_language(language) {
                    tracing::info!(language = %language, "language changed");
                }
                self.sync_queries(now)
            }
            Action::MoveCursor(direction) => {
                self.move_cursor(direction);
                Vec::new()
            }
            Action::ScrollBy(delta) => {
                let position = self.host.viewport.offset_by(delta);
                self.scroll_to(position);
                Vec::new()
            }
            Action::PageLoaded { key, result } => {
                self.page_loaded(key, result, now);
                Vec::new()
            }
            Action::DetailsLoaded { key, result } => {
                if let Err(message) = &result {
                    tracing::warn!(movie_id = key.movie_id, error = %message, "details request failed");
                }
                self.details.resolve(key, result, now);
                Vec::new()
            }
        }
    }

    fn submit_search(&mut self, query: &str, now: Instant) -> Vec<Effect> {
        let query = query.trim();
        if query.is_empty() {
            let message = self.localization.t(NoticeKind::NoRequest.message_key());
            self.notifier.notify(NoticeKind::NoRequest, message);
            return Vec::new();
        }
        self.mode = BrowseMode::Searching {
            query: String::from(query),
        };
        self.page = 1;
        self.reset_cursor();
        self.sync_with_retry(now)
    }

    fn open_item(&mut self, movie_id: u64, now: Instant) -> Vec<Effect> {
        if movie_id == 0 {
            return Vec::new();
        }
        self.selected_id = movie_id;
        if !self.modal_open {
            self.modal_open = true;
            self.host.history.push_state(HistoryEntry::Modal { movie_id });
            self.pop_listener = Some(self.host.events.add_listener(HostEvent::PopState));
        }
        let mut effects = self.sync_queries(now);
        if effects.is_empty()
            && let Some(key) = self.details.retry_failed()
        {
            effects.push(Effect::FetchDetails(key));
        }
        effects
    }

    /// Explicit close: listener goes first, then the synthetic entry is
    /// popped if it is still current. The selection is kept.
    fn close_modal(&mut self) {
        if !self.modal_open {
            return;
        }
        if let Some(listener) = self.pop_listener.take() {
            self.host.events.remove_listener(listener);
        }
        self.modal_open = false;
        if self.host.history.current().is_modal() {
            let _ = self.host.history.back();
        }
    }

    fn navigate_back(&mut self, now: Instant) -> Vec<Effect> {
        let Some(pop) = self.host.history.back() else {
            tracing::info!("back gesture at first history entry, leaving");
            return vec![Effect::Exit];
        };
        tracing::debug!(state = ?pop.state, "pop state");

        let listening = self
            .pop_listener
            .as_ref()
            .is_some_and(|l| self.host.events.is_listening(l));
        if !listening {
            return Vec::new();
        }

        // The traversal already removed the synthetic entry; no further
        // back step is issued.
        self.modal_open = false;
        self.selected_id = 0;
        if let Some(listener) = self.pop_listener.take() {
            self.host.events.remove_listener(listener);
        }
        self.sync_queries(now)
    }

    fn page_loaded(&mut self, key: PageKey, result: Result<MoviePage, String>, now: Instant) {
        match &result {
            Ok(page) if page.is_empty() => {
                tracing::info!(endpoint = ?key.endpoint, page = key.page, "no results");
                let message = self.localization.t(NoticeKind::BadRequest.message_key());
                self.notifier.notify(NoticeKind::BadRequest, message);
            }
            Ok(page) => {
                tracing::debug!(
                    endpoint = ?key.endpoint,
                    page = key.page,
                    results = page.results.len(),
                    "page loaded"
                );
            }
            Err(message) => {
                tracing::warn!(endpoint = ?key.endpoint, page = key.page, error = %message, "page request failed");
            }
        }
        if self.results.resolve(key, result, now) {
            let len = self.movies().len();
            self.cursor = self.cursor.min(len.saturating_sub(1));
            self.apply_grid_bounds();
        }
    }

    // --- Derived queries ---

    fn page_key(&self) -> Option<PageKey> {
        let (endpoint, query) = match &self.mode {
            BrowseMode::Idle => return None,
            BrowseMode::Trending => (CatalogEndpoint::Trending, String::new()),
            BrowseMode::Searching { query } => (CatalogEndpoint::Search, query.clone()),
        };
        Some(PageKey {
            endpoint,
            query,
            page: self.page,
            language: self.localization.language(),
            include_adult: self.include_adult,
        })
    }

    fn detail_key(&self) -> Option<DetailKey> {
        (self.selected_id > 0).then(|| DetailKey {
            movie_id: self.selected_id,
            language: self.localization.language(),
        })
    }

    fn sync_queries(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(key) = self.results.set_key(self.page_key(), now) {
            effects.push(Effect::FetchPage(key));
        }
        if let Some(key) = self.details.set_key(self.detail_key(), now) {
            effects.push(Effect::FetchDetails(key));
        }
        effects
    }

    /// Like `sync_queries`, but also re-requests a failed result page whose
    /// key did not change.
    fn sync_with_retry(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = self.sync_queries(now);
        let page_requested = effects.iter().any(|e| matches!(e, Effect::FetchPage(_)));
        if !page_requested && let Some(key) = self.results.retry_failed() {
            effects.push(Effect::FetchPage(key));
        }
        effects
    }

    // --- Scrolling and cursor ---

    fn scroll_to(&mut self, position: u16) {
        self.host.viewport.scroll_to(position);
        let listening = self
            .scroll_listener
            .as_ref()
            .is_some_and(|l| self.host.events.is_listening(l));
        if listening {
            self.scroll_up = self.host.viewport.is_past_threshold(position);
        }
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.scroll_to(0);
    }

    fn move_cursor(&mut self, direction: CursorMove) {
        let len = self.movies().len();
        if len == 0 {
            return;
        }
        let columns = usize::from(self.grid.columns.max(1));
        let last = len.saturating_sub(1);
        self.cursor = match direction {
            CursorMove::Left => self.cursor.saturating_sub(1),
            CursorMove::Right => self.cursor.saturating_add(1).min(last),
            CursorMove::Up => self.cursor.checked_sub(columns).unwrap_or(self.cursor),
            CursorMove::Down => match self.cursor.checked_add(columns) {
                Some(next) if next <= last => next,
                _ => self.cursor,
            },
        };
        self.reveal_cursor();
    }

    /// Scrolls so the cursor's card row is fully visible.
    fn reveal_cursor(&mut self) {
        let columns = usize::from(self.grid.columns.max(1));
        let row = u16::try_from(self.cursor.checked_div(columns).unwrap_or(0)).unwrap_or(u16::MAX);
        let top = row.saturating_mul(self.grid.card_height);
        let bottom = top.saturating_add(self.grid.card_height);
        let position = self.host.viewport.position();
        let view_bottom = position.saturating_add(self.grid.view_height);

        if top < position {
            self.scroll_to(top);
        } else if bottom > view_bottom {
            let target = bottom.saturating_sub(self.grid.view_height);
            self.scroll_to(self.host.viewport.clamp(target));
        }
    }

    /// Records the renderer's grid geometry and re-clamps the viewport.
    pub fn set_grid_layout(&mut self, layout: GridLayout) {
        self.grid = layout;
        self.apply_grid_bounds();
    }

    fn apply_grid_bounds(&mut self) {
        let columns = usize::from(self.grid.columns.max(1));
        let rows = self.movies().len().div_ceil(columns);
        let content = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_mul(self.grid.card_height);
        let max_position = content.saturating_sub(self.grid.view_height);
        self.host.viewport.set_max_position(max_position);
        let position = self.host.viewport.position();
        if position > max_position {
            self.scroll_to(max_position);
        }
    }

    // --- Read accessors ---

    /// Browse mode.
    #[must_use]
    pub const fn mode(&self) -> &BrowseMode {
        &self.mode
    }

    /// One-based current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Selected movie (0 = none).
    #[must_use]
    pub const fn selected_id(&self) -> u64 {
        self.selected_id
    }

    /// Whether the detail modal is open.
    #[must_use]
    pub const fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Whether the scroll-to-top badge is shown.
    #[must_use]
    pub const fn is_scroll_up(&self) -> bool {
        self.scroll_up
    }

    /// Active localization.
    #[must_use]
    pub const fn localization(&self) -> &Localization {
        &self.localization
    }

    /// Shorthand for the active dictionary lookup.
    #[must_use]
    pub fn t(&self, key: TranslationKey) -> &str {
        self.localization.t(key)
    }

    /// Movies on the rendered page.
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        self.results.data().map_or(&[], |p| p.results.as_slice())
    }

    /// Details of the selected movie, once loaded.
    #[must_use]
    pub fn details(&self) -> Option<&MovieDetails> {
        self.details.data()
    }

    /// Whether the rendered page belongs to superseded parameters.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.results.is_placeholder()
    }

    /// Either query is loading with nothing to show.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.results.is_loading() || self.details.is_loading()
    }

    /// Either query failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.results.is_error() || self.details.is_error()
    }

    /// First failure message, for the log panel.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.results
            .error_message()
            .or_else(|| self.details.error_message())
    }

    /// Page selector for the rendered page, if it has more than one page.
    #[must_use]
    pub fn paginator(&self) -> Option<Paginator> {
        let total = self.results.data().map_or(0, MoviePage::page_count);
        Paginator::new(total, self.page)
    }

    /// Host environment.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Notification sink.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable notification sink (for expiry).
    pub const fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Search field.
    #[must_use]
    pub const fn search_bar(&self) -> &SearchBar {
        &self.search_bar
    }

    /// Mutable search field.
    pub const fn search_bar_mut(&mut self) -> &mut SearchBar {
        &mut self.search_bar
    }

    /// Last grid geometry reported by the renderer.
    #[must_use]
    pub const fn grid(&self) -> GridLayout {
        self.grid
    }

    /// Grid cursor index.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Movie under the grid cursor.
    #[must_use]
    pub fn cursor_movie_id(&self) -> Option<u64> {
        self.movies().get(self.cursor).map(|m| m.id)
    }

    /// TMDB web page of the open modal's movie, or of the cursor's movie.
    #[must_use]
    pub fn tmdb_page_url(&self) -> Option<String> {
        let movie_id = if self.modal_open {
            Some(self.selected_id).filter(|id| *id > 0)
        } else {
            self.cursor_movie_id()
        }?;
        Some(format!("{TMDB_WEB_BASE_URL}/movie/{movie_id}"))
    }
}
