//! TUI rendering logic for the movie browser.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use moviescout_api::tmdb::{MovieDetails, MovieSummary};

use super::notify::{Notifier, NoticeKind, ToastQueue};
use super::pagination::PageItem;
use super::state::{BrowserState, GridLayout};
use crate::i18n::TranslationKey;

/// Height of one result card in lines.
const CARD_HEIGHT: u16 = 6;

/// Narrowest card width before the grid drops a column.
const MIN_CARD_WIDTH: u16 = 28;

/// Width of a toast.
const TOAST_WIDTH: u16 = 42;

/// Formats a number with thousands separators (e.g. 160000000 -> "160,000,000").
#[allow(clippy::arithmetic_side_effects)]
fn fmt_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Draws the browser. Returns the grid geometry for scrolling.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState<ToastQueue>) -> GridLayout {
    let paginator_height = u16::from(state.paginator().is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // search bar
            Constraint::Length(paginator_height), // page selector
            Constraint::Min(CARD_HEIGHT),         // result grid
            Constraint::Length(3),                // footer
        ])
        .split(frame.area());

    draw_search_bar(frame, chunks[0], state);
    draw_paginator(frame, chunks[1], state);
    let layout = draw_grid(frame, chunks[2], state);
    draw_footer(frame, chunks[3], state);

    if state.is_modal_open()
        && let Some(details) = state.details()
    {
        draw_modal(frame, state, details);
    }
    if state.is_scroll_up() {
        draw_scroll_up(frame, chunks[2]);
    }
    draw_toasts(frame, state.notifier());

    layout
}

/// Draws the search field, trending toggle and language label.
#[allow(clippy::indexing_slicing)]
fn draw_search_bar<N: Notifier>(frame: &mut Frame, area: Rect, state: &BrowserState<N>) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let bar = state.search_bar();
    let (text, style) = if bar.shows_hint() {
        (
            String::from(state.t(TranslationKey::YupMinQuery)),
            Style::default().fg(Color::DarkGray),
        )
    } else if bar.text().is_empty() {
        (
            String::from(state.t(TranslationKey::SearchBarPlaceholder)),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (String::from(bar.text()), Style::default())
    };
    let border_style = if bar.is_editing() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let title = format!(
        " {} [/]  {} [t] ",
        state.t(TranslationKey::SearchBarButton),
        state.t(TranslationKey::SearchBarTrend)
    );
    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(input, header_chunks[0]);

    let language = state.localization().language();
    let info = Paragraph::new(Line::from(vec![
        Span::raw(format!("{}: ", state.t(TranslationKey::SearchBarLang))),
        Span::styled(
            language.short_label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" [L]"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", state.t(TranslationKey::SearchBarPoweredBy))),
    );
    frame.render_widget(info, header_chunks[1]);
}

/// Draws the page selector line.
fn draw_paginator<N: Notifier>(frame: &mut Frame, area: Rect, state: &BrowserState<N>) {
    let Some(paginator) = state.paginator() else {
        return;
    };
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let prev_style = if paginator.previous().is_some() {
        Style::default()
    } else {
        dim
    };
    spans.push(Span::styled(
        format!("< {} [p] ", state.t(TranslationKey::PagiPrev)),
        prev_style,
    ));
    for item in paginator.items() {
        match item {
            PageItem::Page(index) if index == paginator.active() => {
                spans.push(Span::styled(
                    format!("[{}]", index.saturating_add(1)),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            PageItem::Page(index) => {
                spans.push(Span::raw(format!(" {} ", index.saturating_add(1))));
            }
            PageItem::Break => spans.push(Span::styled(" ... ", dim)),
        }
    }
    let next_style = if paginator.next().is_some() {
        Style::default()
    } else {
        dim
    };
    spans.push(Span::styled(
        format!(" [n] {} >", state.t(TranslationKey::PagiNext)),
        next_style,
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Draws the result grid, or the loader / error text.
#[allow(clippy::arithmetic_side_effects)]
fn draw_grid<N: Notifier>(frame: &mut Frame, area: Rect, state: &BrowserState<N>) -> GridLayout {
    let columns = (area.width / MIN_CARD_WIDTH).max(1);
    let layout = GridLayout {
        columns,
        card_height: CARD_HEIGHT,
        view_height: area.height,
    };

    let mut status: Vec<Line> = Vec::new();
    if state.is_loading() {
        status.push(Line::styled(
            state.t(TranslationKey::LoaderText),
            Style::default().fg(Color::Yellow),
        ));
    }
    if state.is_error() {
        status.push(Line::styled(
            state.t(TranslationKey::ErrorMainText),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let movies = state.movies();
    if movies.is_empty() {
        if !status.is_empty() {
            frame.render_widget(
                Paragraph::new(status)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
        return layout;
    }

    let card_width = area.width / columns;
    let offset = i32::from(state.host().viewport.position());
    let columns_usize = usize::from(columns);
    let dimmed = state.is_placeholder();

    for (index, movie) in movies.iter().enumerate() {
        let row = i32::try_from(index / columns_usize).unwrap_or(i32::MAX);
        let col = u16::try_from(index % columns_usize).unwrap_or(0);
        let top = row
            .saturating_mul(i32::from(CARD_HEIGHT))
            .saturating_sub(offset);
        let bottom = top.saturating_add(i32::from(CARD_HEIGHT));
        if top < 0 || bottom > i32::from(area.height) {
            continue;
        }
        let Ok(top) = u16::try_from(top) else {
            continue;
        };
        let rect = Rect {
            x: area.x.saturating_add(col.saturating_mul(card_width)),
            y: area.y.saturating_add(top),
            width: card_width,
            height: CARD_HEIGHT,
        };
        draw_card(frame, rect, movie, index == state.cursor(), dimmed);
    }

    if !status.is_empty() {
        let line_area = Rect {
            height: 1,
            ..area
        };
        frame.render_widget(Clear, line_area);
        frame.render_widget(
            Paragraph::new(status.into_iter().next().unwrap_or_default())
                .alignment(Alignment::Center),
            line_area,
        );
    }

    layout
}

/// Draws one result card.
fn draw_card(frame: &mut Frame, area: Rect, movie: &MovieSummary, highlighted: bool, dimmed: bool) {
    let border_style = if highlighted {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let year = movie.release_year().unwrap_or("----");
    let lines = vec![
        Line::from(vec![
            Span::styled(year, Style::default().fg(Color::Green)),
            Span::raw(format!("  \u{2605} {:.1}", movie.vote_average)),
        ]),
        Line::from(Span::styled(
            movie.original_title.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("#{}", movie.id),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", movie.title)),
    );
    frame.render_widget(card, area);
}

/// Returns a rect centered in `area` taking the given percentages.
#[allow(clippy::arithmetic_side_effects)]
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x.min(100) / 100;
    let height = area.height * percent_y.min(100) / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draws the detail modal.
fn draw_modal<N: Notifier>(frame: &mut Frame, state: &BrowserState<N>, details: &MovieDetails) {
    let area = centered(frame.area(), 80, 80);
    let label = Style::default().fg(Color::Cyan);

    let field = |key: TranslationKey, value: String| {
        Line::from(vec![
            Span::styled(format!("{}: ", state.t(key)), label),
            Span::raw(value),
        ])
    };
    let join = |entries: &[moviescout_api::tmdb::NamedEntry]| {
        entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let money = |amount: u64, missing: TranslationKey| {
        if amount == 0 {
            String::from(state.t(missing))
        } else {
            format!("${}", fmt_num(amount))
        }
    };

    let mut lines = Vec::new();
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::styled(
            tagline,
            Style::default().add_modifier(Modifier::ITALIC),
        ));
        lines.push(Line::default());
    }
    let overview = details
        .overview
        .as_deref()
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| state.t(TranslationKey::NotDescribed));
    lines.push(Line::raw(overview));
    lines.push(Line::default());
    lines.push(field(TranslationKey::Genres, join(&details.genres)));
    let language = state.localization().language();
    lines.push(field(
        TranslationKey::ReleaseDate,
        details
            .release_date
            .as_deref()
            .map(|d| language.format_date(d))
            .unwrap_or_default(),
    ));
    lines.push(field(
        TranslationKey::OriginalLanguage,
        details.original_language.to_uppercase(),
    ));
    lines.push(field(
        TranslationKey::Budget,
        money(details.budget, TranslationKey::NoBudget),
    ));
    lines.push(field(
        TranslationKey::Revenue,
        money(details.revenue, TranslationKey::NoRevenue),
    ));
    lines.push(field(
        TranslationKey::Rating,
        format!("{:.1} / 10", details.vote_average),
    ));
    lines.push(field(
        TranslationKey::Popularity,
        format!("{:.1}", details.popularity),
    ));
    lines.push(field(
        TranslationKey::Votes,
        fmt_num(u64::from(details.vote_count)),
    ));
    lines.push(field(
        TranslationKey::Production,
        join(&details.production_companies),
    ));

    let title = match details.release_year() {
        Some(year) => format!(" {} ({year}) ", details.title),
        None => format!(" {} ", details.title),
    };
    let modal = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(" x: close  Esc: back  o: open TMDB "),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

/// Draws the scroll-to-top badge in the grid's bottom-right corner.
fn draw_scroll_up(frame: &mut Frame, grid: Rect) {
    let text = " \u{2191} Home ";
    let width = u16::try_from(text.chars().count()).unwrap_or(0);
    let rect = Rect {
        x: grid.right().saturating_sub(width.saturating_add(1)),
        y: grid.bottom().saturating_sub(1),
        width: width.min(grid.width),
        height: 1.min(grid.height),
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Yellow)),
        rect,
    );
}

/// Draws the toast stack in the top-right corner.
fn draw_toasts(frame: &mut Frame, toasts: &ToastQueue) {
    let screen = frame.area();
    let width = TOAST_WIDTH.min(screen.width);
    let mut y = screen.y;
    for toast in toasts.visible() {
        if y.saturating_add(3) > screen.bottom() {
            break;
        }
        let rect = Rect {
            x: screen.right().saturating_sub(width),
            y,
            width,
            height: 3,
        };
        let color = match toast.kind {
            NoticeKind::BadRequest => Color::Red,
            NoticeKind::NoRequest => Color::Yellow,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.message.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            rect,
        );
        y = y.saturating_add(3);
    }
}

/// Draws the footer with key hints.
fn draw_footer<N: Notifier>(frame: &mut Frame, area: Rect, state: &BrowserState<N>) {
    let help_text = if state.search_bar().is_editing() {
        "Type a title | Enter: search | Esc: cancel"
    } else if state.is_modal_open() {
        "x/Enter: close  Esc/Backspace: back  o: open TMDB  q: quit"
    } else {
        "\u{2190}\u{2191}\u{2193}\u{2192}/hjkl: move  Enter: details  /: search  t: trending  n/p: page  L: language  u: top  Esc: back  q: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::{Duration, Instant};

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::browser::state::{Action, Effect};
    use crate::config::AppConfig;
    use crate::i18n::Localization;
    use moviescout_api::tmdb::MoviePage;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn loaded_state() -> BrowserState<ToastQueue> {
        let mut state = BrowserState::new(
            &AppConfig::default(),
            Localization::default(),
            ToastQueue::new(Duration::from_secs(4)),
        );
        let now = Instant::now();
        let effects = state.mount(now);
        let Some(Effect::FetchPage(key)) = effects.into_iter().next() else {
            panic!("expected a page fetch");
        };
        let page: MoviePage =
            serde_json::from_str(include_str!("../../../../fixtures/tmdb/trending_movie_day.json"))
                .unwrap();
        state.dispatch(
            Action::PageLoaded {
                key,
                result: Ok(page),
            },
            now,
        );
        state
    }

    #[test]
    fn test_fmt_num() {
        // Arrange & Act & Assert
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(999), "999");
        assert_eq!(fmt_num(1_000), "1,000");
        assert_eq!(fmt_num(160_000_000), "160,000,000");
    }

    #[test]
    fn test_draw_grid_and_paginator() {
        // Arrange
        let state = loaded_state();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        // Act
        let mut layout = GridLayout::default();
        terminal.draw(|frame| layout = draw(frame, &state)).unwrap();

        // Assert
        let text = buffer_text(&terminal);
        assert!(text.contains("Inception"));
        assert!(text.contains("Next"));
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.card_height, CARD_HEIGHT);
    }

    #[test]
    fn test_draw_loader_while_loading() {
        // Arrange
        let mut state = BrowserState::new(
            &AppConfig::default(),
            Localization::default(),
            ToastQueue::new(Duration::from_secs(4)),
        );
        state.mount(Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        // Act
        terminal
            .draw(|frame| {
                draw(frame, &state);
            })
            .unwrap();

        // Assert
        assert!(buffer_text(&terminal).contains("Loading movies"));
    }
}
