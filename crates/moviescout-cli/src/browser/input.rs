//! Keyboard and mouse mapping onto browser actions.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::notify::Notifier;
use super::state::{Action, BrowserState, CursorMove, Effect};

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: i32 = 3;

/// Handles a key event and returns the resulting effects.
pub fn handle_key<N: Notifier>(
    state: &mut BrowserState<N>,
    key: KeyEvent,
    now: Instant,
) -> Vec<Effect> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![Effect::Exit];
    }

    if state.search_bar().is_editing() {
        handle_search_input(state, key.code, now)
    } else if state.is_modal_open() {
        handle_modal_input(state, key.code, key.modifiers, now)
    } else {
        handle_normal_input(state, key.code, key.modifiers, now)
    }
}

/// Handles a mouse event (wheel scrolling only).
pub fn handle_mouse<N: Notifier>(
    state: &mut BrowserState<N>,
    mouse: MouseEvent,
    now: Instant,
) -> Vec<Effect> {
    match mouse.kind {
        MouseEventKind::ScrollDown => state.dispatch(Action::ScrollBy(WHEEL_LINES), now),
        MouseEventKind::ScrollUp => state.dispatch(Action::ScrollBy(-WHEEL_LINES), now),
        _ => Vec::new(),
    }
}

/// Back gesture: `Esc`, `Backspace` or `Alt+Left`.
fn is_back_gesture(key: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(key, KeyCode::Esc | KeyCode::Backspace)
        || (key == KeyCode::Left && modifiers.contains(KeyModifiers::ALT))
}

/// Handles key input while the search field is focused.
fn handle_search_input<N: Notifier>(
    state: &mut BrowserState<N>,
    key: KeyCode,
    now: Instant,
) -> Vec<Effect> {
    match key {
        KeyCode::Esc => state.search_bar_mut().blur(),
        KeyCode::Enter => {
            let query = state.search_bar_mut().submit();
            return state.dispatch(Action::SubmitSearch(query), now);
        }
        KeyCode::Backspace => state.search_bar_mut().pop(),
        KeyCode::Char(c) => state.search_bar_mut().push(c),
        _ => {}
    }
    Vec::new()
}

/// Handles key input while the detail modal is open.
fn handle_modal_input<N: Notifier>(
    state: &mut BrowserState<N>,
    key: KeyCode,
    modifiers: KeyModifiers,
    now: Instant,
) -> Vec<Effect> {
    if is_back_gesture(key, modifiers) {
        return state.dispatch(Action::NavigateBack, now);
    }
    match key {
        KeyCode::Char('q') => vec![Effect::Exit],
        KeyCode::Char('x') | KeyCode::Enter => state.dispatch(Action::CloseModal, now),
        KeyCode::Char('o') => {
            open_tmdb_page(state);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Handles key input over the result grid.
fn handle_normal_input<N: Notifier>(
    state: &mut BrowserState<N>,
    key: KeyCode,
    modifiers: KeyModifiers,
    now: Instant,
) -> Vec<Effect> {
    if is_back_gesture(key, modifiers) {
        return state.dispatch(Action::NavigateBack, now);
    }
    let page_lines = i32::from(state.grid().view_height.max(1));

    let action = match key {
        KeyCode::Char('q') => return vec![Effect::Exit],
        KeyCode::Char('/' | 's') => {
            state.search_bar_mut().focus();
            return Vec::new();
        }
        KeyCode::Char('o') => {
            open_tmdb_page(state);
            return Vec::new();
        }
        KeyCode::Char('t') => Action::SelectTrending,
        KeyCode::Char('L') => Action::SetLanguage(state.localization().language().next()),
        KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor(CursorMove::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor(CursorMove::Down),
        KeyCode::Left | KeyCode::Char('h') => Action::MoveCursor(CursorMove::Left),
        KeyCode::Right | KeyCode::Char('l') => Action::MoveCursor(CursorMove::Right),
        KeyCode::PageDown => Action::ScrollBy(page_lines),
        KeyCode::PageUp => Action::ScrollBy(page_lines.saturating_neg()),
        KeyCode::Home | KeyCode::Char('u') => Action::ScrollToTop,
        KeyCode::Enter => match state.cursor_movie_id() {
            Some(movie_id) => Action::ItemClicked(movie_id),
            None => return Vec::new(),
        },
        KeyCode::Char('n') => match state.paginator().and_then(|p| p.next()) {
            Some(index) => Action::PageChange(index),
            None => return Vec::new(),
        },
        KeyCode::Char('p') => match state.paginator().and_then(|p| p.previous()) {
            Some(index) => Action::PageChange(index),
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    state.dispatch(action, now)
}

/// Opens the TMDB page of the open or highlighted movie.
fn open_tmdb_page<N: Notifier>(state: &BrowserState<N>) {
    let Some(url) = state.tmdb_page_url() else {
        return;
    };
    if let Err(e) = open::that(&url) {
        tracing::warn!(url = %url, error = %e, "failed to open browser");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::KeyEventState;

    use super::*;
    use crate::browser::notify::ToastQueue;
    use crate::config::AppConfig;
    use crate::i18n::{Language, Localization};
    use std::time::Duration;

    fn make_state() -> BrowserState<ToastQueue> {
        BrowserState::new(
            &AppConfig::default(),
            Localization::default(),
            ToastQueue::new(Duration::from_secs(4)),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_typing_and_submitting_search() {
        // Arrange
        let mut state = make_state();
        let now = Instant::now();
        state.mount(now);

        // Act
        handle_key(&mut state, press(KeyCode::Char('/')), now);
        for c in "heat".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)), now);
        }
        let effects = handle_key(&mut state, press(KeyCode::Enter), now);

        // Assert
        assert!(!state.search_bar().is_editing());
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::FetchPage(key) => assert_eq!(key.query, "heat"),
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn test_letters_while_editing_are_not_shortcuts() {
        // Arrange
        let mut state = make_state();
        let now = Instant::now();
        state.mount(now);
        handle_key(&mut state, press(KeyCode::Char('s')), now);

        // Act
        let effects = handle_key(&mut state, press(KeyCode::Char('q')), now);

        // Assert
        assert!(effects.is_empty());
        assert_eq!(state.search_bar().text(), "q");
    }

    #[test]
    fn test_quit_and_ctrl_c_exit() {
        // Arrange
        let mut state = make_state();
        let now = Instant::now();
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        };

        // Act & Assert
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('q')), now),
            vec![Effect::Exit]
        );
        assert_eq!(handle_key(&mut state, ctrl_c, now), vec![Effect::Exit]);
    }

    #[test]
    fn test_language_toggle_key() {
        // Arrange
        let mut state = make_state();
        let now = Instant::now();
        state.mount(now);

        // Act
        handle_key(&mut state, press(KeyCode::Char('L')), now);

        // Assert
        assert_eq!(state.localization().language(), Language::UkUa);
    }

    #[test]
    fn test_escape_at_root_exits() {
        // Arrange
        let mut state = make_state();

        // Act
        let effects = handle_key(&mut state, press(KeyCode::Esc), Instant::now());

        // Assert
        assert_eq!(effects, vec![Effect::Exit]);
    }

    #[test]
    fn test_release_events_are_ignored() {
        // Arrange
        let mut state = make_state();
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Char('q'))
        };

        // Act & Assert
        assert!(handle_key(&mut state, release, Instant::now()).is_empty());
    }
}
