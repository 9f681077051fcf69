//! Event reducer: handlers for key and mouse events.
//!
//! Handlers mutate [`AppState`] in place and may record a pending
//! [`AppAction`]; the runtime loop is responsible for acting on it after
//! input handling returns. Overlays (error modal, house picker, help)
//! shadow the panes beneath them.

use crate::api::Query;
use crate::app_core::state::{AppAction, AppState, BrowseEntry, FocusPane};
use crate::model::House;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

pub const SCROLL_LINES: u16 = 1;

/// Returns the pane that contains the given cell coordinates, if any.
pub fn pane_at(app: &AppState, column: u16, row: u16) -> Option<FocusPane> {
    if let Some(area) = app.menu_area
        && area.contains((column, row).into())
    {
        return Some(FocusPane::Menu);
    }
    if let Some(area) = app.list_area
        && area.contains((column, row).into())
    {
        return Some(FocusPane::Results);
    }
    if let Some(area) = app.details_area
        && area.contains((column, row).into())
    {
        return Some(FocusPane::Details);
    }
    None
}

/// Runs the menu entry under the cursor: a direct query, or the house
/// picker for the house entry.
fn activate_menu_entry(app: &mut AppState) {
    match app.selected_menu_entry().query() {
        Some(query) => app.pending_action = Some(AppAction::RunQuery(query)),
        None => app.open_house_picker(),
    }
}

/// Handle a key event, mutating `app` in place.
pub fn handle_key_event(app: &mut AppState, event: KeyEvent) {
    if event.kind == KeyEventKind::Release {
        return;
    }

    let code = event.code;
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);

    if app.error.is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_error();
        }
        return;
    }

    if app.show_help {
        if matches!(code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    if app.show_house_picker {
        match code {
            KeyCode::Esc => app.close_house_picker(),
            KeyCode::Up => app.house_state.select_previous(),
            KeyCode::Down => {
                app.house_state.select_next();
                if let Some(selected) = app.house_state.selected()
                    && selected >= House::ALL.len()
                {
                    app.house_state.select(Some(House::ALL.len() - 1));
                }
            }
            KeyCode::Enter => {
                if let Some(index) = app.house_state.selected()
                    && let Some(house) = House::ALL.get(index)
                {
                    app.close_house_picker();
                    app.pending_action = Some(AppAction::RunQuery(Query::House(*house)));
                }
            }
            _ => {}
        }
        return;
    }

    if code == KeyCode::Tab || code == KeyCode::BackTab {
        if code == KeyCode::BackTab || shift {
            app.focus_prev_pane();
        } else {
            app.focus_next_pane();
        }
        return;
    }

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => match app.focused_pane {
            FocusPane::Details => app.focus_pane(FocusPane::Results),
            FocusPane::Results => app.focus_pane(FocusPane::Menu),
            FocusPane::Menu => {}
        },
        KeyCode::Enter => match app.focused_pane {
            FocusPane::Menu => activate_menu_entry(app),
            FocusPane::Results => {
                if app.list_state.selected().is_some() {
                    app.focus_pane(FocusPane::Details);
                }
            }
            FocusPane::Details => {}
        },
        KeyCode::Up => match app.focused_pane {
            FocusPane::Menu => app.move_menu(-1),
            FocusPane::Results => app.move_selection(-1),
            FocusPane::Details => app.scroll_details_up(),
        },
        KeyCode::Down => match app.focused_pane {
            FocusPane::Menu => app.move_menu(1),
            FocusPane::Results => app.move_selection(1),
            FocusPane::Details => app.scroll_details_down(),
        },
        KeyCode::Home => match app.focused_pane {
            FocusPane::Results => app.select_edge(false),
            FocusPane::Details => app.details_scroll = 0,
            FocusPane::Menu => {}
        },
        KeyCode::End => match app.focused_pane {
            FocusPane::Results => app.select_edge(true),
            FocusPane::Details => {
                app.details_scroll = app.details.len().saturating_sub(1) as u16;
            }
            FocusPane::Menu => {}
        },
        KeyCode::PageUp => {
            if app.focused_pane == FocusPane::Results {
                app.page_selection(page_rows(app), false);
            }
        }
        KeyCode::PageDown => {
            if app.focused_pane == FocusPane::Results {
                app.page_selection(page_rows(app), true);
            }
        }
        _ => {}
    }
}

fn page_rows(app: &AppState) -> usize {
    app.list_area.map(|area| area.height).unwrap_or(10) as usize
}

/// Handle a mouse event. Returns `true` if the UI needs to be redrawn.
pub fn handle_mouse_event(app: &mut AppState, event: MouseEvent) -> bool {
    // Overlays are keyboard-driven.
    if app.error.is_some() || app.show_help || app.show_house_picker {
        return false;
    }

    let column = event.column;
    let row = event.row;
    let hovered_pane = pane_at(app, column, row);
    let mut transitioned = false;

    match event.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let scroll_down = event.kind == MouseEventKind::ScrollDown;
            match hovered_pane {
                Some(FocusPane::Menu) => {
                    app.move_menu(if scroll_down { 1 } else { -1 });
                    transitioned = true;
                }
                Some(FocusPane::Results) => {
                    if !app.results.is_empty() {
                        for _ in 0..SCROLL_LINES {
                            app.move_selection(if scroll_down { 1 } else { -1 });
                        }
                        transitioned = true;
                    }
                }
                Some(FocusPane::Details) => {
                    for _ in 0..SCROLL_LINES {
                        if scroll_down {
                            app.scroll_details_down();
                        } else {
                            app.scroll_details_up();
                        }
                    }
                    transitioned = true;
                }
                None => {}
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(pane) = hovered_pane
                && app.focused_pane != pane
            {
                app.focus_pane(pane);
                transitioned = true;
            }

            if hovered_pane == Some(FocusPane::Menu)
                && let Some(content_area) = app.menu_content_area
                && content_area.contains((column, row).into())
            {
                let menu_row = row.saturating_sub(content_area.y) as usize;
                if menu_row < BrowseEntry::ALL.len() {
                    app.menu_state.select(Some(menu_row));
                    activate_menu_entry(app);
                    transitioned = true;
                }
            }

            if hovered_pane == Some(FocusPane::Results)
                && let Some(content_area) = app.list_content_area
                && content_area.contains((column, row).into())
                && !app.results.is_empty()
            {
                let list_row = row.saturating_sub(content_area.y) as usize;
                if list_row < content_area.height as usize {
                    let clicked = app.list_state.offset() + list_row;
                    // Clicks past the last row do nothing.
                    if clicked < app.results.len() && app.list_state.selected() != Some(clicked) {
                        app.select_index(clicked);
                        transitioned = true;
                    }
                }
            }
        }
        _ => {}
    }

    transitioned
}
