use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};

use crate::app_core::state::{BrowseEntry, ImageSlot, NO_RESULTS_TEXT};
use crate::model::{Character, House, Spell};
use crate::theme::ThemeConfig;
use crate::{AppState, FocusPane};

/// Height of the browse menu pane: one row per entry plus the borders.
const MENU_HEIGHT: u16 = BrowseEntry::ALL.len() as u16 + 2;

/// Width of the separator under detail headers.
const SEPARATOR_WIDTH: usize = 60;

/// Main UI entry point that renders the entire application layout.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main area - takes all space
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[0]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(MENU_HEIGHT), Constraint::Min(0)])
        .split(main_chunks[0]);

    app.menu_area = Some(left_chunks[0]);
    app.list_area = Some(left_chunks[1]);
    app.details_area = Some(main_chunks[1]);

    render_menu(f, app, left_chunks[0]);
    render_results(f, app, left_chunks[1]);
    render_details(f, app, main_chunks[1]);
    render_status_bar(f, app, chunks[1]);

    if app.error.is_some() {
        render_error_modal(f, app);
    } else if app.show_help {
        render_help_overlay(f, app);
    } else if app.show_house_picker {
        render_house_picker(f, app);
    }
}

/// Renders the fixed menu of browse queries.
fn render_menu(f: &mut Frame, app: &mut AppState, area: Rect) {
    let items: Vec<ListItem> = BrowseEntry::ALL
        .iter()
        .map(|entry| ListItem::new(entry.label()))
        .collect();

    let is_focused = app.focused_pane == FocusPane::Menu;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            app.theme.border_selected
        } else {
            app.theme.border
        })
        .title_style(app.theme.title)
        .title(" Browse Options ")
        .title_bottom(if is_focused {
            Line::from(" ↑/↓ move • Enter run ").right_aligned()
        } else {
            Line::from("").right_aligned()
        })
        .title_alignment(Alignment::Left)
        .style(app.theme.list_normal);

    app.menu_content_area = Some(block.inner(area));

    let list = List::new(items)
        .block(block)
        .style(app.theme.list_normal)
        .highlight_style(app.theme.list_selected);

    f.render_stateful_widget(list, area, &mut app.menu_state);
}

/// Renders the scrollable list of fetched records.
fn render_results(f: &mut Frame, app: &mut AppState, area: Rect) {
    let mut items: Vec<ListItem> = (0..app.results.len())
        .map(|index| ListItem::new(app.results.name_at(index).unwrap_or_default().to_string()))
        .collect();

    if items.is_empty() && app.has_loaded {
        items.push(ListItem::new(Span::styled(
            NO_RESULTS_TEXT,
            app.theme.text.add_modifier(Modifier::DIM),
        )));
    }

    let is_focused = app.focused_pane == FocusPane::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            app.theme.border_selected
        } else {
            app.theme.border
        })
        .title_style(app.theme.title)
        .title(format!(" Results ({}) ", app.results.len()))
        .title_bottom(if is_focused {
            Line::from(" ↑/↓ move • Tab cycle ").right_aligned()
        } else {
            Line::from("").right_aligned()
        })
        .title_alignment(Alignment::Left)
        .style(app.theme.list_normal);

    app.list_content_area = Some(block.inner(area));

    let list = List::new(items)
        .block(block)
        .style(app.theme.list_normal)
        .scroll_padding(2)
        .highlight_style(app.theme.list_selected);

    f.render_stateful_widget(list, area, &mut app.list_state);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
    let mut scrollbar_state =
        ScrollbarState::new(app.results.len()).position(app.list_state.selected().unwrap_or(0));

    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// Renders the details pane: the image region on top, the detail text under it.
fn render_details(f: &mut Frame, app: &mut AppState, area: Rect) {
    let is_focused = app.focused_pane == FocusPane::Details;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            app.theme.border_selected
        } else {
            app.theme.border
        })
        .style(app.theme.text)
        .title(" Character/Spell Details ")
        .title_alignment(Alignment::Left)
        .title_style(app.theme.title)
        .title_bottom(if is_focused {
            Line::from(" ↑/↓ scroll • Esc back ").right_aligned()
        } else {
            Line::from("").right_aligned()
        });

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if inner_area.width == 0 || inner_area.height == 0 {
        return;
    }

    let image_rows = image_region_height(&app.image_slot, inner_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(image_rows), Constraint::Min(0)])
        .split(inner_area);

    render_image_slot(f, app, chunks[0]);

    // 1-symbol horizontal padding within the text area
    let text_area = Rect::new(
        chunks[1].x + 1,
        chunks[1].y,
        chunks[1].width.saturating_sub(2),
        chunks[1].height,
    );
    if text_area.width > 0 && text_area.height > 0 {
        let paragraph = Paragraph::new(Text::from(app.details.clone()))
            .style(app.theme.text)
            .wrap(Wrap { trim: false })
            .scroll((app.details_scroll, 0));
        f.render_widget(paragraph, text_area);
    }
}

fn image_region_height(slot: &ImageSlot, inner: Rect) -> u16 {
    match slot {
        ImageSlot::Empty => 0,
        ImageSlot::Note(_) | ImageSlot::SpellMark => 3.min(inner.height),
        ImageSlot::Portrait(_) => inner.height / 2,
    }
}

fn render_image_slot(f: &mut Frame, app: &mut AppState, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    match &app.image_slot {
        ImageSlot::Empty => {}
        ImageSlot::Note(note) => {
            let text = Text::from(vec![Line::from(""), Line::from(*note)]);
            f.render_widget(
                Paragraph::new(text)
                    .style(app.theme.text.add_modifier(Modifier::DIM))
                    .alignment(Alignment::Center),
                area,
            );
        }
        ImageSlot::SpellMark => {
            let text = Text::from(vec![Line::from(""), Line::from("⚡")]);
            f.render_widget(
                Paragraph::new(text)
                    .style(app.theme.title)
                    .alignment(Alignment::Center),
                area,
            );
        }
        ImageSlot::Portrait(portrait) => {
            f.render_widget(portrait, area);
        }
    }
}

/// Renders the multisection status bar at the bottom.
fn render_status_bar(f: &mut Frame, app: &mut AppState, area: Rect) {
    let area = Rect::new(
        area.x + 1,
        area.y,
        area.width.saturating_sub(2),
        area.height,
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_status_bar_shortcuts(f, app, chunks[0]);
    render_status_bar_message(f, app, chunks[1]);
    render_status_bar_summary(f, app, chunks[2]);
}

fn render_status_bar_shortcuts(f: &mut Frame, app: &mut AppState, area: Rect) {
    let key_style = app.theme.title;
    let bar_style = app.theme.text.add_modifier(Modifier::DIM);

    let shortcuts = Line::from(vec![
        Span::styled("Tab ", key_style),
        Span::raw("panes  "),
        Span::styled("? ", key_style),
        Span::raw("help  "),
        Span::styled("q ", key_style),
        Span::raw("quit"),
    ]);

    f.render_widget(
        Paragraph::new(shortcuts)
            .style(bar_style)
            .alignment(Alignment::Left),
        area,
    );
}

fn render_status_bar_message(f: &mut Frame, app: &mut AppState, area: Rect) {
    let bar_style = app.theme.text.add_modifier(Modifier::DIM);

    f.render_widget(
        Paragraph::new(app.status.as_str())
            .style(bar_style)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_status_bar_summary(f: &mut Frame, app: &mut AppState, area: Rect) {
    let bar_style = app.theme.text.add_modifier(Modifier::DIM);
    let summary = if app.has_loaded {
        format!(
            "{} {}  {}",
            app.results.len(),
            app.results.kind_label(),
            app.app_version
        )
    } else {
        app.app_version.clone()
    };

    f.render_widget(
        Paragraph::new(summary)
            .style(bar_style)
            .alignment(Alignment::Right),
        area,
    );
}

/// Blocking notification for failed fetches. Dismissed with Enter or Esc.
fn render_error_modal(f: &mut Frame, app: &mut AppState) {
    let Some(message) = &app.error else {
        return;
    };

    let area = f.area();
    let popup_width = area.width.min(60).saturating_sub(4);
    let popup_height = 8.min(area.height.saturating_sub(2));
    if popup_width == 0 || popup_height == 0 {
        return;
    }
    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.error)
        .style(app.theme.text)
        .title(" Error ")
        .border_type(ratatui::widgets::BorderType::Double)
        .title_style(app.theme.error)
        .title_bottom(Line::from(" Enter dismiss ").right_aligned());

    let inner_area = block.inner(popup_rect);
    f.render_widget(block, popup_rect);

    f.render_widget(
        Paragraph::new(message.as_str())
            .style(app.theme.error)
            .wrap(Wrap { trim: false }),
        inner_area.inner(Margin::new(1, 1)),
    );
}

fn render_house_picker(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    let popup_width = area.width.min(34).saturating_sub(4);
    let popup_height = area.height.min(House::ALL.len() as u16 + 2);
    if popup_width == 0 || popup_height == 0 {
        return;
    }
    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_selected)
        .style(app.theme.text)
        .title(" Filter by House ")
        .title_style(app.theme.title)
        .title_bottom(Line::from(" Enter apply • Esc cancel ").right_aligned());

    let inner_area = block.inner(popup_rect);
    f.render_widget(block, popup_rect);

    let items: Vec<ListItem> = House::ALL
        .iter()
        .map(|house| ListItem::new(house.name()))
        .collect();

    let list = List::new(items)
        .block(Block::default())
        .style(app.theme.list_normal)
        .highlight_style(app.theme.list_selected);

    f.render_stateful_widget(list, inner_area, &mut app.house_state);
}

fn render_help_overlay(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    let popup_width = area.width.min(56).saturating_sub(4);
    let popup_height = 17.min(area.height.saturating_sub(2));
    if popup_width == 0 || popup_height == 0 {
        return;
    }
    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_selected)
        .style(app.theme.text)
        .title(" Help ")
        .border_type(ratatui::widgets::BorderType::Double)
        .title_style(app.theme.title);

    let inner_area = block.inner(popup_rect);
    f.render_widget(block, popup_rect);

    let key_style = app.theme.title;
    let desc_style = app.theme.text;
    let header_style = key_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let format_section = |title: &str, items: Vec<(&str, &str)>| -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(title.to_string(), header_style))];
        for (key, desc) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("{: <18}", key), key_style),
                Span::styled(desc.to_string(), desc_style),
            ]));
        }
        lines
    };

    let nav_lines = format_section(
        "Navigation",
        vec![
            ("Tab | Shift+Tab", "cycle panes"),
            ("Up | Down", "move / scroll"),
            ("Enter", "run query, open details"),
            ("Esc", "step back"),
            ("Home | End", "first / last result"),
            ("PgUp | PgDn", "page through results"),
            ("q", "quit"),
        ],
    );
    let nav_height = nav_lines.len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(nav_height),
            Constraint::Length(1), // Spacer
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner_area);

    f.render_widget(Paragraph::new(nav_lines), chunks[0]);

    let mouse_lines = format_section(
        "Mouse",
        vec![
            ("Click", "focus pane, pick an entry"),
            ("Wheel", "move selection / scroll"),
        ],
    );

    f.render_widget(Paragraph::new(mouse_lines), chunks[2]);
}

/// Hint shown in the details pane while results are loaded but nothing is
/// selected yet.
pub fn select_hint_lines() -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        "Select an item to view details",
        Style::default().add_modifier(Modifier::DIM),
    ))]
}

fn labeled_line(label: &str, value: &str, theme: &ThemeConfig) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().fg(theme.detail_style.label),
        ),
        Span::styled(
            value.to_string(),
            Style::default().fg(theme.detail_style.value),
        ),
    ])
}

fn header_line(name: &str, theme: &ThemeConfig) -> Line<'static> {
    Line::from(Span::styled(
        name.to_string(),
        Style::default()
            .fg(theme.detail_style.header)
            .add_modifier(Modifier::BOLD),
    ))
}

fn separator_line(theme: &ThemeConfig) -> Line<'static> {
    Line::from(Span::styled(
        "=".repeat(SEPARATOR_WIDTH),
        Style::default().fg(theme.detail_style.label),
    ))
}

/// Builds the detail lines for a character, fields in fixed order.
pub fn character_details(character: &Character, theme: &ThemeConfig) -> Vec<Line<'static>> {
    let mut lines = vec![
        header_line(&character.name, theme),
        separator_line(theme),
        Line::from(""),
    ];
    lines.push(labeled_line("House", &character.house, theme));
    lines.push(labeled_line("Species", &character.species, theme));
    lines.push(labeled_line("Gender", &character.gender, theme));
    lines.push(labeled_line("Date of Birth", &character.date_of_birth, theme));
    lines.push(labeled_line("Ancestry", &character.ancestry, theme));
    lines.push(labeled_line("Eye Colour", &character.eye_colour, theme));
    lines.push(labeled_line("Hair Colour", &character.hair_colour, theme));
    lines.push(labeled_line("Wand", &character.wand.describe(), theme));
    lines.push(labeled_line("Patronus", &character.patronus, theme));
    lines.push(labeled_line("Actor", &character.actor, theme));
    lines.push(labeled_line("Status", character.status_text(), theme));
    lines.push(Line::from(""));
    lines.push(labeled_line(
        "Alternate Names",
        &character.alternate_names_text(),
        theme,
    ));
    lines
}

/// Builds the detail lines for a spell.
pub fn spell_details(spell: &Spell, theme: &ThemeConfig) -> Vec<Line<'static>> {
    vec![
        header_line(&spell.name, theme),
        separator_line(theme),
        Line::from(""),
        Line::from(Span::styled(
            "Description:".to_string(),
            Style::default().fg(theme.detail_style.label),
        )),
        Line::from(Span::styled(
            spell.description.clone(),
            Style::default().fg(theme.detail_style.value),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use serde_json::json;

    fn line_text(line: &Line) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn character_details_follow_the_fixed_field_order() {
        let theme = theme::Theme::Hogwarts.config();
        let character = Character::from_value(&json!({
            "name": "Harry Potter",
            "house": "Gryffindor",
            "species": "human",
            "gender": "male",
            "dateOfBirth": "31-07-1980",
            "ancestry": "half-blood",
            "eyeColour": "green",
            "hairColour": "black",
            "wand": { "wood": "holly", "core": "phoenix feather", "length": 11 },
            "patronus": "stag",
            "actor": "Daniel Radcliffe",
            "alive": true,
            "alternate_names": ["The Boy Who Lived"]
        }));

        let lines: Vec<String> = character_details(&character, &theme)
            .iter()
            .map(|line| line_text(line))
            .collect();

        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "Harry Potter");
        assert_eq!(lines[1], "=".repeat(60));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "House: Gryffindor");
        assert_eq!(lines[4], "Species: human");
        assert_eq!(lines[5], "Gender: male");
        assert_eq!(lines[6], "Date of Birth: 31-07-1980");
        assert_eq!(lines[7], "Ancestry: half-blood");
        assert_eq!(lines[8], "Eye Colour: green");
        assert_eq!(lines[9], "Hair Colour: black");
        assert_eq!(
            lines[10],
            "Wand: holly wood, phoenix feather core, 11 inches"
        );
        assert_eq!(lines[11], "Patronus: stag");
        assert_eq!(lines[12], "Actor: Daniel Radcliffe");
        assert_eq!(lines[13], "Status: Alive");
        assert_eq!(lines[14], "");
        assert_eq!(lines[15], "Alternate Names: The Boy Who Lived");
    }

    #[test]
    fn missing_character_fields_render_as_unknown() {
        let theme = theme::Theme::Hogwarts.config();
        let character = Character::from_value(&json!({ "name": "Peeves" }));

        let lines: Vec<String> = character_details(&character, &theme)
            .iter()
            .map(|line| line_text(line))
            .collect();

        assert_eq!(lines[3], "House: Unknown");
        assert_eq!(lines[10], "Wand: Unknown");
        assert_eq!(lines[13], "Status: Alive");
        assert_eq!(lines[15], "Alternate Names: None");
    }

    #[test]
    fn spell_details_show_name_and_description() {
        let theme = theme::Theme::Hogwarts.config();
        let spell = Spell::from_value(&json!({
            "name": "Accio",
            "description": "Summons an object"
        }));

        let lines: Vec<String> = spell_details(&spell, &theme)
            .iter()
            .map(|line| line_text(line))
            .collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Accio");
        assert_eq!(lines[1], "=".repeat(60));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Description:");
        assert_eq!(lines[4], "Summons an object");
    }

    #[test]
    fn spell_without_description_gets_the_placeholder() {
        let theme = theme::Theme::Hogwarts.config();
        let spell = Spell::from_value(&json!({ "name": "Lumos" }));

        let lines: Vec<String> = spell_details(&spell, &theme)
            .iter()
            .map(|line| line_text(line))
            .collect();

        assert_eq!(lines[4], "No description available");
    }

    #[test]
    fn select_hint_is_a_single_line() {
        let lines = select_hint_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "Select an item to view details");
    }
}
