//! Shared application state, types, and state-mutation methods.
//!
//! Fetches never happen here. The reducer and these methods only record a
//! [`AppAction`] in `pending_action`; the runtime loop executes it between
//! draws, then feeds the outcome back through `load_results` or the portrait
//! setters. Keeping the pipeline fed only on success is what preserves the
//! previous results when a fetch fails.

use crate::api::Query;
use crate::model::ResultSet;
use crate::portrait::Portrait;
use crate::theme::ThemeConfig;
use crate::ui;
use ratatui::text::Line;
use ratatui::widgets::ListState;

/// Placeholder row shown in the results list after a load came back empty.
pub const NO_RESULTS_TEXT: &str = "No results found";

/// Image slot text for characters the API has no portrait URL for.
pub const NO_IMAGE_NOTE: &str = "No image available";

/// Image slot text when the portrait fetch or decode failed.
pub const IMAGE_FAILED_NOTE: &str = "Image not available";

const WELCOME_STATUS: &str = "Welcome to Harry Potter Club.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Menu,
    Results,
    Details,
}

/// Entries of the browse menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseEntry {
    AllCharacters,
    Students,
    Staff,
    ByHouse,
    Spells,
}

impl BrowseEntry {
    pub const ALL: [BrowseEntry; 5] = [
        BrowseEntry::AllCharacters,
        BrowseEntry::Students,
        BrowseEntry::Staff,
        BrowseEntry::ByHouse,
        BrowseEntry::Spells,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BrowseEntry::AllCharacters => "All Characters",
            BrowseEntry::Students => "Students Only",
            BrowseEntry::Staff => "Staff Only",
            BrowseEntry::ByHouse => "Filter by House...",
            BrowseEntry::Spells => "View All Spells",
        }
    }

    /// Direct query for this entry; `None` for the house picker entry.
    pub fn query(self) -> Option<Query> {
        match self {
            BrowseEntry::AllCharacters => Some(Query::AllCharacters),
            BrowseEntry::Students => Some(Query::Students),
            BrowseEntry::Staff => Some(Query::Staff),
            BrowseEntry::ByHouse => None,
            BrowseEntry::Spells => Some(Query::Spells),
        }
    }
}

/// Blocking work the runtime loop performs after input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    RunQuery(Query),
    FetchPortrait(String),
}

/// What the image region of the details pane shows.
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Empty,
    /// A short note instead of a picture.
    Note(&'static str),
    /// The lightning glyph shown for spells.
    SpellMark,
    Portrait(Portrait),
}

/// Application state for the Ratatui app.
pub struct AppState {
    /// Records currently loaded, replaced wholesale by each completed fetch
    pub results: ResultSet,
    /// Whether any fetch has completed yet (gates the no-results row)
    pub has_loaded: bool,
    /// List selection state managed by ratatui
    pub list_state: ListState,
    /// Selection state for the browse menu
    pub menu_state: ListState,
    /// Which pane currently has keyboard focus
    pub focused_pane: FocusPane,
    /// Formatted detail lines for the current selection
    pub details: Vec<Line<'static>>,
    /// Vertical scroll offset of the details text
    pub details_scroll: u16,
    /// Content of the image region of the details pane
    pub image_slot: ImageSlot,
    /// Status line message
    pub status: String,
    /// Error modal text; `None` hides the modal
    pub error: Option<String>,
    /// Whether the house picker modal is visible
    pub show_house_picker: bool,
    /// Selection state for the house picker
    pub house_state: ListState,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Theme configuration
    pub theme: ThemeConfig,
    /// App version string
    pub app_version: String,
    /// Flag to quit app
    pub should_quit: bool,
    /// Pending action to execute after input handling
    pub pending_action: Option<AppAction>,
    /// Screen region of the browse menu pane (including borders)
    pub menu_area: Option<ratatui::layout::Rect>,
    /// Screen region of menu content (inside borders)
    pub menu_content_area: Option<ratatui::layout::Rect>,
    /// Screen region of the results list pane (including borders)
    pub list_area: Option<ratatui::layout::Rect>,
    /// Screen region of list content (inside borders)
    pub list_content_area: Option<ratatui::layout::Rect>,
    /// Screen region of the details pane (including borders)
    pub details_area: Option<ratatui::layout::Rect>,
}

impl AppState {
    pub fn new(theme: ThemeConfig, app_version: String) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        let mut app = Self {
            results: ResultSet::Characters(Vec::new()),
            has_loaded: false,
            list_state: ListState::default(),
            menu_state,
            focused_pane: FocusPane::Menu,
            details: Vec::new(),
            details_scroll: 0,
            image_slot: ImageSlot::Empty,
            status: WELCOME_STATUS.to_string(),
            error: None,
            show_house_picker: false,
            house_state: ListState::default(),
            show_help: false,
            theme,
            app_version,
            should_quit: false,
            pending_action: None,
            menu_area: None,
            menu_content_area: None,
            list_area: None,
            list_content_area: None,
            details_area: None,
        };
        app.refresh_details();
        app
    }

    /// Installs a completed fetch: the collection and its kind change
    /// together and the selection is cleared.
    pub fn load_results(&mut self, results: ResultSet) {
        self.results = results;
        self.has_loaded = true;
        self.list_state = ListState::default();
        self.refresh_details();
    }

    /// Rebuilds the detail lines and the image slot for the current
    /// selection. Selecting a character with a portrait URL queues the
    /// fetch for the runtime loop instead of blocking here.
    pub fn refresh_details(&mut self) {
        self.details_scroll = 0;
        let selected = self
            .list_state
            .selected()
            .filter(|&index| index < self.results.len());

        let Some(index) = selected else {
            self.details = if self.results.is_empty() {
                Vec::new()
            } else {
                ui::select_hint_lines()
            };
            self.image_slot = ImageSlot::Empty;
            return;
        };

        match &self.results {
            ResultSet::Characters(list) => {
                let character = &list[index];
                self.details = ui::character_details(character, &self.theme);
                if character.image.is_empty() {
                    self.image_slot = ImageSlot::Note(NO_IMAGE_NOTE);
                    self.status = "Character details loaded".to_string();
                } else {
                    self.pending_action = Some(AppAction::FetchPortrait(character.image.clone()));
                    self.status = "Loading character details...".to_string();
                }
            }
            ResultSet::Spells(list) => {
                self.details = ui::spell_details(&list[index], &self.theme);
                self.image_slot = ImageSlot::SpellMark;
                self.status = "Spell details loaded".to_string();
            }
        }
    }

    /// Clamps the current list selection to valid bounds.
    pub fn clamp_selection(&mut self) {
        let len = self.results.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }

        if let Some(selected) = self.list_state.selected()
            && selected >= len
        {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Moves selection by `direction` (+1 or -1) and refreshes details.
    pub fn move_selection(&mut self, direction: i32) {
        if self.results.is_empty() {
            return;
        }
        if direction < 0 {
            self.list_state.select_previous();
        } else {
            self.list_state.select_next();
        }
        self.clamp_selection();
        self.refresh_details();
    }

    /// Jumps the selection by a page worth of rows in either direction.
    pub fn page_selection(&mut self, rows: usize, down: bool) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len();
        let current = self.list_state.selected().unwrap_or(0);
        let target = if down {
            (current + rows).min(len - 1)
        } else {
            current.saturating_sub(rows)
        };
        self.list_state.select(Some(target));
        self.refresh_details();
    }

    /// Selects `index` if it is in bounds; out-of-range requests are
    /// ignored and leave the state untouched.
    pub fn select_index(&mut self, index: usize) {
        if index >= self.results.len() {
            return;
        }
        self.list_state.select(Some(index));
        self.refresh_details();
    }

    /// Jumps to the first or last record.
    pub fn select_edge(&mut self, end: bool) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.list_state.select(Some(if end { len - 1 } else { 0 }));
        self.refresh_details();
    }

    pub fn scroll_details_up(&mut self) {
        self.details_scroll = self.details_scroll.saturating_sub(1);
    }

    pub fn scroll_details_down(&mut self) {
        let max = self.details.len().saturating_sub(1) as u16;
        self.details_scroll = self.details_scroll.saturating_add(1).min(max);
    }

    pub fn show_portrait(&mut self, portrait: Portrait) {
        self.image_slot = ImageSlot::Portrait(portrait);
    }

    /// Swaps the image slot for the failure note. The detail lines stay
    /// exactly as computed.
    pub fn portrait_unavailable(&mut self) {
        self.image_slot = ImageSlot::Note(IMAGE_FAILED_NOTE);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn open_house_picker(&mut self) {
        self.show_house_picker = true;
        self.house_state.select(Some(0));
    }

    pub fn close_house_picker(&mut self) {
        self.show_house_picker = false;
    }

    /// Moves the menu selection, clamped to the entry range.
    pub fn move_menu(&mut self, direction: i32) {
        let len = BrowseEntry::ALL.len();
        let current = self.menu_state.selected().unwrap_or(0);
        let next = if direction < 0 {
            current.saturating_sub(1)
        } else {
            (current + 1).min(len - 1)
        };
        self.menu_state.select(Some(next));
    }

    pub fn selected_menu_entry(&self) -> BrowseEntry {
        let index = self.menu_state.selected().unwrap_or(0);
        BrowseEntry::ALL[index.min(BrowseEntry::ALL.len() - 1)]
    }

    pub fn focus_pane(&mut self, pane: FocusPane) {
        self.focused_pane = pane;
    }

    pub fn focus_next_pane(&mut self) {
        let next = match self.focused_pane {
            FocusPane::Menu => FocusPane::Results,
            FocusPane::Results => FocusPane::Details,
            FocusPane::Details => FocusPane::Menu,
        };
        self.focus_pane(next);
    }

    pub fn focus_prev_pane(&mut self) {
        let prev = match self.focused_pane {
            FocusPane::Menu => FocusPane::Details,
            FocusPane::Results => FocusPane::Menu,
            FocusPane::Details => FocusPane::Results,
        };
        self.focus_pane(prev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Character, House, Spell};
    use crate::theme;
    use serde_json::json;

    fn make_characters(names: &[&str]) -> ResultSet {
        ResultSet::Characters(
            names
                .iter()
                .map(|name| Character::from_value(&json!({ "name": name })))
                .collect(),
        )
    }

    fn make_test_app() -> AppState {
        AppState::new(theme::Theme::Hogwarts.config(), "v0.0.0".to_string())
    }

    fn header_text(app: &AppState) -> String {
        app.details
            .first()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    #[test]
    fn new_app_starts_unloaded_with_welcome_status() {
        let app = make_test_app();
        assert!(!app.has_loaded);
        assert!(app.results.is_empty());
        assert_eq!(app.list_state.selected(), None);
        assert_eq!(app.status, "Welcome to Harry Potter Club.");
        assert!(app.details.is_empty());
        assert!(matches!(app.image_slot, ImageSlot::Empty));
    }

    #[test]
    fn load_results_replaces_wholesale_and_clears_selection() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["Harry Potter", "Hermione Granger"]));
        app.select_index(1);
        assert_eq!(app.list_state.selected(), Some(1));

        app.load_results(ResultSet::Spells(vec![Spell::from_value(
            &json!({ "name": "Accio" }),
        )]));
        assert!(app.has_loaded);
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results.kind_label(), "spells");
        assert_eq!(app.list_state.selected(), None);
        assert!(matches!(app.image_slot, ImageSlot::Empty));
    }

    #[test]
    fn loading_empty_results_clears_the_detail_view() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["Harry Potter"]));
        app.select_index(0);
        assert!(!app.details.is_empty());

        app.load_results(make_characters(&[]));
        assert!(app.details.is_empty());
        assert_eq!(app.list_state.selected(), None);
        assert!(matches!(app.image_slot, ImageSlot::Empty));
    }

    #[test]
    fn selecting_a_character_builds_details_with_name_header() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["Harry Potter", "Hermione Granger"]));
        app.select_index(1);
        assert_eq!(header_text(&app), "Hermione Granger");
    }

    #[test]
    fn selecting_a_spell_builds_details_with_name_header() {
        let mut app = make_test_app();
        app.load_results(ResultSet::Spells(vec![
            Spell::from_value(&json!({ "name": "Accio", "description": "Summons an object" })),
            Spell::from_value(&json!({ "name": "Lumos" })),
        ]));
        app.select_index(0);
        assert_eq!(header_text(&app), "Accio");
        assert!(matches!(app.image_slot, ImageSlot::SpellMark));
        assert_eq!(app.status, "Spell details loaded");
        assert_eq!(app.pending_action, None);
    }

    #[test]
    fn out_of_range_selection_is_a_no_op() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["Harry Potter"]));
        app.select_index(0);
        let details_before = header_text(&app);

        app.select_index(5);
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(header_text(&app), details_before);
    }

    #[test]
    fn first_move_down_selects_the_first_record() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["A", "B"]));
        app.move_selection(1);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn selection_never_moves_past_the_ends() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["A", "B"]));
        app.select_index(0);
        app.move_selection(-1);
        assert_eq!(app.list_state.selected(), Some(0));
        app.move_selection(1);
        app.move_selection(1);
        app.move_selection(1);
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn moving_selection_on_empty_results_stays_unselected() {
        let mut app = make_test_app();
        app.load_results(make_characters(&[]));
        app.move_selection(1);
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn character_with_image_queues_a_portrait_fetch() {
        let mut app = make_test_app();
        app.load_results(ResultSet::Characters(vec![Character::from_value(&json!({
            "name": "Harry Potter",
            "image": "https://ik.imagekit.io/hpapi/harry.jpg"
        }))]));
        app.select_index(0);
        assert_eq!(
            app.pending_action,
            Some(AppAction::FetchPortrait(
                "https://ik.imagekit.io/hpapi/harry.jpg".to_string()
            ))
        );
        assert_eq!(app.status, "Loading character details...");
    }

    #[test]
    fn character_without_image_notes_it_and_queues_nothing() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["Peeves"]));
        app.select_index(0);
        assert_eq!(app.pending_action, None);
        assert!(matches!(app.image_slot, ImageSlot::Note(NO_IMAGE_NOTE)));
        assert_eq!(app.status, "Character details loaded");
    }

    #[test]
    fn portrait_failure_leaves_detail_lines_untouched() {
        let mut app = make_test_app();
        app.load_results(ResultSet::Characters(vec![Character::from_value(&json!({
            "name": "Harry Potter",
            "image": "https://ik.imagekit.io/hpapi/harry.jpg"
        }))]));
        app.select_index(0);
        let details_before: Vec<String> = app
            .details
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect();

        app.portrait_unavailable();
        let details_after: Vec<String> = app
            .details
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect();
        assert_eq!(details_before, details_after);
        assert!(matches!(app.image_slot, ImageSlot::Note(IMAGE_FAILED_NOTE)));
    }

    #[test]
    fn failed_fetch_keeps_previous_results_intact() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["Harry Potter", "Hermione Granger"]));
        app.select_index(1);

        // The runtime loop reports failures without feeding the pipeline.
        app.set_status(Query::Spells.failed_status());
        app.report_error("Error fetching spells: timed out".to_string());

        assert_eq!(app.results.len(), 2);
        assert_eq!(app.results.kind_label(), "characters");
        assert_eq!(app.list_state.selected(), Some(1));
        assert_eq!(header_text(&app), "Hermione Granger");
        assert_eq!(app.status, "Failed to load spells");
        assert!(app.error.is_some());
    }

    #[test]
    fn menu_selection_clamps_and_resolves_entries() {
        let mut app = make_test_app();
        assert_eq!(app.selected_menu_entry(), BrowseEntry::AllCharacters);
        app.move_menu(-1);
        assert_eq!(app.selected_menu_entry(), BrowseEntry::AllCharacters);
        for _ in 0..10 {
            app.move_menu(1);
        }
        assert_eq!(app.selected_menu_entry(), BrowseEntry::Spells);
        assert_eq!(app.selected_menu_entry().query(), Some(Query::Spells));
        assert_eq!(BrowseEntry::ByHouse.query(), None);
    }

    #[test]
    fn house_picker_opens_on_the_first_house() {
        let mut app = make_test_app();
        app.open_house_picker();
        assert!(app.show_house_picker);
        assert_eq!(app.house_state.selected(), Some(0));
        assert_eq!(House::ALL[0], House::Gryffindor);
        app.close_house_picker();
        assert!(!app.show_house_picker);
    }

    #[test]
    fn focus_cycles_through_panes() {
        let mut app = make_test_app();
        assert_eq!(app.focused_pane, FocusPane::Menu);
        app.focus_next_pane();
        assert_eq!(app.focused_pane, FocusPane::Results);
        app.focus_next_pane();
        assert_eq!(app.focused_pane, FocusPane::Details);
        app.focus_next_pane();
        assert_eq!(app.focused_pane, FocusPane::Menu);
        app.focus_prev_pane();
        assert_eq!(app.focused_pane, FocusPane::Details);
    }

    #[test]
    fn details_scroll_saturates_at_both_ends() {
        let mut app = make_test_app();
        app.load_results(make_characters(&["Harry Potter"]));
        app.select_index(0);
        app.scroll_details_up();
        assert_eq!(app.details_scroll, 0);
        for _ in 0..200 {
            app.scroll_details_down();
        }
        assert_eq!(app.details_scroll, app.details.len() as u16 - 1);
        app.scroll_details_up();
        assert_eq!(app.details_scroll, app.details.len() as u16 - 2);
    }
}
