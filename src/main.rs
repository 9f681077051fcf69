//! # hogwarts-tui
//!
//! A terminal user interface (TUI) for browsing Harry Potter characters and spells.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hogwarts_tui::api::HpApi;
use hogwarts_tui::app_core::reducer;
use hogwarts_tui::app_core::state::{AppAction, AppState};
use hogwarts_tui::portrait::Portrait;
use hogwarts_tui::{theme, ui};
use ratatui::{Terminal, backend::CrosstermBackend};

use std::io;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "hogwarts-tui: a terminal client for the Harry Potter API.\n\
                  Browse characters, students, staff and spells, with portraits rendered in the terminal."
)]
struct Args {
    /// UI theme (hogwarts, dracula, gruvbox, solarized)
    #[arg(short, long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let app_version = format!("v{}", env!("CARGO_PKG_VERSION"));

    // Theme selection
    let theme_name = args.theme.as_deref().unwrap_or("hogwarts");
    let theme_enum = theme::Theme::from_str(theme_name).map_err(anyhow::Error::msg)?;
    let theme = theme_enum.config();

    let api = HpApi::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(theme, app_version);

    let res = run_app(&mut terminal, &mut app, &api);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    api: &HpApi,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    terminal.draw(|f| ui::ui(f, app))?;

    loop {
        if app.should_quit {
            break;
        }

        match event::read()? {
            Event::Key(key) => {
                reducer::handle_key_event(app, key);
                if let Some(action) = app.pending_action.take() {
                    handle_action(terminal, app, api, action)?;
                }
                terminal.draw(|f| ui::ui(f, app))?;
            }
            Event::Mouse(mouse) => {
                let transitioned = reducer::handle_mouse_event(app, mouse);
                if transitioned || app.pending_action.is_some() {
                    if let Some(action) = app.pending_action.take() {
                        handle_action(terminal, app, api, action)?;
                    }
                    terminal.draw(|f| ui::ui(f, app))?;
                }
            }
            Event::Resize(_, _) => {
                terminal.draw(|f| ui::ui(f, app))?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Runs the blocking work recorded by the reducer. The loading status is
/// drawn first; the fetch then blocks the loop until it resolves one way or
/// the other.
fn handle_action<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    api: &HpApi,
    action: AppAction,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    match action {
        AppAction::RunQuery(query) => {
            app.set_status(query.loading_status());
            terminal.draw(|f| ui::ui(f, app))?;

            match api.fetch(query) {
                Ok(results) => {
                    let count = results.len();
                    app.load_results(results);
                    app.set_status(query.loaded_status(count));
                }
                Err(err) => {
                    // Previous results stay on screen behind the modal.
                    app.set_status(query.failed_status());
                    app.report_error(format!("{:#}", err));
                }
            }
        }
        AppAction::FetchPortrait(url) => {
            terminal.draw(|f| ui::ui(f, app))?;

            match api
                .fetch_image(&url)
                .and_then(|bytes| Portrait::decode(&bytes))
            {
                Ok(portrait) => app.show_portrait(portrait),
                Err(_) => app.portrait_unavailable(),
            }
            app.set_status("Character details loaded");
        }
    }

    Ok(())
}
