use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc;
use tokio::time;

use crate::app::state::{App, CatalogUpdate, SearchMode, View};
use crate::config::UiConfig;
use crate::ui::views::{draw_detail, draw_search};

pub async fn run_app(app: &mut App, ui: &UiConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // channel for background catalog reloads
    let (tx, rx) = mpsc::unbounded_channel();
    app.set_update_sender(tx);

    let res = run_loop(app, &mut terminal, rx, ui).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut rx: mpsc::UnboundedReceiver<CatalogUpdate>,
    ui: &UiConfig,
) -> io::Result<()> {
    let mut tick = time::interval(ui.tick());
    let debounce = ui.debounce();

    loop {
        terminal.draw(|f| match app.view {
            View::Search => draw_search(f, app),
            View::Detail => draw_detail(f, app),
        })?;

        tokio::select! {
            _ = tick.tick() => {
                // Debounced re-rank on search input
                if app.view == View::Search {
                    app.maybe_apply_filter(debounce);
                }
            }
            Some(update) = rx.recv() => {
                app.apply_catalog_update(update);
            }
            Ok(should_quit) = handle_event(app) => {
                if should_quit { break; }
            }
        }
    }
    Ok(())
}

async fn handle_event(app: &mut App) -> io::Result<bool> {
    if event::poll(std::time::Duration::from_millis(16))?
        && let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        // Global quit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        return Ok(match app.view {
            View::Search => handle_search_input(app, key),
            View::Detail => handle_detail_input(app, key),
        });
    }
    Ok(false)
}

/// Keys shared by both search modes. Returns `Some(quit)` when handled.
fn handle_common_search_key(app: &mut App, key: event::KeyEvent) -> Option<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            if app.search.input.is_empty() {
                return Some(true);
            }
            app.on_delete();
        }
        KeyCode::Char('s') if ctrl => app.toggle_sort(),
        KeyCode::Char('r') if ctrl => app.manual_refresh(),
        KeyCode::Enter => app.enter_detail(),
        _ => return None,
    }
    Some(false)
}

fn handle_search_input(app: &mut App, key: event::KeyEvent) -> bool {
    if let Some(quit) = handle_common_search_key(app, key) {
        return quit;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app.search.mode {
        SearchMode::Insert => match key.code {
            KeyCode::Up => {
                if ctrl {
                    app.jump_to_top();
                } else {
                    app.move_selection(-1);
                }
                app.search.mode = SearchMode::Navigate;
            }
            KeyCode::Down => {
                if ctrl {
                    app.jump_to_bottom();
                } else {
                    app.move_selection(1);
                }
                app.search.mode = SearchMode::Navigate;
            }
            KeyCode::PageUp => {
                app.move_selection(-20);
                app.search.mode = SearchMode::Navigate;
            }
            KeyCode::PageDown => {
                app.move_selection(20);
                app.search.mode = SearchMode::Navigate;
            }
            KeyCode::Home => {
                app.jump_to_top();
                app.search.mode = SearchMode::Navigate;
            }
            KeyCode::End => {
                app.jump_to_bottom();
                app.search.mode = SearchMode::Navigate;
            }
            KeyCode::Backspace => app.on_backspace(),
            KeyCode::Delete => app.on_delete(),
            KeyCode::Char(ch) => app.on_input(ch),
            _ => {}
        },
        SearchMode::Navigate => match key.code {
            KeyCode::Up => {
                if ctrl {
                    app.jump_to_top();
                } else {
                    app.move_selection(-1);
                }
            }
            KeyCode::Down => {
                if ctrl {
                    app.jump_to_bottom();
                } else {
                    app.move_selection(1);
                }
            }
            KeyCode::PageUp => app.move_selection(-20),
            KeyCode::PageDown => app.move_selection(20),
            KeyCode::Home => app.jump_to_top(),
            KeyCode::End => app.jump_to_bottom(),
            KeyCode::Backspace => {
                app.search.mode = SearchMode::Insert;
                app.on_backspace();
            }
            KeyCode::Delete => {
                app.search.mode = SearchMode::Insert;
                app.on_delete();
            }
            KeyCode::Char(ch) => {
                app.search.mode = SearchMode::Insert;
                app.on_input(ch);
            }
            _ => {}
        },
    }
    false
}

fn handle_detail_input(app: &mut App, key: event::KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => app.exit_detail(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => app.manual_refresh(),
        _ => {}
    }
    false
}
