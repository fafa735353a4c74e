// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard/mouse input, redraw ticks, fetch completions)
// - Wiring filter edits to new records fetches
//
// Ordering note: a filter edit is fully applied to the criteria before
// the fetch command for it is built, and the command carries its own
// clone of the criteria - a fetch can never observe a half-applied edit.

pub mod app;
pub mod chart;
pub mod detail;
pub mod modal;
pub mod ui;

use crate::fetch::{DataEvent, FetchCommand};
use anyhow::{Context, Result};
use app::{App, Focus};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, issues the two initial fetches (records with the
/// empty criteria, summary once), runs the event loop, and restores the
/// terminal when done.
pub async fn run_tui(
    mut app: App,
    command_tx: mpsc::Sender<FetchCommand>,
    mut data_rx: mpsc::Receiver<DataEvent>,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Initial fetches: records for the empty criteria, summary exactly once
    let seq = app.begin_records_fetch();
    let _ = command_tx
        .send(FetchCommand::Records {
            seq,
            filters: app.filters.clone(),
        })
        .await;
    let _ = command_tx.send(FetchCommand::Summary).await;

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &command_tx, &mut data_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// tokio::select! multiplexes three sources: terminal input, a redraw
/// tick, and fetch completions. Filter edits mark the criteria dirty;
/// after each handled event the dirty flag is turned into exactly one
/// new records fetch.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<FetchCommand>,
    data_rx: &mut mpsc::Receiver<DataEvent>,
) -> Result<()> {
    // Ticker for periodic redraws (spinner animation)
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        // Draw the UI
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // Fetch completions
            Some(data_event) = data_rx.recv() => {
                apply_data_event(app, data_event);
            }
        }

        // One dirty flag = one fetch, with the fully merged criteria
        if app.take_filters_dirty() {
            let seq = app.begin_records_fetch();
            let _ = command_tx
                .send(FetchCommand::Records {
                    seq,
                    filters: app.filters.clone(),
                })
                .await;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Route a fetch completion into app state
fn apply_data_event(app: &mut App, event: DataEvent) {
    match event {
        DataEvent::Records { seq, result } => app.apply_records(seq, result),
        DataEvent::Summary(result) => app.apply_summary(result),
    }
}

/// Handle keyboard input
/// Layered dispatch: Modal → Ctrl+C → focused area
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C quits from anywhere, even while a text field has focus
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    // Modal captures all input when active
    if handle_modal_input(app, key_event.code) {
        return;
    }

    match app.focus {
        Focus::Filters => handle_filters_key(app, key_event),
        Focus::Chart => handle_chart_key(app, key_event),
    }
}

/// Keys while the filter form has focus. Printable characters edit the
/// selected field, so global shortcuts live on the chart side.
fn handle_filters_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter | KeyCode::Esc => app.focus = Focus::Chart,
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

/// Keys while the chart has focus
fn handle_chart_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(Modal::help()),
        KeyCode::Char('f') | KeyCode::Tab | KeyCode::Esc => app.focus = Focus::Filters,
        KeyCode::Left | KeyCode::Char('h') => app.cursor_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.cursor_next(),
        // Manual refresh reuses the dirty flag: one flag, one fetch
        KeyCode::Char('r') => app.filters_dirty = true,
        KeyCode::Enter => {
            if let Some(index) = app.cursor {
                app.open_detail(index);
            }
        }
        _ => {}
    }
}

/// Handle mouse input: left click on the chart selects and opens the
/// nearest plotted point; clicks elsewhere (or misses) do nothing.
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() {
        return;
    }
    if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
        if let Some(index) = ui::chart_hit(app, mouse_event.column, mouse_event.row) {
            app.focus = Focus::Chart;
            app.cursor = Some(index);
            app.open_detail(index);
        }
    }
}

/// Handle modal input - returns true if a modal absorbed the input
fn handle_modal_input(app: &mut App, key: KeyCode) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key) {
        ModalAction::None => {}
        ModalAction::Close => app.close_modal(),
        ModalAction::CopyReadable => {
            if let Some(record) = app.detail_record() {
                let text = detail::detail_text(record);
                copy_to_clipboard(&text);
            }
        }
        ModalAction::CopyJson => {
            if let Some(record) = app.detail_record() {
                match serde_json::to_string_pretty(record) {
                    Ok(json) => copy_to_clipboard(&json),
                    Err(e) => tracing::error!("Failed to serialize record: {e}"),
                }
            }
        }
    }

    true // Modal absorbed the input
}

/// Copy text to the system clipboard, logging failures instead of
/// surfacing them (clipboard access is best-effort on headless systems)
fn copy_to_clipboard(text: &str) {
    let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string()));
    match result {
        Ok(()) => tracing::debug!("Copied {} bytes to clipboard", text.len()),
        Err(e) => tracing::warn!("Clipboard copy failed: {e}"),
    }
}
