// rtable - Report Table: pivot-capable data table viewer
// Drag a header cell onto another group to reorder whole column groups.

mod app;
mod grid;
mod model;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::{
    event::{handle_key_event, handle_mouse_event},
    AppState, ViewConfig,
};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use model::TableModel;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Pivot-capable report table viewer with drag-to-reorder column groups.
#[derive(Parser)]
#[command(name = "rtable", version, about)]
struct Args {
    /// Table model JSON file
    model: PathBuf,

    /// Configuration file (TOML); the column order is persisted here
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme override: traditional, contemporary, minimal or custom
    #[arg(long)]
    theme: Option<String>,

    /// Layout override: fixed or auto
    #[arg(long)]
    layout: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = args
        .config
        .as_deref()
        .map(ViewConfig::load)
        .unwrap_or_default();
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    if let Some(layout) = args.layout {
        config.layout = layout;
    }

    let table = TableModel::load(&args.model)
        .with_context(|| format!("loading table model from {}", args.model.display()))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = AppState::new(table, config, args.config);
    let res = run_app(&mut terminal, &mut app);

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
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    handle_key_event(app, key.code);
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => {}
            }
        }
    }
}
