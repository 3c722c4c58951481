//! simplitrac - Expense Form
//!
//! A terminal form with one labelled text input per expense field. The same
//! form can be exported as static artifacts under a configurable base path.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use simplitrac::application::{App, AppMode};
use simplitrac::domain::{FormSchema, RowRenderer};
use simplitrac::infrastructure::{BuildConfig, ExportPipeline, SchemaRepository};
use simplitrac::presentation::{render_ui, InputHandler};

/// Lines taken by the header, status bar, table borders and table header.
const FORM_CHROME_ROWS: u16 = 7;

#[derive(Parser, Debug)]
#[command(name = "simplitrac")]
#[command(version)]
#[command(about = "Terminal expense entry form with static export")]
struct Args {
    /// JSON file holding an array of field labels
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// TOML build configuration (base path and plugins)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export the form into this directory and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print the form table markup to stdout and exit
    #[arg(short, long, conflicts_with = "export")]
    print: bool,
}

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "simplitrac.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,simplitrac=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("simplitrac");
    let _guard = init_logging(&data_dir);

    let schema = match &args.schema {
        Some(path) => SchemaRepository::load_schema(path)
            .with_context(|| format!("loading schema from {}", path.display()))?,
        None => FormSchema::default(),
    };

    let config = match &args.config {
        Some(path) => BuildConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BuildConfig::load_or_default()?,
    };

    tracing::info!(labels = schema.len(), base = %config.base, "starting simplitrac");

    if args.print {
        println!("{}", RowRenderer::render_table(&schema).to_markup());
        return Ok(());
    }

    if let Some(out_dir) = &args.export {
        let written = ExportPipeline::from_config(&config)
            .run(&schema, out_dir)
            .with_context(|| format!("exporting to {}", out_dir.display()))?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }

    run_tui(App::new(schema, config))
}

fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "event loop failed");
    }
    res.map_err(Into::into)
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.update_viewport_size(size.height.saturating_sub(FORM_CHROME_ROWS) as usize);

        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_conflicts_with_export() {
        let result = Args::try_parse_from(["simplitrac", "--print", "--export", "dist"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_print_alone_parses() {
        let args = Args::try_parse_from(["simplitrac", "--print"]).unwrap();
        assert!(args.print);
        assert!(args.export.is_none());
    }

    #[test]
    fn test_args_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
