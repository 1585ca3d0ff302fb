use std::fs;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, WriteLogger};

use folio::app::App;
use folio::document::PagedTextDocument;
use folio::panic_handler;
use folio::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "A terminal-based PDF viewer")]
struct Cli {
    /// Document to open (pre-extracted text layer; see docs)
    file: PathBuf,

    /// Log file path (no log file when omitted)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    #[cfg(not(debug_assertions))]
    human_panic::setup_panic!();
    panic_handler::initialize_panic_handler();

    let cli = Cli::parse();
    let settings = Settings::load();
    init_logging(&cli, &settings)?;

    let raw = fs::read(&cli.file)
        .with_context(|| format!("cannot read {}", cli.file.display()))?;
    let title = cli
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    let doc = PagedTextDocument::from_bytes(raw, title);

    info!("opening {}", cli.file.display());
    let mut app = App::new(Box::new(doc), settings);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let outcome = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;

    outcome
}

fn init_logging(cli: &Cli, settings: &Settings) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&settings.log_level)
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Info);

    let file = fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
