#![forbid(unsafe_code)]

//! # Folio CLI
//!
//! Terminal reading application (in progress).
//!
//! ```bash
//! folio                      # show shell status
//! folio ~/books              # list documents in a directory
//! folio book.epub            # open a document
//! folio --theme dark         # switch the theme
//! ```

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};

use folio::library::Library;
use folio::reader::OpenDocument;
use folio::{Shell, ShellConfig};
use folio_theme::RootSurface;

/// Read documents in the terminal.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Read documents in the terminal")]
struct Cli {
    /// Document or directory to open.
    path: Option<PathBuf>,

    /// Theme choice: light, dark, or system.
    #[arg(long, env = "FOLIO_THEME")]
    theme: Option<String>,

    /// Keep preferences in memory for this session only.
    #[arg(long)]
    no_store: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ShellConfig::new().persist(!cli.no_store);

    // Bootstrap, paint, then mount: the first paint is already themed.
    let mut shell = Shell::boot(&config);
    if let Err(err) = paint_root(shell.surface()) {
        tracing::warn!(error = %err, "Could not paint the root background");
    }
    shell.mount();

    if let Some(name) = cli.theme.as_deref() {
        match shell.provider().set_theme_choice_by_name(name) {
            Ok(_) => {
                if let Err(err) = paint_root(shell.surface()) {
                    tracing::warn!(error = %err, "Could not repaint the root background");
                }
            }
            Err(err) => eprintln!("folio: {err}"),
        }
    }

    println!("folio: {}", shell.status());

    if let Some(path) = cli.path.as_deref() {
        render_entry(path);
    }

    if io::stdout().is_terminal() {
        let _ = execute!(io::stdout(), ResetColor);
    }
}

/// Set the base background directly on the terminal, before any content.
fn paint_root(surface: &RootSurface) -> io::Result<()> {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return Ok(());
    }
    let (r, g, b) = surface.marker().base_background_rgb();
    execute!(
        stdout,
        SetBackgroundColor(Color::Rgb { r, g, b }),
        Clear(ClearType::All),
        MoveTo(0, 0)
    )
}

fn render_entry(path: &Path) {
    if path.is_dir() {
        let library = Library::new(path);
        match library.documents() {
            Ok(documents) if documents.is_empty() => {
                println!("library: no documents in {}", path.display());
            }
            Ok(documents) => {
                println!("library: {} document(s)", documents.len());
                for document in documents {
                    println!("  {}", document.display());
                }
            }
            Err(err) => eprintln!("folio: {err}"),
        }
    } else {
        match OpenDocument::open(path) {
            Ok(document) => {
                println!("reader: {} (content rendering not implemented yet)", document.title());
            }
            Err(err) => eprintln!("folio: {err}"),
        }
    }
}
