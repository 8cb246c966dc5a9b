mod app;
mod audio;
mod domain;
mod input;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use audio::CueDispatcher;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{ensure_nightfall_dir, load_settings, settings_file, sounds_dir};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "nightfall")]
#[command(about = "A terminal countdown timer for the two-night event cycle, with audio cues", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings file and the current cue settings record
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config) => {
            let path = settings_file()?;
            let settings = load_settings(&path);
            println!("Settings file: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    ensure_nightfall_dir()?;

    let settings_path = settings_file()?;
    let settings = load_settings(&settings_path);
    let dispatcher = CueDispatcher::new(sounds_dir()?);
    let mut app = AppState::new(settings, dispatcher);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save_settings() {
        eprintln!("Error saving settings: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events, blocking at most until the next tick is due
        let timeout = app.ticker.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Deliver due ticks
        while app.ticker.tick_due(Instant::now()) {
            app.tick();
        }

        // Settings are persisted after the state change that produced them
        if app.needs_save {
            app.save_settings()?;
        }
    }
}
