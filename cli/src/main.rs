use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use favlist_core::storage::{FavoriteStore, RestStore, SqliteStore};
use favlist_tui::{
    config::{load_config, Config, KeyBindings, StoreBackend},
    App, Event, EventHandler,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Record favorite things and list them newest first.
#[derive(Parser)]
#[command(name = "favlist", version)]
struct Cli {
    /// Path to the TOML config file (created with defaults if missing)
    #[arg(long, default_value = "favlist.toml")]
    config: PathBuf,
    /// Directory for the rolling log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logger(&cli.log_dir);

    let mut config = load_config(&cli.config).context("failed to load config")?;
    config
        .store
        .apply_env_overrides(|name| std::env::var(name).ok());
    let bindings = KeyBindings::from_keymap(&config.keymap)?;
    info!(
        config = %cli.config.display(),
        backend = ?config.store.backend,
        "starting favlist"
    );

    let store = open_store(&config)?;
    let mut app = App::with_bindings(store, config, bindings);

    let mut terminal = setup_terminal().context("failed to initialise the terminal")?;

    let result = run_app(&mut terminal, &mut app).await;

    restore_terminal(&mut terminal)?;

    if let Err(err) = result {
        error!(error = %err, "favlist exited with error");
        eprintln!("Error: {:?}", err);
    }
    info!("favlist stopped");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(err) => {
            // Leave the shell usable when setup fails half way
            let mut stdout = io::stdout();
            let _ = execute!(stdout, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(err.into())
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn open_store(config: &Config) -> Result<Box<dyn FavoriteStore>> {
    let store = &config.store;
    match store.backend {
        StoreBackend::Rest => {
            if store.url.is_empty() || store.api_key.is_empty() {
                bail!(
                    "the rest store needs a url and api key (set them in the config or via {} / {})",
                    favlist_tui::config::ENV_STORE_URL,
                    favlist_tui::config::ENV_STORE_KEY
                );
            }
            Ok(Box::new(RestStore::new(&store.url, &store.api_key)?))
        }
        StoreBackend::Sqlite => Ok(Box::new(
            SqliteStore::open(&store.sqlite_path).with_context(|| {
                format!("failed to open {}", store.sqlite_path.display())
            })?,
        )),
    }
}

async fn run_app<B, S>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()>
where
    B: ratatui::backend::Backend,
    S: FavoriteStore,
{
    let mut events = EventHandler::new(250);

    terminal.draw(|f| favlist_tui::ui::render(f, app))?;
    app.load().await;

    loop {
        terminal.draw(|f| favlist_tui::ui::render(f, app))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => favlist_tui::event::handle_key_event(key, app).await,
            Event::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn init_logger(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    if let Err(err) = fs::create_dir_all(log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "favlist.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,favlist_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_writer(writer)
        .init();

    guard
}
