//! LazyArt - browse the Art Institute of Chicago collection from the terminal.
//!
//! Parses the command line, loads configuration, sets up logging and the
//! terminal, then runs the event loop until the user quits.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use lazyart::api::ArticClient;
use lazyart::app::App;
use lazyart::config::Config;
use lazyart::error::AppError;
use lazyart::events::EventHandler;
use lazyart::logging;
use lazyart::tasks::create_task_channel;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Browse artworks and select rows across pages.
#[derive(Debug, Parser)]
#[command(name = "lazyart", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Rows per page, overriding the configuration file.
    #[arg(long, value_name = "ROWS")]
    page_size: Option<u32>,

    /// Catalog API base URL, overriding the configuration file.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Resolve the configuration path, honoring `--config`.
    fn config_path(&self) -> Result<PathBuf, AppError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Load the configuration and apply command-line overrides.
    fn load_config(&self) -> Result<Config, AppError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size)?;
        }
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone())?;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(&cli).await {
        error!(error = %e, critical = e.is_critical(), "Exiting with error");
        logging::shutdown();
        eprintln!("Error: {}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("{}", action);
        }
        // Runtime failures point at the logs
        if !e.is_critical() {
            if let Some(dir) = logging::log_directory() {
                eprintln!("Logs: {}", dir.display());
            }
        }
        std::process::exit(e.exit_code());
    }

    logging::shutdown();
    Ok(())
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;

    if cli.write_config {
        let path = cli.config_path()?;
        config.save_to(&path)?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let client = ArticClient::new(&config.api)?;
    info!(base_url = client.base_url(), "Catalog client ready");

    let mut terminal = setup_terminal().map_err(|e| AppError::terminal(e.to_string()))?;
    let result = event_loop(&mut terminal, &config, client).await;
    restore_terminal(&mut terminal).map_err(|e| AppError::terminal(e.to_string()))?;
    result
}

/// Run the application until it asks to quit.
async fn event_loop(terminal: &mut Tui, config: &Config, client: ArticClient) -> Result<(), AppError> {
    let mut app = App::new(config);
    let events = EventHandler::with_tick_rate(config.display.tick_rate_ms);
    let (mut rx, spawner) = create_task_channel();

    loop {
        if let Some((seq, request)) = app.take_pending_request() {
            spawner.spawn_fetch_page(&client, seq, request.page_number, request.page_size);
        }

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);

        if app.should_quit() {
            info!("Quit requested");
            return Ok(());
        }
    }
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    // Leave the terminal usable if anything panics while drawing
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}
