mod analytics;
mod app;
mod contact;
mod content;
mod logging;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use folio_config::Config;
use folio_core::{Motion, REDUCED_MOTION_ENV};
use ratatui::DefaultTerminal;
use tracing::info;

use crate::app::App;
use crate::contact::{ContactForm, UreqTransport};
use crate::logging::LOG_ENV;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "A terminal portfolio with an animated aurora mesh background"
)]
struct Args {
    /// Path to the config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw one static background frame instead of animating.
    #[arg(long)]
    reduced_motion: bool,

    /// TOML file with portfolio content.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Contact form endpoint, overriding the config file.
    #[arg(long, env = "FOLIO_CONTACT_ENDPOINT")]
    endpoint: Option<String>,

    /// Write a config file with the defaults and exit.
    #[arg(long)]
    write_default_config: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if self.reduced_motion {
            config.background.motion = Motion::Reduced;
        }
        if let Some(path) = &self.content {
            config.content.path = Some(path.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.contact.endpoint = Some(endpoint.clone());
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    if args.write_default_config {
        Config::default().save_to(&config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_from(&config_path)?;
    args.apply(&mut config);

    let filter = logging::filter_from(std::env::var(LOG_ENV).ok().as_deref(), &config.log.filter);
    let _log_guard = logging::init_logging(config.log_dir().as_deref(), filter);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "folio starting"
    );

    let portfolio = match &config.content.path {
        Some(path) => content::load(path)?,
        None => content::built_in(),
    };
    let transport = Arc::new(UreqTransport::new(Duration::from_secs(
        config.contact.timeout_secs,
    )));
    let form = ContactForm::new(config.contact.endpoint.clone(), transport);
    let reduced_motion_env = std::env::var(REDUCED_MOTION_ENV).ok();
    let app = App::new(
        portfolio,
        form,
        config.background.clone(),
        reduced_motion_env.as_deref(),
    );

    let terminal = ratatui::init();
    let result = run(app, terminal);
    let _ = execute!(stdout(), DisableFocusChange, DisableMouseCapture);
    ratatui::restore();
    info!("folio exited");
    result
}

fn run(app: App, terminal: DefaultTerminal) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
    app.run(terminal)
}
