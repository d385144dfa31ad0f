use std::fs::{self, File};
use std::sync::Mutex;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tigrinja_core::{
    ApiClient, ChatSession, Config, ConfigStore, MemoryStore, PreferenceStore, ReplyLanguage,
    SystemOpener, UiLanguage, UiLanguageState,
};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;

#[derive(Parser)]
#[command(name = "tigrinja")]
#[command(about = "Chat with Tigrinja AI in Tigrinya, English, Norwegian, Arabic or Amharic")]
#[command(version)]
struct Cli {
    /// Base URL of the chat service
    #[arg(long)]
    api_url: Option<String>,
    /// Language replies are written in (en, ti, no, ar, am)
    #[arg(short, long)]
    reply_lang: Option<String>,
    /// Interface language (ti, en, no); saved as the new preference
    #[arg(short, long)]
    ui_lang: Option<String>,
}

/// Log to a file under the cache directory; the terminal belongs to the UI.
fn init_logging() -> Result<()> {
    let Some(cache_dir) = dirs::cache_dir() else {
        return Ok(());
    };
    let log_dir = cache_dir.join("tigrinja");
    fs::create_dir_all(&log_dir)?;
    let file = File::create(log_dir.join("tigrinja.log"))?;

    let filter = EnvFilter::try_from_env("TIGRINJA_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn preference_store() -> Box<dyn PreferenceStore> {
    match ConfigStore::default_location() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("No config directory, UI language will not persist: {}", e);
            Box::new(MemoryStore::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {}", e);
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring config: {}", e);
        Config::new()
    });

    let api_url = cli
        .api_url
        .unwrap_or_else(|| config.api_base_url().to_string());

    let reply_lang = match cli.reply_lang.as_deref() {
        Some(code) => ReplyLanguage::from_code(code)
            .ok_or_else(|| anyhow::anyhow!("Unknown reply language: {}", code))?,
        None => config.reply_language(),
    };

    let mut ui = UiLanguageState::init(preference_store());
    if let Some(code) = cli.ui_lang.as_deref() {
        let lang = UiLanguage::from_code(code)
            .ok_or_else(|| anyhow::anyhow!("Unknown interface language: {}", code))?;
        if let Err(e) = ui.set(lang) {
            tracing::warn!("Could not save UI language: {}", e);
        }
    }

    tracing::info!(
        "Starting against {} (ui: {}, replies: {})",
        api_url,
        ui.current().as_str(),
        reply_lang.as_str()
    );

    let session = ChatSession::new(ApiClient::new(&api_url), ui, reply_lang, Box::new(SystemOpener));
    let mut app = App::new(session);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    let result = run(&mut app, &mut terminal, &mut events).await;

    tui::restore()?;
    result
}

async fn run(app: &mut App, terminal: &mut tui::Tui, events: &mut tui::EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }

        app.poll_tasks().await;
    }
    Ok(())
}
