use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Where the session (user + token) is persisted between runs.
    pub session_path: String,
    /// Directory CSV exports are written to.
    pub export_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            session_path: "config/session.json".to_string(),
            export_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "finboard_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the session file path.
    #[arg(long)]
    session: Option<String>,
    /// Override the CSV export directory.
    #[arg(long)]
    export_dir: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINBOARD_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(session) = args.session {
        settings.session_path = session;
    }
    if let Some(export_dir) = args.export_dir {
        settings.export_dir = export_dir;
    }

    Ok(settings)
}
