use anyhow::Context;
use clap::Parser;

use filetrek::app::settings::{self, config_dirs, load_settings_from, Settings};
use filetrek::app::Explorer;
use filetrek::logging::{init_logging, LogTarget};
use filetrek::runner::cli::{execute, Cli};
use filetrek::runner::run_app;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings_file = match &cli.config {
        Some(path) => Some(path.clone()),
        None => config_dirs::settings_path().ok(),
    };
    let mut settings = match &settings_file {
        Some(path) => load_settings_from(path)?,
        None => Settings::default(),
    };
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }

    let start = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("reading current directory")?,
    };

    match &cli.command {
        Some(cmd) => {
            let _guard = init_logging(LogTarget::Stderr, cli.verbose)?;
            let mut explorer = Explorer::new(start, settings)?;
            let stdout = std::io::stdout();
            if let Err(e) = execute(cmd, &mut explorer, &mut stdout.lock()) {
                tracing::debug!(error = ?e, "command failed");
                eprintln!("{}", filetrek::errors::render(&e));
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            let target = match (&settings.log_file, config_dirs::user_cache_dir()) {
                (Some(file), _) => LogTarget::File(file.clone()),
                (None, Ok(cache)) => LogTarget::Dir(cache.join("logs")),
                (None, Err(_)) => LogTarget::Stderr,
            };
            let _guard = init_logging(target, cli.verbose)?;
            if let Err(e) = settings::ensure_dirs_exist() {
                tracing::warn!(error = %e, "config directories unavailable");
            }

            let mut explorer = Explorer::new(start, settings)?;
            if let Ok(history) = config_dirs::recent_path() {
                explorer = explorer.with_history_file(history);
            }
            if let Some(path) = settings_file {
                explorer = explorer.with_settings_file(path);
            }
            run_app(explorer)
        }
    }
}
