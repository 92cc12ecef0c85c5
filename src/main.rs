//! modsort - reorder and toggle workshop mods from the terminal
//!
//! Loads the workshop record next to the executable, resolves mod titles in
//! the background and writes the new order back on save.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::{workshop, SteamWorkshopLookup, TitleCache};
use crate::tui::Tui;
use anyhow::{bail, Context, Result};
use crossterm::event::Event;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: modsort [--workshop <path>]";

struct Args {
    workshop: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args { workshop: None };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--workshop" => {
                let path = iter.next().context("--workshop needs a path")?;
                args.workshop = Some(PathBuf::from(path));
            }
            other => bail!("unexpected argument: {other}\n{USAGE}"),
        }
    }
    Ok(Some(args))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        println!("{USAGE}");
        return Ok(());
    };

    let base_dir = Config::base_dir();
    let (config, config_error) = match Config::load(&base_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let workshop_path = args
        .workshop
        .unwrap_or_else(|| config.workshop_path(&base_dir));

    // Checked before the terminal is touched so the message stays readable
    if !workshop_path.exists() {
        eprintln!("{} not found!", workshop_path.display());
        std::process::exit(1);
    }

    if let Err(e) = init_logging(&config.log_path(&base_dir)) {
        eprintln!("warning: logging disabled: {e:#}");
    }
    if let Some(e) = config_error {
        warn!(error = %e, "using default settings");
    }
    info!(workshop = %workshop_path.display(), "starting");

    let records = workshop::load(&workshop_path)?;
    let cache = TitleCache::load(&config.cache_path(&base_dir)).into_shared();
    let lookup = Arc::new(SteamWorkshopLookup::new(
        config.lookup_url.clone(),
        config.request_timeout(),
    ));
    let mut app = App::new(&config, workshop_path, records, cache, lookup);

    // Setup terminal
    let mut tui = Tui::new(config.tick_rate())?;
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = %format!("{err:#}"), "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - drain finished lookups
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_logging_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modsort.log");

        init_logging(&path).unwrap();
        info!(mods = 3, "mod list ready");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("mod list ready"));
        assert!(contents.contains("mods=3"));
        assert!(!contents.contains('\u{1b}'));
    }
}
