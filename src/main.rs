use std::path::PathBuf;

use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;

use pachinko::core::config::MISSING_FILE;
use pachinko::{GameConfig, GamePlugin};

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];

#[derive(Parser, Debug)]
#[command(name = "pachinko", version, about = "Drop balls, hit the green slots, dodge the red ones")]
struct Cli {
    /// RON config file(s), merged in order. Defaults to assets/config/game.ron (+ game.local.ron).
    #[arg(long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    /// Exit after this many seconds (overrides window.autoClose).
    #[arg(long, value_name = "SECS")]
    auto_close: Option<f32>,
    /// Seed the session RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

/// What the config loader did, logged once the log plugin is up.
#[derive(Resource, Debug, Default)]
struct ConfigReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn log_config_report(report: Res<ConfigReport>) {
    for path in &report.used {
        info!(target: "config", "loaded {path}");
    }
    for e in &report.errors {
        warn!(target: "config", "{e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "validation: {w}");
    }
}

/// A missing optional local override is not worth a warning; anything else about it is.
fn worth_reporting(error: &str, explicit: bool) -> bool {
    explicit || !(error.contains("game.local.ron") && error.ends_with(MISSING_FILE))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let explicit = !cli.config.is_empty();
    let paths: Vec<PathBuf> = if explicit {
        cli.config.clone()
    } else {
        DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect()
    };

    let (mut cfg, used, errors) = GameConfig::load_layered(&paths);
    if explicit && used.is_empty() {
        bail!("no usable config among {:?}: {}", paths, errors.join("; "));
    }
    let errors: Vec<String> = errors
        .into_iter()
        .filter(|e| worth_reporting(e, explicit))
        .collect();
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    let warnings = cfg.validate();

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ConfigReport {
            used,
            errors,
            warnings,
        })
        .insert_resource(cfg)
        .add_systems(Startup, log_config_report)
        .add_plugins(GamePlugin)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("exited with code {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_missing_default_local_override_is_silent() {
        assert!(!worth_reporting(
            "assets/config/game.local.ron: not found",
            false
        ));
        assert!(worth_reporting(
            "assets/config/game.local.ron: parse error: 1:3: Expected closing `)`",
            false
        ));
        assert!(worth_reporting(
            "assets/config/game.local.ron: read error: permission denied",
            false
        ));
        assert!(worth_reporting("assets/config/game.ron: not found", false));
        assert!(worth_reporting("assets/config/game.local.ron: not found", true));
    }
}
