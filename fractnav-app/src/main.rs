mod app_dir;
mod cli;
mod display;
mod error;
mod frame_renderer;
mod keys;
mod navigator;
mod preferences;
mod sink;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use fractnav_core::ZoomHistory;

use cli::Cli;
use display::{FrameDisplay, ScriptedDisplay, TerminalDisplay};
use error::AppError;
use frame_renderer::{FrameRenderer, SessionConfig, SessionSummary};
use preferences::AppPreferences;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting FractNav");

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            let b = summary.last_bounds;
            info!(
                frames = summary.frames,
                history = summary.history_len,
                iter_max = summary.iter_max,
                stopped_early = summary.stopped_early,
                "Done, last view [{:.15}, {:.15}] x [{:.15}, {:.15}]",
                b.x1,
                b.x2,
                b.y1,
                b.y2
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<SessionSummary, AppError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(preferences::default_config_path);
    let prefs = cli.apply(AppPreferences::load(&config_path));
    if cli.save_config {
        prefs.save(&config_path)?;
    }

    let root = if prefs.output_dir.is_empty() {
        app_dir::default_output_root()
    } else {
        PathBuf::from(&prefs.output_dir)
    };
    let output_dir = app_dir::session_directory(&root);
    if prefs.write_to_disk {
        app_dir::ensure_dir(&output_dir)?;
        info!("Writing frames to {}", output_dir.display());
    }

    let config =
        SessionConfig::from_preferences(&prefs, output_dir.clone(), cli.frame_count(&prefs))?;
    let mut sink = sink::sink_for(prefs.format, prefs.write_to_disk);
    let mut renderer = FrameRenderer::new(config);
    if let Some(path) = &cli.resume {
        renderer = renderer.with_history(ZoomHistory::load(path));
    }

    if let Some(path) = &cli.replay {
        let history = ZoomHistory::load(path);
        return renderer.replay(&history, sink.as_mut());
    }

    let mut display: Option<Box<dyn FrameDisplay>> = match (&cli.keys, prefs.interactive) {
        (Some(script), _) => Some(Box::new(ScriptedDisplay::new(keys::parse_key_script(script)?))),
        (None, true) => {
            let preview =
                app_dir::preview_path(&prefs.preview_path, &output_dir, prefs.write_to_disk);
            info!("Navigation preview at {}", preview.display());
            Some(Box::new(TerminalDisplay::new(preview)?))
        }
        (None, false) => None,
    };
    match display.as_mut() {
        Some(d) => renderer.run(sink.as_mut(), Some(&mut **d)),
        None => renderer.run(sink.as_mut(), None),
    }
}
