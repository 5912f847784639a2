//! Command-line flags. Anything left unset falls back to preferences.

use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint};

use fractnav_core::Formula;
use fractnav_render::ColorMapper;

use crate::preferences::AppPreferences;
use crate::sink::RasterFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Coloring {
    /// Base-256 digits of the scaled escape count
    Piecewise,
    /// Bernstein-style polynomial palette
    Smooth,
}

#[derive(Debug, Parser)]
#[command(
    name = "fractnav",
    version,
    about = "Escape-time fractal renderer with keyboard zoom navigation"
)]
pub struct Cli {
    /// Left edge of the initial view
    #[arg(long, allow_hyphen_values = true)]
    pub x1: Option<f64>,
    /// Top edge of the initial view (raster row 0)
    #[arg(long, allow_hyphen_values = true)]
    pub y1: Option<f64>,
    /// Right edge of the initial view
    #[arg(long, allow_hyphen_values = true)]
    pub x2: Option<f64>,
    /// Bottom edge of the initial view (last raster row)
    #[arg(long, allow_hyphen_values = true)]
    pub y2: Option<f64>,

    /// Raster width in pixels
    #[arg(long)]
    pub width: Option<i32>,
    /// Raster height in pixels
    #[arg(long)]
    pub height: Option<i32>,
    /// Initial iteration cap
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Navigate between frames with the keyboard
    #[arg(long)]
    pub interactive: bool,
    /// Render without writing any files
    #[arg(long)]
    pub no_write: bool,
    /// Root directory for session output
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,
    /// Number of frames to render
    #[arg(long)]
    pub frames: Option<u32>,

    #[arg(long, value_enum)]
    pub coloring: Option<Coloring>,
    /// mandelbrot, tilted, cubic or quartic
    #[arg(long)]
    pub formula: Option<Formula>,
    #[arg(long, value_enum)]
    pub format: Option<RasterFormat>,

    /// Space-separated key script replacing terminal input (e.g. "+ + left esc")
    #[arg(long)]
    pub keys: Option<String>,
    /// Re-render every view recorded in a history file
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with_all = ["interactive", "keys"])]
    pub replay: Option<PathBuf>,
    /// Continue a saved history: start at its last view and keep its numbering
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "replay")]
    pub resume: Option<PathBuf>,
    /// Preferences file (defaults to preferences.json next to the executable)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Write the effective preferences (file plus flags) back to the preferences file
    #[arg(long)]
    pub save_config: bool,
    /// PNG refreshed with each navigation preview
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub preview: Option<PathBuf>,
}

impl Cli {
    /// `true` when frames are driven by keys (terminal or scripted).
    pub fn navigates(&self, prefs: &AppPreferences) -> bool {
        self.interactive || self.keys.is_some() || prefs.interactive
    }

    /// Overlay the flags on `prefs`.
    pub fn apply(&self, mut prefs: AppPreferences) -> AppPreferences {
        prefs.x1 = self.x1.unwrap_or(prefs.x1);
        prefs.y1 = self.y1.unwrap_or(prefs.y1);
        prefs.x2 = self.x2.unwrap_or(prefs.x2);
        prefs.y2 = self.y2.unwrap_or(prefs.y2);
        prefs.width = self.width.unwrap_or(prefs.width);
        prefs.height = self.height.unwrap_or(prefs.height);
        prefs.max_iterations = self.iterations.unwrap_or(prefs.max_iterations);
        prefs.interactive = self.navigates(&prefs);
        if self.no_write {
            prefs.write_to_disk = false;
        }
        if let Some(dir) = &self.out_dir {
            prefs.output_dir = dir.display().to_string();
        }
        if let Some(coloring) = self.coloring {
            prefs.coloring = ColorMapper::from_smooth(coloring == Coloring::Smooth);
        }
        prefs.formula = self.formula.unwrap_or(prefs.formula);
        prefs.format = self.format.unwrap_or(prefs.format);
        if let Some(preview) = &self.preview {
            prefs.preview_path = preview.display().to_string();
        }
        prefs
    }

    /// Frame count: `--frames`, else the preference cap when navigating, else one.
    pub fn frame_count(&self, prefs: &AppPreferences) -> u32 {
        self.frames
            .unwrap_or(if prefs.interactive { prefs.max_frames } else { 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_preferences() {
        let cli = Cli::parse_from([
            "fractnav", "--x1", "-1.5", "--width", "64", "--iterations", "80", "--coloring",
            "piecewise", "--formula", "cubic", "--format", "bmp", "--no-write",
        ]);
        let prefs = cli.apply(AppPreferences::default());
        assert_eq!(prefs.x1, -1.5);
        assert_eq!(prefs.y1, -1.7);
        assert_eq!(prefs.width, 64);
        assert_eq!(prefs.height, 900);
        assert_eq!(prefs.max_iterations, 80);
        assert_eq!(prefs.coloring, ColorMapper::PiecewiseLinear);
        assert_eq!(prefs.formula, Formula::Cubic);
        assert_eq!(prefs.format, RasterFormat::Bmp);
        assert!(!prefs.write_to_disk);
        assert!(!prefs.interactive);
        assert_eq!(cli.frame_count(&prefs), 1);
    }

    #[test]
    fn key_script_implies_navigation() {
        let cli = Cli::parse_from(["fractnav", "--keys", "+ esc"]);
        let prefs = cli.apply(AppPreferences::default());
        assert!(prefs.interactive);
        assert_eq!(cli.frame_count(&prefs), 1000);
    }

    #[test]
    fn explicit_frame_count_wins() {
        let cli = Cli::parse_from(["fractnav", "--interactive", "--frames", "3"]);
        let prefs = cli.apply(AppPreferences::default());
        assert_eq!(cli.frame_count(&prefs), 3);
    }

    #[test]
    fn resume_and_replay_are_exclusive() {
        assert!(Cli::try_parse_from(["fractnav", "--resume", "a.fhistory", "--replay", "b.fhistory"]).is_err());
        let cli = Cli::parse_from(["fractnav", "--resume", "a.fhistory", "--save-config"]);
        assert_eq!(cli.resume.as_deref(), Some(std::path::Path::new("a.fhistory")));
        assert!(cli.save_config);
    }

    #[test]
    fn replay_conflicts_with_interactive() {
        assert!(Cli::try_parse_from(["fractnav", "--replay", "h.fhistory", "--interactive"]).is_err());
    }
}
