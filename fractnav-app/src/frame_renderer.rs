//! Frame orchestration: navigate, zoom, render, hand off, repeat.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, error, info};

use fractnav_core::{
    CoordinateSystem, EscapeParams, Formula, PlaneRect, ViewportMapper, ZoomHistory,
};
use fractnav_render::{compute_iteration_field, ColorMapper, FrameMeta, RenderBuffer};

use crate::display::{FrameDisplay, Hud};
use crate::error::AppError;
use crate::keys::KeyBindings;
use crate::navigator::{InteractiveNavigator, NavigatorLimits};
use crate::preferences::AppPreferences;
use crate::sink::{RasterFormat, RasterSink};

/// Everything a session needs, resolved from preferences and flags.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub width: i32,
    pub height: i32,
    pub initial: PlaneRect,
    pub params: EscapeParams,
    pub formula: Formula,
    pub coloring: ColorMapper,
    /// Plane height/width enforced by every zoom.
    pub window_ratio: f64,
    pub interactive: bool,
    pub max_frames: u32,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub format: RasterFormat,
    /// Persist the zoom history after each frame.
    pub save_history: bool,
    pub limits: NavigatorLimits,
    pub bindings: KeyBindings,
}

impl SessionConfig {
    pub fn from_preferences(
        prefs: &AppPreferences,
        output_dir: PathBuf,
        max_frames: u32,
    ) -> Result<Self, AppError> {
        if prefs.width <= 0 || prefs.height <= 0 {
            return Err(AppError::InvalidScreen {
                width: prefs.width,
                height: prefs.height,
            });
        }
        let params = EscapeParams::new(prefs.max_iterations, prefs.threshold)?;
        let window_ratio = prefs
            .window_ratio
            .unwrap_or(prefs.height as f64 / prefs.width as f64);
        Ok(Self {
            width: prefs.width,
            height: prefs.height,
            initial: PlaneRect {
                x1: prefs.x1,
                x2: prefs.x2,
                y1: prefs.y1,
                y2: prefs.y2,
            },
            params,
            formula: prefs.formula,
            coloring: prefs.coloring,
            window_ratio,
            interactive: prefs.interactive,
            max_frames,
            output_dir,
            file_prefix: prefs.file_prefix.clone(),
            format: prefs.format,
            save_history: prefs.write_to_disk,
            limits: NavigatorLimits {
                iter_step: prefs.iter_step,
                iter_min: prefs.iter_min,
                ..NavigatorLimits::default()
            },
            bindings: prefs.key_bindings.clone(),
        })
    }
}

/// What a finished session did.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub frames: u32,
    pub history_len: usize,
    /// Input ran out before `max_frames`.
    pub stopped_early: bool,
    pub last_bounds: PlaneRect,
    pub iter_max: u32,
}

pub struct FrameRenderer {
    config: SessionConfig,
    screen: CoordinateSystem<i32>,
    plane: CoordinateSystem<f64>,
    params: EscapeParams,
    navigator: InteractiveNavigator,
}

impl FrameRenderer {
    pub fn new(config: SessionConfig) -> Self {
        let init = config.initial;
        Self {
            screen: CoordinateSystem::new(0, config.width, 0, config.height),
            plane: CoordinateSystem::new(init.x1, init.x2, init.y1, init.y2),
            params: config.params,
            navigator: InteractiveNavigator::new(config.limits),
            config,
        }
    }

    /// Resume an earlier session: start at its last view and continue its
    /// numbering. An empty history leaves the initial view in place.
    pub fn with_history(mut self, history: ZoomHistory) -> Self {
        if let Some(last) = history.last() {
            self.plane.reset(last.x1, last.x2, last.y1, last.y2);
            info!(
                entries = history.len(),
                view = %self.plane,
                "Resuming from saved history"
            );
        }
        self.plane = self.plane.with_history(history);
        self
    }

    #[cfg(test)]
    pub fn history(&self) -> &ZoomHistory {
        self.plane.history()
    }

    pub fn history_path(&self) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.fhistory", self.config.file_prefix))
    }

    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.config.output_dir.join(format!(
            "{}.{:03}.{}",
            self.config.file_prefix,
            index,
            self.config.format.extension()
        ))
    }

    /// Render up to `max_frames` frames. With a display and interactive mode
    /// on, every frame after the first is chosen by navigating the previous
    /// one; otherwise the view never moves.
    pub fn run(
        &mut self,
        sink: &mut dyn RasterSink,
        mut display: Option<&mut dyn FrameDisplay>,
    ) -> Result<SessionSummary, AppError> {
        let started = Instant::now();
        let mut last: Option<RenderBuffer> = None;
        let mut frames = 0;
        let mut stopped_early = false;

        for index in 0..self.config.max_frames {
            let mut target = PlaneRect::of(&self.plane);
            if let (true, Some(raster), Some(display)) =
                (self.config.interactive, last.as_ref(), display.as_deref_mut())
            {
                let hud = Hud {
                    frame: index,
                    bounds: Some(target),
                    ..Hud::new(self.params.iter_max)
                };
                match self
                    .navigator
                    .navigate(display, &self.config.bindings, raster, hud)?
                {
                    Some(selection) => {
                        target = ViewportMapper::pixel_rect_to_plane(
                            &self.screen,
                            &self.plane,
                            selection.rect,
                        );
                        self.params = self.params.with_iter_max(selection.iter_max);
                    }
                    None => {
                        info!(frames, "Input exhausted, ending session");
                        stopped_early = true;
                        break;
                    }
                }
            }

            self.plane.zoom(
                self.config.window_ratio,
                target.x1,
                target.x2,
                target.y1,
                target.y2,
            );
            last = Some(self.render_frame(index, sink));
            frames += 1;
        }

        info!(
            frames,
            elapsed_ms = started.elapsed().as_millis(),
            "Session finished"
        );
        Ok(self.summary(frames, stopped_early))
    }

    /// Render every viewport of `history` in order, without navigation.
    pub fn replay(
        &mut self,
        history: &ZoomHistory,
        sink: &mut dyn RasterSink,
    ) -> Result<SessionSummary, AppError> {
        info!(views = history.len(), "Replaying history");
        let mut frames = 0;
        for (index, entry) in history.iter().enumerate() {
            let span = entry.x2 - entry.x1;
            let ratio = if span != 0.0 {
                (entry.y2 - entry.y1) / span
            } else {
                self.config.window_ratio
            };
            self.plane.zoom(ratio, entry.x1, entry.x2, entry.y1, entry.y2);
            self.render_frame(index as u32, sink);
            frames += 1;
        }
        Ok(self.summary(frames, false))
    }

    /// Render the current view as frame `index`, hand it to `sink`, and save
    /// the history. Collaborator failures are logged, never propagated.
    pub fn render_frame(&mut self, index: u32, sink: &mut dyn RasterSink) -> RenderBuffer {
        let field = compute_iteration_field(
            &self.screen,
            &self.plane,
            &self.params,
            &self.config.formula,
        );
        let raster = self.config.coloring.colorize(&field);

        let meta = FrameMeta {
            frame_number: index,
            bounds: PlaneRect::of(&self.plane),
            iter_max: self.params.iter_max,
            formula: self.config.formula.label().to_string(),
            coloring: self.config.coloring.label().to_string(),
        };
        let path = self.frame_path(index);
        match sink.write(&raster, &path, &meta) {
            Ok(()) => debug!("Frame {index:03} handed to sink at {}", path.display()),
            Err(e) => error!("Frame {index:03} not written: {e}"),
        }

        if self.config.save_history {
            self.save_history(&self.history_path());
        }
        info!(
            frame = index,
            view = %self.plane,
            iter_max = self.params.iter_max,
            "Frame rendered"
        );
        raster
    }

    fn save_history(&self, path: &Path) {
        if let Err(e) = self.plane.history().save(path) {
            error!("History not saved: {e}");
        }
    }

    fn summary(&self, frames: u32, stopped_early: bool) -> SessionSummary {
        SessionSummary {
            frames,
            history_len: self.plane.history().len(),
            stopped_early,
            last_bounds: PlaneRect::of(&self.plane),
            iter_max: self.params.iter_max,
        }
    }
}
