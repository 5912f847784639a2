//! Keyboard navigation over the previously rendered frame.
//!
//! The cursor lives in the pixel space of the last raster. Each command moves
//! it or changes the zoom divisor / iteration cap, and yields a square
//! candidate rectangle in that same pixel space. Turning the candidate into a
//! plane rectangle is left to [`fractnav_core::ViewportMapper`].

use tracing::debug;

use fractnav_core::PixelRect;
use fractnav_render::{overlay, RenderBuffer};

use crate::display::{FrameDisplay, Hud};
use crate::error::AppError;
use crate::keys::{Command, Key, KeyBindings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Navigating,
}

/// Cursor, steps, divisors and iteration cap of one navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorState {
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub step_x: i32,
    pub step_y: i32,
    pub zoom_divisor_x: i32,
    pub zoom_divisor_y: i32,
    pub iter_max: u32,
}

/// Tunables applied when a navigation session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorLimits {
    pub iter_step: u32,
    pub iter_min: u32,
    pub initial_divisor: i32,
    /// Pan step is `frame_dimension / step_fraction`.
    pub step_fraction: i32,
}

impl Default for NavigatorLimits {
    fn default() -> Self {
        Self {
            iter_step: 100,
            iter_min: 100,
            initial_divisor: 10,
            step_fraction: 100,
        }
    }
}

/// What the operator committed with `Cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub rect: PixelRect,
    pub iter_max: u32,
}

#[derive(Debug, Clone)]
pub struct InteractiveNavigator {
    state: NavState,
    nav: NavigatorState,
    frame_width: i32,
    frame_height: i32,
    limits: NavigatorLimits,
    last_key: Option<Key>,
}

impl InteractiveNavigator {
    pub fn new(limits: NavigatorLimits) -> Self {
        Self {
            state: NavState::Idle,
            nav: NavigatorState {
                cursor_x: 0,
                cursor_y: 0,
                step_x: 1,
                step_y: 1,
                zoom_divisor_x: limits.initial_divisor.max(1),
                zoom_divisor_y: limits.initial_divisor.max(1),
                iter_max: limits.iter_min,
            },
            frame_width: 0,
            frame_height: 0,
            limits,
            last_key: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> NavState {
        self.state
    }

    #[cfg(test)]
    pub fn nav(&self) -> &NavigatorState {
        &self.nav
    }

    #[cfg(test)]
    pub fn last_key(&self) -> Option<Key> {
        self.last_key
    }

    /// Load a new base frame: cursor to its centre, steps and divisors reset.
    pub fn begin(&mut self, frame_width: i32, frame_height: i32, iter_max: u32) -> PixelRect {
        let fraction = self.limits.step_fraction.max(1);
        let divisor = self.limits.initial_divisor.max(1);
        self.frame_width = frame_width;
        self.frame_height = frame_height;
        self.nav = NavigatorState {
            cursor_x: frame_width / 2,
            cursor_y: frame_height / 2,
            step_x: (frame_width / fraction).max(1),
            step_y: (frame_height / fraction).max(1),
            zoom_divisor_x: divisor,
            zoom_divisor_y: divisor,
            iter_max,
        };
        self.last_key = None;
        self.state = NavState::Navigating;
        debug!(frame_width, frame_height, iter_max, "Navigation started");
        self.candidate()
    }

    /// Square around the cursor with half-size `frame_width / divisor`.
    pub fn candidate(&self) -> PixelRect {
        let half_w = self.frame_width / self.nav.zoom_divisor_x;
        let half_h = self.frame_width / self.nav.zoom_divisor_y;
        PixelRect {
            x1: self.nav.cursor_x - half_w,
            x2: self.nav.cursor_x + half_w,
            y1: self.nav.cursor_y - half_h,
            y2: self.nav.cursor_y + half_h,
        }
    }

    /// Apply one command and return the refreshed candidate.
    ///
    /// Ignored while idle.
    pub fn apply(&mut self, command: Command) -> PixelRect {
        if self.state == NavState::Idle {
            return self.candidate();
        }
        let nav = &mut self.nav;
        match command {
            Command::PanUp => nav.cursor_y = (nav.cursor_y - nav.step_y).clamp(0, self.frame_height),
            Command::PanDown => nav.cursor_y = (nav.cursor_y + nav.step_y).clamp(0, self.frame_height),
            Command::PanLeft => nav.cursor_x = (nav.cursor_x - nav.step_x).clamp(0, self.frame_width),
            Command::PanRight => nav.cursor_x = (nav.cursor_x + nav.step_x).clamp(0, self.frame_width),
            Command::ZoomIn => {
                nav.zoom_divisor_x += 1;
                nav.zoom_divisor_y += 1;
            }
            Command::ZoomOut => {
                nav.zoom_divisor_x = (nav.zoom_divisor_x - 1).max(1);
                nav.zoom_divisor_y = (nav.zoom_divisor_y - 1).max(1);
            }
            Command::IterInc => nav.iter_max = nav.iter_max.saturating_add(self.limits.iter_step),
            Command::IterDec => {
                if nav.iter_max > self.limits.iter_min {
                    nav.iter_max = nav
                        .iter_max
                        .saturating_sub(self.limits.iter_step)
                        .max(self.limits.iter_min)
                }
            }
            Command::Confirm => {}
            Command::Cancel => self.state = NavState::Idle,
        }
        self.candidate()
    }

    /// Run the interactive loop over `raster` until the commit key.
    ///
    /// Returns `Ok(None)` when the display has no more input.
    pub fn navigate<D: FrameDisplay + ?Sized>(
        &mut self,
        display: &mut D,
        bindings: &KeyBindings,
        raster: &RenderBuffer,
        mut hud: Hud,
    ) -> Result<Option<Selection>, AppError> {
        let mut rect = self.begin(raster.width as i32, raster.height as i32, hud.iter_max);
        hud.legend = bindings.legend();
        loop {
            hud.cursor = (self.nav.cursor_x, self.nav.cursor_y);
            hud.zoom_divisor = self.nav.zoom_divisor_x;
            hud.iter_max = self.nav.iter_max;
            hud.last_key = self.last_key;
            let preview = overlay::navigation_preview(raster, hud.cursor, rect);

            let Some(key) = display.show(&preview, &hud)? else {
                self.state = NavState::Idle;
                debug!("Display input closed during navigation");
                return Ok(None);
            };
            self.last_key = Some(key);
            let command = bindings.resolve(key);
            rect = self.apply(command);
            debug!(?key, ?command, ?rect, "Navigation step");

            if self.state == NavState::Idle {
                return Ok(Some(Selection {
                    rect,
                    iter_max: self.nav.iter_max,
                }));
            }
        }
    }
}
