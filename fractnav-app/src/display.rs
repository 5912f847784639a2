//! Where navigation previews are shown and keys come from.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use fractnav_core::PlaneRect;
use fractnav_render::RenderBuffer;

use crate::error::AppError;
use crate::keys::Key;

/// Heads-up text shown next to each preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    pub frame: u32,
    pub bounds: Option<PlaneRect>,
    pub iter_max: u32,
    pub cursor: (i32, i32),
    pub zoom_divisor: i32,
    pub last_key: Option<Key>,
    pub legend: String,
}

impl Hud {
    pub fn new(iter_max: u32) -> Self {
        Self {
            iter_max,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("frame {:03}  max iterations {}", self.frame, self.iter_max)];
        if let Some(b) = self.bounds {
            lines.push(format!("re [{:.6e}, {:.6e}]  im [{:.6e}, {:.6e}]", b.x1, b.x2, b.y1, b.y2));
        }
        lines.push(format!(
            "cursor ({}, {})  zoom 1/{}",
            self.cursor.0, self.cursor.1, self.zoom_divisor
        ));
        if let Some(key) = self.last_key {
            lines.push(format!("last key {key}"));
        }
        if !self.legend.is_empty() {
            lines.push(self.legend.clone());
        }
        lines
    }
}

/// A surface that shows a frame and blocks for the next key.
pub trait FrameDisplay {
    /// `Ok(None)` means the input stream is closed.
    fn show(&mut self, frame: &RenderBuffer, hud: &Hud) -> Result<Option<Key>, AppError>;
}

/// Replays a fixed list of keys. Used by `--keys` and tests.
#[derive(Debug, Default)]
pub struct ScriptedDisplay {
    keys: VecDeque<Key>,
    shown: usize,
    last_hud: Option<Hud>,
}

impl ScriptedDisplay {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            shown: 0,
            last_hud: None,
        }
    }

    /// Number of frames shown so far.
    #[cfg(test)]
    pub fn shown(&self) -> usize {
        self.shown
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub fn last_hud(&self) -> Option<&Hud> {
        self.last_hud.as_ref()
    }
}

impl FrameDisplay for ScriptedDisplay {
    fn show(&mut self, _frame: &RenderBuffer, hud: &Hud) -> Result<Option<Key>, AppError> {
        self.shown += 1;
        self.last_hud = Some(hud.clone());
        Ok(self.keys.pop_front())
    }
}

/// Raw-mode terminal input with the HUD printed on stdout.
///
/// Each frame (with overlay) is written to the preview path so an image
/// viewer that watches the file can follow along.
pub struct TerminalDisplay {
    preview_path: PathBuf,
}

impl TerminalDisplay {
    pub fn new(preview_path: PathBuf) -> Result<Self, AppError> {
        crossterm::terminal::enable_raw_mode().map_err(AppError::Terminal)?;
        debug!(?preview_path, "Terminal display ready");
        Ok(Self { preview_path })
    }

    fn write_preview(path: &Path, frame: &RenderBuffer) -> Result<(), AppError> {
        image::save_buffer_with_format(
            path,
            &frame.pixels,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|source| AppError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    fn print_hud(hud: &Hud) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "\r\n")?;
        for line in hud.lines() {
            write!(out, "{line}\r\n")?;
        }
        out.flush()
    }

    fn read_key() -> io::Result<Option<Key>> {
        loop {
            let Event::Key(ev) = event::read()? else {
                continue;
            };
            if ev.kind != KeyEventKind::Press {
                continue;
            }
            if ev.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(ev.code, KeyCode::Char('c') | KeyCode::Char('d'))
            {
                return Ok(None);
            }
            return Ok(Some(map_key_code(ev.code)));
        }
    }
}

impl FrameDisplay for TerminalDisplay {
    fn show(&mut self, frame: &RenderBuffer, hud: &Hud) -> Result<Option<Key>, AppError> {
        if let Err(e) = Self::write_preview(&self.preview_path, frame) {
            warn!("Preview not updated: {e}");
        }
        Self::print_hud(hud).map_err(AppError::Terminal)?;
        Self::read_key().map_err(AppError::Terminal)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

fn map_key_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Esc,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_display_drains_then_closes() {
        let mut d = ScriptedDisplay::new(vec![Key::Up, Key::Esc]);
        let buf = RenderBuffer::new(2, 2);
        let hud = Hud::new(100);
        assert_eq!(d.show(&buf, &hud).unwrap(), Some(Key::Up));
        assert_eq!(d.show(&buf, &hud).unwrap(), Some(Key::Esc));
        assert_eq!(d.show(&buf, &hud).unwrap(), None);
        assert_eq!(d.shown(), 3);
        assert_eq!(d.last_hud().map(|h| h.iter_max), Some(100));
    }

    #[test]
    fn hud_lines_include_state() {
        let hud = Hud {
            frame: 3,
            bounds: Some(PlaneRect { x1: -2.0, x2: 1.0, y1: -1.5, y2: 1.5 }),
            iter_max: 700,
            cursor: (10, 20),
            zoom_divisor: 12,
            last_key: Some(Key::Char('+')),
            legend: "commit Esc".into(),
        };
        let lines = hud.lines();
        assert_eq!(lines[0], "frame 003  max iterations 700");
        assert!(lines[1].starts_with("re [-2.000000e0"));
        assert_eq!(lines[2], "cursor (10, 20)  zoom 1/12");
        assert_eq!(lines[3], "last key +");
        assert_eq!(lines[4], "commit Esc");
    }

    #[test]
    fn key_codes_map_to_keys() {
        assert_eq!(map_key_code(KeyCode::Left), Key::Left);
        assert_eq!(map_key_code(KeyCode::Char('w')), Key::Char('w'));
        assert_eq!(map_key_code(KeyCode::Tab), Key::Other);
    }
}
