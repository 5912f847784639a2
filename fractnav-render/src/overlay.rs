//! Cosmetic drawing on top of a rendered frame: the navigation cursor and the
//! candidate selection box.

use fractnav_core::PixelRect;

use crate::buffer::RenderBuffer;

pub const CROSSHAIR_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const SELECTION_COLOR: [u8; 4] = [0, 255, 0, 255];

/// Half-length of the crosshair arms in pixels.
const CROSSHAIR_ARM: i32 = 8;

/// Draw a `+` centred on `(x, y)`. Clipped at the image edges.
pub fn draw_crosshair(buf: &mut RenderBuffer, x: i32, y: i32, color: [u8; 4]) {
    for d in -CROSSHAIR_ARM..=CROSSHAIR_ARM {
        buf.set_pixel(x + d, y, color);
        buf.set_pixel(x, y + d, color);
    }
}

/// Draw the one-pixel outline of `rect`. Clipped at the image edges.
pub fn draw_rect(buf: &mut RenderBuffer, rect: PixelRect, color: [u8; 4]) {
    let (x1, x2) = (rect.x1.min(rect.x2), rect.x1.max(rect.x2));
    let (y1, y2) = (rect.y1.min(rect.y2), rect.y1.max(rect.y2));
    for x in x1..=x2 {
        buf.set_pixel(x, y1, color);
        buf.set_pixel(x, y2, color);
    }
    for y in y1..=y2 {
        buf.set_pixel(x1, y, color);
        buf.set_pixel(x2, y, color);
    }
}

/// A copy of `base` with the cursor and selection drawn in.
pub fn navigation_preview(base: &RenderBuffer, cursor: (i32, i32), selection: PixelRect) -> RenderBuffer {
    let mut out = base.clone();
    draw_rect(&mut out, selection, SELECTION_COLOR);
    draw_crosshair(&mut out, cursor.0, cursor.1, CROSSHAIR_COLOR);
    out
}
