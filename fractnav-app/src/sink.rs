//! Raster sinks: where finished frames go.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fractnav_render::{export_png, FrameMeta, RenderBuffer};

use crate::error::AppError;

/// On-disk encoding of written frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    #[default]
    Png,
    Bmp,
    Jpg,
}

impl RasterFormat {
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Bmp => "bmp",
            RasterFormat::Jpg => "jpg",
        }
    }
}

pub trait RasterSink {
    fn write(&mut self, raster: &RenderBuffer, path: &Path, meta: &FrameMeta) -> Result<(), AppError>;
}

/// PNG with view metadata in tEXt chunks.
#[derive(Debug, Default)]
pub struct PngSink;

impl RasterSink for PngSink {
    fn write(&mut self, raster: &RenderBuffer, path: &Path, meta: &FrameMeta) -> Result<(), AppError> {
        export_png(raster, path, meta)?;
        Ok(())
    }
}

/// Any format the `image` crate can infer from the file extension.
/// Alpha is dropped since BMP and JPEG viewers handle RGB best.
#[derive(Debug, Default)]
pub struct ImageSink;

impl RasterSink for ImageSink {
    fn write(&mut self, raster: &RenderBuffer, path: &Path, _meta: &FrameMeta) -> Result<(), AppError> {
        let image_err = |source| AppError::Image {
            path: path.to_path_buf(),
            source,
        };
        let format = image::ImageFormat::from_path(path).map_err(image_err)?;
        image::save_buffer_with_format(
            path,
            &raster.to_rgb(),
            raster.width,
            raster.height,
            image::ColorType::Rgb8,
            format,
        )
        .map_err(image_err)?;
        debug!("Wrote {:?} {}x{} to {}", format, raster.width, raster.height, path.display());
        Ok(())
    }
}

/// Discards every frame (`--no-write`).
#[derive(Debug, Default)]
pub struct NullSink {
    pub frames: usize,
}

impl RasterSink for NullSink {
    fn write(&mut self, _raster: &RenderBuffer, path: &Path, _meta: &FrameMeta) -> Result<(), AppError> {
        self.frames += 1;
        debug!(skipped = self.frames, "Skipping write of {}", path.display());
        Ok(())
    }
}

/// Pick the sink for a run.
pub fn sink_for(format: RasterFormat, write: bool) -> Box<dyn RasterSink> {
    match (write, format) {
        (false, _) => Box::new(NullSink::default()),
        (true, RasterFormat::Png) => Box::new(PngSink),
        (true, _) => Box::new(ImageSink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractnav_core::PlaneRect;

    fn meta() -> FrameMeta {
        FrameMeta {
            frame_number: 0,
            bounds: PlaneRect { x1: -2.0, x2: 1.0, y1: -1.5, y2: 1.5 },
            iter_max: 50,
            formula: "mandelbrot".into(),
            coloring: "smooth".into(),
        }
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("fractnav_sink_{}_{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn image_sink_writes_bmp() {
        let dir = scratch("bmp");
        let path = dir.join("frame.bmp");
        let mut buf = RenderBuffer::new(3, 2);
        buf.set_pixel(1, 1, [10, 20, 30, 255]);
        ImageSink.write(&buf, &path, &meta()).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn png_sink_writes_decodable_file() {
        let dir = scratch("png");
        let path = dir.join("frame.png");
        PngSink.write(&RenderBuffer::new(4, 4), &path, &meta()).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (4, 4));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn null_sink_counts_and_touches_nothing() {
        let dir = scratch("null");
        let path = dir.join("frame.png");
        let mut sink = NullSink::default();
        sink.write(&RenderBuffer::new(2, 2), &path, &meta()).unwrap();
        assert_eq!(sink.frames, 1);
        assert!(!path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn format_extensions() {
        assert_eq!(RasterFormat::Png.extension(), "png");
        assert_eq!(RasterFormat::Jpg.extension(), "jpg");
        assert_eq!(serde_json::to_string(&RasterFormat::Bmp).unwrap(), "\"bmp\"");
    }
}
