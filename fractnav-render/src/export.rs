//! PNG export with embedded view metadata (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use fractnav_core::PlaneRect;

use crate::buffer::RenderBuffer;
use crate::error::RenderError;

/// Metadata embedded in each exported frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMeta {
    pub frame_number: u32,
    pub bounds: PlaneRect,
    pub iter_max: u32,
    pub formula: String,
    pub coloring: String,
}

/// Write `buffer` as an 8-bit RGBA PNG carrying `meta` as tEXt chunks.
///
/// Uses the `png` crate directly (rather than `image`) so custom text chunks
/// can be written; they are readable by exiftool and most viewers.
pub fn export_png(buffer: &RenderBuffer, path: &Path, meta: &FrameMeta) -> crate::Result<()> {
    let (width, height) = (buffer.width, buffer.height);
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if buffer.pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: buffer.pixels.len(),
        });
    }

    let png_err = |source| RenderError::Png {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder
        .add_text_chunk("Software".to_string(), "FractNav".to_string())
        .map_err(png_err)?;
    encoder
        .add_text_chunk("Description".to_string(), build_description(meta))
        .map_err(png_err)?;
    for (key, value) in build_metadata_pairs(meta) {
        encoder.add_text_chunk(key, value).map_err(png_err)?;
    }

    let mut writer = encoder.write_header().map_err(png_err)?;
    writer.write_image_data(&buffer.pixels).map_err(png_err)?;
    writer.finish().map_err(png_err)?;

    debug!("Exported PNG {}x{} to {}", width, height, path.display());
    Ok(())
}

fn build_description(meta: &FrameMeta) -> String {
    format!(
        "{} frame {} - x [{:.15}, {:.15}] y [{:.15}, {:.15}], Iterations: {}",
        meta.formula,
        meta.frame_number,
        meta.bounds.x1,
        meta.bounds.x2,
        meta.bounds.y1,
        meta.bounds.y2,
        meta.iter_max,
    )
}

fn build_metadata_pairs(meta: &FrameMeta) -> Vec<(String, String)> {
    vec![
        ("FractNav.Frame".into(), meta.frame_number.to_string()),
        ("FractNav.Formula".into(), meta.formula.clone()),
        ("FractNav.X1".into(), format!("{:.15}", meta.bounds.x1)),
        ("FractNav.X2".into(), format!("{:.15}", meta.bounds.x2)),
        ("FractNav.Y1".into(), format!("{:.15}", meta.bounds.y1)),
        ("FractNav.Y2".into(), format!("{:.15}", meta.bounds.y2)),
        ("FractNav.MaxIterations".into(), meta.iter_max.to_string()),
        ("FractNav.Coloring".into(), meta.coloring.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn meta() -> FrameMeta {
        FrameMeta {
            frame_number: 3,
            bounds: PlaneRect {
                x1: -2.2,
                x2: 1.2,
                y1: -1.7,
                y2: 1.7,
            },
            iter_max: 600,
            formula: "mandelbrot".into(),
            coloring: "smooth".into(),
        }
    }

    #[test]
    fn export_creates_valid_png() {
        let buf = RenderBuffer::new(4, 4);
        let dir = std::env::temp_dir().join(format!("fractnav_test_export_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("mandelbrot.000.png");
        export_png(&buf, &path, &meta()).expect("export should succeed");

        let mut file = std::fs::File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_embeds_text_chunks() {
        let buf = RenderBuffer::new(2, 2);
        let dir = std::env::temp_dir().join(format!("fractnav_test_export_meta_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("meta.png");
        export_png(&buf, &path, &meta()).expect("export should succeed");

        let decoder = png::Decoder::new(std::fs::File::open(&path).expect("file should exist"));
        let reader = decoder.read_info().expect("should read info");
        let texts = &reader.info().uncompressed_latin1_text;
        assert!(texts.iter().any(|t| t.keyword == "Software" && t.text == "FractNav"));
        assert!(texts.iter().any(|t| t.keyword == "FractNav.Frame" && t.text == "3"));
        assert!(texts
            .iter()
            .any(|t| t.keyword == "FractNav.X1" && t.text == "-2.200000000000000"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_buffer_is_rejected() {
        let buf = RenderBuffer::new(0, 4);
        let path = std::env::temp_dir().join("fractnav_never_written.png");
        assert!(matches!(
            export_png(&buf, &path, &meta()),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn missing_directory_reports_io_error() {
        let buf = RenderBuffer::new(2, 2);
        let path = std::env::temp_dir()
            .join("fractnav_no_such_dir_for_export")
            .join("nested")
            .join("x.png");
        assert!(matches!(export_png(&buf, &path, &meta()), Err(RenderError::Io { .. })));
    }
}
