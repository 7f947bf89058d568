//! Raster export: pixel buffers and PNG encoding.

use crate::surface::{RenderResult, RendererError, Surface};
use layerpad_core::SessionConfig;
use std::path::{Path, PathBuf};

/// Result of raster readback - RGBA pixel data and dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// RGBA pixel data (4 bytes per pixel, rows top to bottom).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl RasterImage {
    /// Wrap pixel data, checking it matches the dimensions.
    pub fn new(rgba_data: Vec<u8>, width: u32, height: u32) -> RenderResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba_data.len() != expected {
            return Err(RendererError::RenderFailed(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                rgba_data.len()
            )));
        }
        Ok(Self {
            rgba_data,
            width,
            height,
        })
    }

    /// Fully transparent image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            rgba_data: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// RGBA value at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba_data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.rgba_data, self.width, self.height)
    }
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(RendererError::RenderFailed("cannot encode an empty image".into()));
    }
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba_data)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Read back `surface` and encode it as PNG.
pub fn export_png<S: Surface + ?Sized>(surface: &mut S) -> RenderResult<Vec<u8>> {
    let image = surface.export_image()?;
    let png_data = image.to_png()?;
    log::info!(
        "PNG export complete: {}x{}, {} bytes",
        image.width,
        image.height,
        png_data.len()
    );
    Ok(png_data)
}

/// Export `surface` as a PNG file.
pub fn save_png<S: Surface + ?Sized>(surface: &mut S, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let png_data = export_png(surface).inspect_err(|e| {
        log::error!("Failed to export surface: {}", e);
    })?;
    std::fs::write(path, png_data)?;
    log::info!("Saved {}", path.display());
    Ok(())
}

/// Export `surface` into `dir` under the configured file name.
pub fn save_png_in<S: Surface + ?Sized>(
    surface: &mut S,
    config: &SessionConfig,
    dir: impl AsRef<Path>,
) -> RenderResult<PathBuf> {
    let path = config.export_path(dir);
    save_png(surface, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::DisplayList;
    use crate::surface::StrokeStyle;
    use kurbo::{BezPath, Point, Size};
    use layerpad_core::Rgba;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    /// Surface that "rasterizes" to a solid color, for exercising export.
    struct SolidSurface {
        size: (u32, u32),
        color: [u8; 4],
    }

    impl Surface for SolidSurface {
        fn size(&self) -> Size {
            Size::new(f64::from(self.size.0), f64::from(self.size.1))
        }
        fn clear(&mut self) {}
        fn stroke_path(&mut self, _: &BezPath, _: StrokeStyle, _: Rgba) {}
        fn fill_path(&mut self, _: &BezPath, _: Rgba) {}
        fn fill_text(&mut self, _: &str, _: Point, _: f64, _: &str, _: Rgba) {}
        fn export_image(&mut self) -> RenderResult<RasterImage> {
            let (w, h) = self.size;
            RasterImage::new(self.color.repeat((w * h) as usize), w, h)
        }
    }

    #[test]
    fn test_encode_png_signature() {
        let image = RasterImage::blank(4, 3);
        let data = image.to_png().unwrap();
        assert_eq!(&data[..8], &PNG_SIGNATURE);

        let decoder = png::Decoder::new(data.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 4);
        assert_eq!(reader.info().height, 3);
    }

    #[test]
    fn test_raster_image_checks_length() {
        assert!(RasterImage::new(vec![0; 15], 2, 2).is_err());
        let image = RasterImage::new(vec![1, 2, 3, 4], 1, 1).unwrap();
        assert_eq!(image.pixel(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(image.pixel(1, 0), None);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(encode_png(&[], 0, 0).is_err());
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut surface = SolidSurface {
            size: (5, 5),
            color: [255, 0, 0, 255],
        };
        save_png(&mut surface, &path).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_save_png_uses_configured_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = SolidSurface {
            size: (2, 2),
            color: [0, 0, 0, 255],
        };
        let path = save_png_in(&mut surface, &SessionConfig::default(), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("canvas.png"));
        assert!(path.exists());

        let config = SessionConfig::from_json(r#"{ "export_file_name": "sketch.png" }"#).unwrap();
        let path = save_png_in(&mut surface, &config, dir.path()).unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("sketch.png"));
        assert!(path.exists());
    }

    #[test]
    fn test_display_list_export_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig::default();
        let path = config.export_path(dir.path());
        let mut list = DisplayList::new(config.surface_size());
        assert!(matches!(export_png(&mut list), Err(RendererError::Unsupported)));
        assert!(matches!(
            save_png_in(&mut list, &config, dir.path()),
            Err(RendererError::Unsupported)
        ));
        assert!(!path.exists());
    }
}
