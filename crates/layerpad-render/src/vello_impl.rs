//! Vello-based surface implementation.

use crate::export::RasterImage;
use crate::surface::{RenderResult, RendererError, StrokeStyle, Surface};
use kurbo::{Affine, BezPath, Point, Rect, Size};
use layerpad_core::Rgba;
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use std::sync::mpsc::Receiver;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};

/// Device and renderer used for raster readback, created on first export.
struct GpuContext {
    render_cx: vello::util::RenderContext,
    dev_id: usize,
    renderer: vello::Renderer,
}

impl GpuContext {
    fn new() -> RenderResult<Self> {
        let mut render_cx = vello::util::RenderContext::new();
        let dev_id = pollster::block_on(render_cx.device(None))
            .ok_or_else(|| RendererError::InitFailed("no compatible GPU adapter".into()))?;
        let device = &render_cx.devices[dev_id].device;
        let renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("{e:?}")))?;
        log::info!("Initialized GPU context for raster export");
        Ok(Self {
            render_cx,
            dev_id,
            renderer,
        })
    }
}

/// GPU-backed drawing surface that paints into a Vello scene.
pub struct VelloSurface {
    /// The Vello scene being built.
    scene: Scene,
    size: Size,
    /// Color the scene is composited over on export.
    background: Color,
    /// Font context for text rendering, backed by system fonts.
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
    gpu: Option<GpuContext>,
}

impl VelloSurface {
    /// Create a surface of the given intrinsic size.
    pub fn new(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            size,
            background: Color::TRANSPARENT,
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            gpu: None,
        }
    }

    /// Set the export background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.size.width.ceil() as u32, self.size.height.ceil() as u32)
    }
}

impl Surface for VelloSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.scene.reset();
    }

    fn stroke_path(&mut self, path: &BezPath, style: StrokeStyle, color: Rgba) {
        self.scene
            .stroke(&style.to_stroke(), Affine::IDENTITY, Color::from(color), None, path);
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, Color::from(color), None, path);
    }

    /// Lay out `text` with Parley and draw its glyphs.
    fn fill_text(&mut self, text: &str, position: Point, font_size: f64, family: &str, color: Rgba) {
        if text.is_empty() {
            return;
        }

        let brush = Brush::Solid(Color::from(color));
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(family.into())));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        // Parley puts y=0 at the top of the layout; `position` is the baseline.
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(font_size);
        let transform = Affine::translate((position.x, position.y - baseline));

        let mut glyph_count = 0;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();
                glyph_count += glyphs.len();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(run.font())
                        .brush(&brush)
                        .hint(true)
                        .transform(transform)
                        .glyph_transform(glyph_xform)
                        .font_size(run.font_size())
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        if glyph_count == 0 {
            log::warn!("No glyphs for text {:?} in family {:?}; drawing placeholder", text, family);
            let width = text.chars().count() as f64 * font_size * 0.6;
            let rect = Rect::new(position.x, position.y - font_size, position.x + width, position.y);
            self.scene
                .fill(Fill::NonZero, Affine::IDENTITY, Color::from(color).with_alpha(0.4), None, &rect);
        }
    }

    fn export_image(&mut self) -> RenderResult<RasterImage> {
        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 {
            return Err(RendererError::Surface("cannot export an empty surface".into()));
        }
        if self.gpu.is_none() {
            self.gpu = Some(GpuContext::new()?);
        }
        let Some(gpu) = self.gpu.as_mut() else {
            return Err(RendererError::InitFailed("GPU context unavailable".into()));
        };
        let handle = &gpu.render_cx.devices[gpu.dev_id];
        render_scene_to_image(
            &handle.device,
            &handle.queue,
            &mut gpu.renderer,
            &self.scene,
            self.background,
            width,
            height,
        )
    }
}

/// Render a Vello scene to RGBA pixels (blocking).
fn render_scene_to_image(
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
    vello_renderer: &mut vello::Renderer,
    scene: &Scene,
    base_color: Color,
    width: u32,
    height: u32,
) -> RenderResult<RasterImage> {
    // Create offscreen texture for rendering
    let texture = device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some("png export texture"),
        size: vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: vello::wgpu::TextureDimension::D2,
        format: vello::wgpu::TextureFormat::Rgba8Unorm,
        usage: vello::wgpu::TextureUsages::STORAGE_BINDING
            | vello::wgpu::TextureUsages::COPY_SRC
            | vello::wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    let texture_view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };

    vello_renderer
        .render_to_texture(device, queue, scene, &texture_view, &params)
        .map_err(|e| {
            log::error!("Failed to render scene for PNG export: {:?}", e);
            RendererError::RenderFailed(format!("{e:?}"))
        })?;

    let bytes_per_row = (width * 4).next_multiple_of(256); // wgpu alignment requirement
    let buffer_size = u64::from(bytes_per_row * height);

    let readback_buffer = device.create_buffer(&vello::wgpu::BufferDescriptor {
        label: Some("png readback buffer"),
        size: buffer_size,
        usage: vello::wgpu::BufferUsages::COPY_DST | vello::wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
        label: Some("png copy encoder"),
    });

    encoder.copy_texture_to_buffer(
        vello::wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: vello::wgpu::Origin3d::ZERO,
            aspect: vello::wgpu::TextureAspect::All,
        },
        vello::wgpu::TexelCopyBufferInfo {
            buffer: &readback_buffer,
            layout: vello::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = readback_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(vello::wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });

    let poll = device.poll(vello::wgpu::PollType::wait_indefinitely());
    await_readback(poll, &rx)?;

    let data = buffer_slice.get_mapped_range();

    // Remove row padding
    let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        let row_start = (row * bytes_per_row) as usize;
        let row_end = row_start + (width * 4) as usize;
        rgba_data.extend_from_slice(&data[row_start..row_end]);
    }

    drop(data);
    readback_buffer.unmap();

    RasterImage::new(rgba_data, width, height)
}

/// Wait for the buffer map callback, unless polling the device already failed.
///
/// A failed poll may leave the callback pending forever, so `rx` is only read
/// once the poll succeeded.
fn await_readback<T, P, M>(poll: Result<T, P>, rx: &Receiver<Result<(), M>>) -> RenderResult<()>
where
    P: std::fmt::Debug,
    M: std::fmt::Debug,
{
    if let Err(e) = poll {
        log::error!("Device poll failed during PNG readback: {:?}", e);
        return Err(RendererError::Surface(format!("device poll failed: {e:?}")));
    }
    match rx.recv() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            log::error!("Failed to map buffer for PNG readback: {:?}", e);
            Err(RendererError::Surface(format!("{e:?}")))
        }
        Err(e) => Err(RendererError::Surface(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline;
    use layerpad_core::{BoxShape, Document, Layer};

    #[test]
    fn test_surface_creation() {
        let surface = VelloSurface::new(Size::new(500.0, 500.0));
        assert!(surface.scene().encoding().is_empty());
        assert_eq!(surface.size(), Size::new(500.0, 500.0));
    }

    #[test]
    fn test_render_into_scene() {
        let mut surface = VelloSurface::new(Size::new(100.0, 100.0));
        let mut doc = Document::new();
        doc.push(Layer::Rectangle(BoxShape::new(Point::new(10.0, 10.0), 20.0, 20.0)));
        pipeline::render(&mut surface, &doc, None, true);
        assert!(!surface.scene().encoding().is_empty());

        pipeline::render(&mut surface, &Document::new(), None, false);
        assert!(surface.scene().encoding().is_empty());
    }

    #[test]
    fn test_failed_poll_does_not_wait_for_map() {
        // The sender stays alive, so waiting on the channel would block.
        let (_tx, rx) = std::sync::mpsc::channel::<Result<(), String>>();
        let result = await_readback(Err::<(), _>("device lost"), &rx);
        assert!(matches!(result, Err(RendererError::Surface(msg)) if msg.contains("device lost")));
    }

    #[test]
    fn test_readback_map_result() {
        let (tx, rx) = std::sync::mpsc::channel::<Result<(), String>>();
        tx.send(Ok(())).unwrap();
        assert!(await_readback(Ok::<(), String>(()), &rx).is_ok());

        tx.send(Err("map failed".to_string())).unwrap();
        assert!(await_readback(Ok::<(), String>(()), &rx).is_err());

        drop(tx);
        assert!(await_readback(Ok::<(), String>(()), &rx).is_err());
    }
}
