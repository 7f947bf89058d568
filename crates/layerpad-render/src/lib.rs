//! LayerPad Render Library
//!
//! Surface abstraction and render pipeline for LayerPad.
//! Headless rendering records into a [`DisplayList`]; the optional Vello
//! surface paints on the GPU and supports raster export.

pub mod display_list;
pub mod export;
pub mod pipeline;
mod surface;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use display_list::{DisplayList, DrawCommand};
pub use export::{RasterImage, encode_png, export_png, save_png, save_png_in};
pub use pipeline::{RenderContext, flush, paint_layer, paint_pen_segment, render, render_with, repaint};
pub use surface::{RenderResult, RendererError, StrokeStyle, Surface};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
