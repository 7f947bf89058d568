//! LayerPad Core Library
//!
//! Platform-agnostic data structures and logic for the LayerPad drawing
//! surface: the layer model, the tool state machine and the coordinate
//! mapping used to feed it pointer input.

pub mod config;
pub mod document;
pub mod geometry;
pub mod input;
pub mod layers;
pub mod mapper;
pub mod session;
pub mod tools;

pub use config::{ConfigError, GridConfig, LineCap, SessionConfig};
pub use document::Document;
pub use input::{MouseButton, PointerEvent};
pub use layers::{Axis, BoxShape, ColorParseError, Layer, LayerKind, Rgba, Stroke, TextLayer};
pub use mapper::{SurfaceViewport, map_to_surface};
pub use session::{Repaint, Session, TextPrompt};
pub use tools::{DraftChange, Interaction, StyleState, ToolKind};
