//! heatgrid core
//!
//! Foundational primitives shared by the heatgrid chart crates:
//!
//! - **Geometry**: points, sizes and rectangles in surface pixels
//! - **Colors**: RGBA colors, hex parsing and channel interpolation
//! - **Drawing**: a backend-agnostic [`DrawContext`] plus a command recorder
//! - **Events**: pointer events delivered by the host surface
//!
//! # Example
//!
//! ```rust
//! use heatgrid_core::{Brush, Color, DrawCommands, DrawContext, Rect};
//!
//! let mut cmds = DrawCommands::new();
//! cmds.fill_rect(
//!     Rect::new(0.0, 0.0, 10.0, 10.0),
//!     0.0.into(),
//!     Brush::Solid(Color::from_hex(0xF8F8F8)),
//! );
//! assert_eq!(cmds.commands().len(), 1);
//! ```

pub mod color;
pub mod draw;
pub mod events;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use draw::{
    Brush, CornerRadius, DrawCommand, DrawCommands, DrawContext, FontWeight, TextAnchor,
    TextBaseline, TextStyle,
};
pub use events::{Event, EventData, EventType};
pub use geometry::{Point, Rect, Size};
