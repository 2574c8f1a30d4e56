//! PowerPoint (.pptx) presentation writer.
//!
//! A [`MutablePresentation`] collects slides built from preset shapes, text
//! boxes, connectors, tables and charts, then serializes to an OPC package
//! with one master, one blank layout and a theme.
//!
//! # Example
//!
//! ```rust
//! use deckwright::common::RGBColor;
//! use deckwright::ooxml::pptx::{Fill, Frame, Geometry, MutablePresentation, SlideBackground};
//!
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide();
//! slide.set_background(SlideBackground::solid(RGBColor::new(0x03, 0x0F, 0x26)));
//! slide
//!     .add_auto_shape(Geometry::Ellipse, Frame::new(914_400, 914_400, 457_200, 457_200))
//!     .fill(Fill::solid(RGBColor::WHITE));
//!
//! let bytes = pres.to_bytes()?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), deckwright::ooxml::OoxmlError>(())
//! ```

pub mod backgrounds;
pub mod format;
pub mod properties;
pub(crate) mod template;
pub mod theme;
pub mod transitions;
pub mod writer;

pub use backgrounds::SlideBackground;
pub use format::{
    ColorValue, DashStyle, Fill, Frame, Geometry, GradientStop, Outline, Paragraph, Shadow,
    TextAlign, TextAnchor, TextBody, TextFormat,
};
pub use properties::DocumentProperties;
pub use theme::{ColorScheme, ThemeDefinition};
pub use transitions::{
    SlideTransition, TransitionDirection, TransitionSpeed, TransitionType, ZoomDirection,
};
pub use writer::{MutablePresentation, MutableShape, MutableSlide, TableCell, TableModel};
