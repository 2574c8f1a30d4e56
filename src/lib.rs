//! Deckwright - a declarative presentation compiler
//!
//! Deckwright renders a JSON slide-deck specification into a PowerPoint
//! (.pptx) document. Decks are described by slide type (title, content,
//! chart, table, process, timeline and more) and a theme; the compiler does
//! the layout.
//!
//! # Features
//!
//! - **Lenient input**: missing titles, chart data or timeline events are filled in, never rejected
//! - **Themes**: built-in presets, per-key overrides and automatic text contrast correction
//! - **Background patterns**: procedural dot grids, waves, stripes, ring clusters and more
//! - **Failure isolation**: a slide that cannot be drawn becomes an in-deck error slide
//! - **Native PPTX output**: shapes, connectors, charts and tables written as editable DrawingML
//!
//! # Example - Rendering a deck
//!
//! ```no_run
//! use deckwright::deck::{GeneratorOptions, generate_json};
//!
//! # async fn run() -> Result<(), deckwright::Error> {
//! let spec = r##"{
//!     "title": "Demo",
//!     "slides": [{"type": "title", "title": "Hello"}],
//!     "theme": {"colors": {"background": "#030F26"}}
//! }"##;
//! let blob = generate_json(spec, &GeneratorOptions::default()).await?;
//! std::fs::write("demo.pptx", blob.bytes())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Inspecting a compiled deck
//!
//! ```
//! use deckwright::deck::{GeneratorOptions, compile};
//! use serde_json::json;
//!
//! let raw = json!({"slides": [{"type": "chart", "title": "Sales"}]});
//! let deck = compile(&raw, &GeneratorOptions::default())?;
//! assert_eq!(deck.slides().len(), 1);
//! assert_eq!(deck.substituted_count(), 0);
//! # Ok::<(), deckwright::Error>(())
//! ```

/// Shared utilities: errors, colours, units and XML escaping
pub mod common;

/// The presentation compiler: validation, theming, layout and assembly
pub mod deck;

/// OOXML package writing
///
/// This module contains the OPC container, DrawingML charts and the
/// PresentationML writer used by [`deck::PptxWriter`].
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, RGBColor, Result};
pub use deck::{Blob, GeneratorOptions, PresentationSpec, compile, generate, generate_json};
