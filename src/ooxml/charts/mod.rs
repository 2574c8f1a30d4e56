//! DrawingML charts for generated presentations.
//!
//! A [`Chart`] holds categories, series and styling; [`writer::write_chart`]
//! serializes it into a `c:chartSpace` part with inline literal data.
//!
//! # Example
//!
//! ```rust
//! use deckwright::common::RGBColor;
//! use deckwright::ooxml::charts::{Chart, ChartKind, ChartSeries};
//!
//! let chart = Chart::new(ChartKind::Column)
//!     .with_categories(vec!["Q1".into(), "Q2".into()])
//!     .add_series(ChartSeries::new("Sales", vec![100.0, 150.0], RGBColor::new(0, 112, 192)));
//!
//! let mut xml = Vec::new();
//! deckwright::ooxml::charts::writer::write_chart(&mut xml, &chart).unwrap();
//! ```

pub mod models;
pub mod types;
pub mod writer;

pub use models::{Chart, ChartSeries, DataLabels};
pub use types::{AxisPosition, ChartKind, LegendPosition};
