//! Office Open XML (OOXML) writing support.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): package model, relationships and the ZIP container
//! 2. **Charts** (`charts`): DrawingML chart parts
//! 3. **PresentationML** (`pptx`): slides, shapes, theme and package assembly
pub mod charts;
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
