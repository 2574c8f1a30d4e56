//! The presentation compiler.
//!
//! A raw JSON specification flows through [`validator`], [`theme`],
//! [`layout`] (which draws [`pattern`]s), a [`writer::DocumentWriter`] and
//! finally [`blob::normalize`]. [`assembler`] drives the whole pipeline.

pub mod assembler;
pub mod blob;
pub mod layout;
pub mod pattern;
pub mod primitive;
pub mod spec;
pub mod theme;
pub mod validator;
pub mod writer;

pub use assembler::{
    CompiledDeck, GeneratorOptions, SlideOutcome, compile, compile_spec, generate, generate_json,
    render,
};
pub use blob::{Blob, PPTX_MIME, RawDocument};
pub use spec::{PresentationSpec, SlideKind, SlideSpec, ThemeSpec};
pub use theme::{ResolvedTheme, resolve_theme};
pub use writer::{DocumentWriter, PptxWriter};
