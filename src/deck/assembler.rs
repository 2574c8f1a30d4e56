//! The generation pipeline.
//!
//! validate, resolve the theme once, lay out every slide behind a failure
//! boundary, hand the primitives to a [`DocumentWriter`], normalize the
//! result. Only a malformed top-level specification and an unusable writer
//! output are fatal; every per-slide failure becomes an in-deck error slide.

use crate::common::Result;
use crate::deck::blob::{self, Blob};
use crate::deck::layout::{self, LayoutContext, LayoutError};
use crate::deck::primitive::{Canvas, Slide};
use crate::deck::spec::{PresentationSpec, SlideSpec};
use crate::deck::theme::{ResolvedTheme, resolve_theme};
use crate::deck::validator;
use crate::deck::writer::{DocumentMetadata, DocumentWriter, PptxWriter, TransitionStyle, WriteError};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Creator recorded when the specification names no author.
pub const DEFAULT_AUTHOR: &str = "deckwright";

/// Knobs for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Lay slides out on the rayon pool; output order is unaffected
    pub parallel_layout: bool,
    /// Timestamp for the core properties; `None` uses the current time
    pub created: Option<DateTime<Utc>>,
    pub canvas: Canvas,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            parallel_layout: true,
            created: None,
            canvas: Canvas::default(),
        }
    }
}

/// How one slide came out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SlideOutcome {
    Rendered { index: usize },
    /// Replaced by the error layout
    Substituted { index: usize, message: String },
}

impl SlideOutcome {
    pub fn is_substituted(&self) -> bool {
        matches!(self, SlideOutcome::Substituted { .. })
    }
}

/// A laid-out deck, ready to be written.
#[derive(Debug, Clone)]
pub struct CompiledDeck {
    spec: PresentationSpec,
    theme: ResolvedTheme,
    canvas: Canvas,
    slides: Vec<Slide>,
    outcomes: Vec<SlideOutcome>,
}

impl CompiledDeck {
    /// The normalized specification.
    pub fn spec(&self) -> &PresentationSpec {
        &self.spec
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// One entry per slide, in slide order.
    pub fn outcomes(&self) -> &[SlideOutcome] {
        &self.outcomes
    }

    pub fn substituted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_substituted()).count()
    }

    pub fn metadata(&self, created: DateTime<Utc>) -> DocumentMetadata {
        DocumentMetadata {
            title: self.spec.title.clone(),
            author: self
                .spec
                .author
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            subject: self
                .spec
                .subtitle
                .clone()
                .or_else(|| self.spec.presentation_type.clone()),
            created,
        }
    }
}

/// Validate a raw specification and lay out every slide.
#[tracing::instrument(skip_all, fields(parallel = options.parallel_layout))]
pub fn compile(raw: &Value, options: &GeneratorOptions) -> Result<CompiledDeck> {
    let spec = validator::validate(raw)?;
    Ok(compile_spec(spec, options))
}

/// Lay out an already normalized specification. Never fails.
pub fn compile_spec(spec: PresentationSpec, options: &GeneratorOptions) -> CompiledDeck {
    let theme = resolve_theme(&spec.theme, spec.presentation_type.as_deref());
    let canvas = if options.canvas.is_usable() {
        options.canvas
    } else {
        warn!(
            width = options.canvas.width,
            height = options.canvas.height,
            "unusable canvas, falling back to the default size"
        );
        Canvas::default()
    };

    let laid: Vec<(Slide, SlideOutcome)> = if options.parallel_layout && spec.slides.len() > 1 {
        spec.slides
            .par_iter()
            .enumerate()
            .map(|(index, slide)| layout_isolated(slide, index, &theme, canvas))
            .collect()
    } else {
        spec.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| layout_isolated(slide, index, &theme, canvas))
            .collect()
    };
    let (slides, outcomes): (Vec<_>, Vec<_>) = laid.into_iter().unzip();

    let deck = CompiledDeck {
        spec,
        theme,
        canvas,
        slides,
        outcomes,
    };
    info!(
        slides = deck.slides.len(),
        substituted = deck.substituted_count(),
        theme = %deck.theme.name,
        "deck compiled"
    );
    deck
}

fn layout_isolated(
    spec: &SlideSpec,
    index: usize,
    theme: &ResolvedTheme,
    canvas: Canvas,
) -> (Slide, SlideOutcome) {
    match layout::layout_slide(spec, index, theme, canvas) {
        Ok(slide) => (slide, SlideOutcome::Rendered { index }),
        Err(err) => substitute(spec, index, theme, canvas, &err),
    }
}

fn substitute(
    spec: &SlideSpec,
    index: usize,
    theme: &ResolvedTheme,
    canvas: Canvas,
    err: &LayoutError,
) -> (Slide, SlideOutcome) {
    warn!(slide = index, r#type = spec.kind.tag(), error = %err, "slide replaced by error layout");
    let message = err.to_string();
    let ctx = LayoutContext::new(theme, canvas, index);
    (
        layout::error_slide(&spec.title, &message, &ctx),
        SlideOutcome::Substituted { index, message },
    )
}

/// Hand a compiled deck to `writer`, slide by slide.
///
/// A slide the writer rejects is cleared and redrawn with the error layout.
/// If the writer rejects that too, the slide is left blank. Only a failing
/// `add_slide` is propagated.
#[tracing::instrument(skip_all, fields(slides = deck.slides.len()))]
pub fn write<W: DocumentWriter>(deck: &mut CompiledDeck, writer: &mut W, created: DateTime<Utc>) -> Result<()> {
    writer.set_metadata(&deck.metadata(created));
    writer.set_theme(&deck.theme);
    let transition = deck
        .spec
        .animations
        .as_ref()
        .filter(|anim| anim.enabled)
        .map(|anim| TransitionStyle::from_token(anim.style.as_deref()));

    for index in 0..deck.slides.len() {
        writer.add_slide()?;
        let Err(err) = draw(writer, &deck.slides[index], transition) else {
            continue;
        };
        let (fallback, outcome) = substitute(
            &deck.spec.slides[index],
            index,
            &deck.theme,
            deck.canvas,
            &LayoutError::Writer(err.to_string()),
        );
        deck.outcomes[index] = outcome;
        match writer
            .reset_slide()
            .and_then(|()| draw(writer, &fallback, transition))
        {
            Ok(()) => deck.slides[index] = fallback,
            Err(err) => {
                warn!(slide = index, error = %err, "error layout rejected, slide left blank");
                if let Err(err) = writer.reset_slide() {
                    warn!(slide = index, error = %err, "slide could not be cleared");
                }
                deck.slides[index] = Slide::new(fallback.background);
            },
        }
    }
    Ok(())
}

fn draw<W: DocumentWriter>(
    writer: &mut W,
    slide: &Slide,
    transition: Option<TransitionStyle>,
) -> std::result::Result<(), WriteError> {
    writer.set_background(&slide.background)?;
    for primitive in slide.iter() {
        writer.add_primitive(primitive)?;
    }
    if let Some(style) = transition {
        writer.set_transition(style)?;
    }
    Ok(())
}

/// Write, serialize and normalize a compiled deck with any writer.
pub async fn render<W: DocumentWriter>(
    deck: &mut CompiledDeck,
    mut writer: W,
    options: &GeneratorOptions,
) -> Result<Blob> {
    write(deck, &mut writer, options.created.unwrap_or_else(Utc::now))?;
    let raw = writer.serialize().await?;
    blob::normalize(raw)
}

/// Compile a raw specification into a PPTX blob.
pub async fn generate(raw: &Value, options: &GeneratorOptions) -> Result<Blob> {
    let mut deck = compile(raw, options)?;
    let writer = PptxWriter::new(deck.canvas);
    render(&mut deck, writer, options).await
}

/// [`generate`] from JSON text.
pub async fn generate_json(json: &str, options: &GeneratorOptions) -> Result<Blob> {
    let mut deck = compile_spec(validator::parse_spec(json)?, options);
    let writer = PptxWriter::new(deck.canvas);
    render(&mut deck, writer, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::deck::blob::{PPTX_MIME, RawDocument};
    use crate::deck::primitive::{
        Background, ChartPrimitive, ShapePrimitive, TablePrimitive, TextPrimitive, VisualPrimitive,
    };
    use proptest::prelude::*;
    use serde_json::json;
    use std::future::Future;

    fn pinned() -> GeneratorOptions {
        GeneratorOptions {
            created: Some(DateTime::UNIX_EPOCH),
            ..Default::default()
        }
    }

    fn mixed_deck() -> Value {
        json!({
            "title": "Quarterly",
            "slides": [
                {"type": "title", "title": "Quarterly"},
                {"type": "chart", "title": "Radar", "chartType": "radar",
                 "data": {"labels": ["a"], "datasets": [{"label": "s", "data": [1]}]}},
                {"type": "process", "title": "Flow", "steps": []},
                {"type": "content", "title": "Notes", "content": ["x", "y"]}
            ]
        })
    }

    #[test]
    fn test_failures_are_substituted_in_place() {
        let deck = compile(&mixed_deck(), &pinned()).unwrap();
        assert_eq!(deck.slides().len(), 4);
        assert_eq!(deck.substituted_count(), 2);
        assert_eq!(deck.outcomes()[0], SlideOutcome::Rendered { index: 0 });
        let SlideOutcome::Substituted { index, message } = &deck.outcomes()[1] else {
            panic!("chart slide should be substituted");
        };
        assert_eq!(*index, 1);
        assert!(message.contains("radar"));

        let VisualPrimitive::Text(title) = &deck.slides()[1].primitives[0] else {
            panic!("error slide starts with its title");
        };
        assert_eq!(title.paragraphs, ["Radar"]);
    }

    #[test]
    fn test_parallel_and_sequential_layouts_agree() {
        let raw = mixed_deck();
        let parallel = compile(&raw, &pinned()).unwrap();
        let sequential = compile(
            &raw,
            &GeneratorOptions {
                parallel_layout: false,
                ..pinned()
            },
        )
        .unwrap();
        assert_eq!(parallel.slides(), sequential.slides());
        assert_eq!(parallel.outcomes(), sequential.outcomes());
        assert_eq!(parallel.theme(), sequential.theme());
    }

    #[test]
    fn test_metadata_defaults() {
        let deck = compile(
            &json!({"slides": [], "presentationType": "pitch"}),
            &pinned(),
        )
        .unwrap();
        let meta = deck.metadata(DateTime::UNIX_EPOCH);
        assert_eq!(meta.title, "Untitled Presentation");
        assert_eq!(meta.author, DEFAULT_AUTHOR);
        assert_eq!(meta.subject.as_deref(), Some("pitch"));
        assert_eq!(deck.theme().name, "vibrant");
    }

    #[test]
    fn test_malformed_top_level_is_fatal() {
        assert!(matches!(
            compile(&json!({"slides": {}}), &pinned()),
            Err(Error::MalformedSpec(_))
        ));
    }

    /// Wraps the PPTX writer and refuses charts, and text when asked to.
    struct Refusing {
        inner: PptxWriter,
        text: bool,
    }

    impl Refusing {
        fn charts() -> Self {
            Self {
                inner: PptxWriter::default(),
                text: false,
            }
        }

        fn charts_and_text() -> Self {
            Self {
                text: true,
                ..Self::charts()
            }
        }
    }

    impl DocumentWriter for Refusing {
        fn set_metadata(&mut self, metadata: &DocumentMetadata) {
            self.inner.set_metadata(metadata)
        }
        fn add_slide(&mut self) -> std::result::Result<(), WriteError> {
            self.inner.add_slide()
        }
        fn set_background(&mut self, background: &Background) -> std::result::Result<(), WriteError> {
            self.inner.set_background(background)
        }
        fn add_text(&mut self, text: &TextPrimitive) -> std::result::Result<(), WriteError> {
            if self.text {
                return Err(WriteError::InvalidPrimitive("text unsupported".into()));
            }
            self.inner.add_text(text)
        }
        fn add_shape(&mut self, shape: &ShapePrimitive) -> std::result::Result<(), WriteError> {
            self.inner.add_shape(shape)
        }
        fn add_chart(&mut self, _chart: &ChartPrimitive) -> std::result::Result<(), WriteError> {
            Err(WriteError::InvalidPrimitive("charts unsupported".into()))
        }
        fn add_table(&mut self, table: &TablePrimitive) -> std::result::Result<(), WriteError> {
            self.inner.add_table(table)
        }
        fn set_transition(&mut self, style: TransitionStyle) -> std::result::Result<(), WriteError> {
            self.inner.set_transition(style)
        }
        fn reset_slide(&mut self) -> std::result::Result<(), WriteError> {
            self.inner.reset_slide()
        }
        fn serialize(self) -> impl Future<Output = std::result::Result<RawDocument, WriteError>> + Send {
            self.inner.serialize()
        }
    }

    #[tokio::test]
    async fn test_writer_rejection_becomes_error_slide() {
        let raw = json!({"slides": [
            {"type": "chart", "title": "Sales"},
            {"type": "basic", "title": "After", "content": "still here"}
        ]});
        let options = pinned();
        let mut deck = compile(&raw, &options).unwrap();
        assert_eq!(deck.substituted_count(), 0);

        let blob = render(&mut deck, Refusing::charts(), &options)
            .await
            .unwrap();
        assert_eq!(blob.mime(), PPTX_MIME);
        assert_eq!(deck.substituted_count(), 1);
        assert!(matches!(
            &deck.outcomes()[0],
            SlideOutcome::Substituted { message, .. } if message.contains("charts unsupported")
        ));
        assert_eq!(deck.outcomes()[1], SlideOutcome::Rendered { index: 1 });
    }

    #[tokio::test]
    async fn test_rejected_error_layout_leaves_blank_slide() {
        let raw = json!({"slides": [
            {"type": "basic", "title": "Words", "content": "text"},
            {"type": "basic", "title": "More", "content": "text"}
        ]});
        let options = pinned();
        let mut deck = compile(&raw, &options).unwrap();

        let blob = render(&mut deck, Refusing::charts_and_text(), &options)
            .await
            .unwrap();
        assert!(!blob.is_empty());
        assert_eq!(deck.slides().len(), 2);
        assert_eq!(deck.substituted_count(), 2);
        assert!(deck.slides().iter().all(|s| s.primitive_count() == 0));
    }

    #[test]
    fn test_unusable_canvas_falls_back_to_default() {
        let raw = json!({"slides": [
            {"type": "title", "title": "Hi"},
            {"type": "chart", "title": "Radar", "chartType": "radar"}
        ]});
        for canvas in [
            Canvas { width: 0.2, height: 5.0 },
            Canvas { width: f64::NAN, height: 5.0 },
            Canvas { width: 10.0, height: f64::INFINITY },
        ] {
            let options = GeneratorOptions { canvas, ..pinned() };
            let deck = compile(&raw, &options).unwrap();
            assert_eq!(deck.slides().len(), 2);
            assert_eq!(deck.outcomes()[0], SlideOutcome::Rendered { index: 0 });
            assert!(deck.outcomes()[1].is_substituted());
            assert!(
                deck.slides()
                    .iter()
                    .flat_map(|s| s.iter())
                    .all(|p| p.bounds().is_finite())
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_compile_keeps_slide_count(
            kinds in prop::collection::vec(
                prop::sample::select(vec![
                    "title", "content", "two-column", "chart", "table", "comparison",
                    "process", "timeline", "conclusion", "quote", "image", "basic",
                    "hologram", "",
                ]),
                0..16,
            ),
            chart_type in prop::sample::select(vec!["bar", "pie", "radar", "donut"]),
            parallel in any::<bool>(),
        ) {
            let slides: Vec<Value> = kinds
                .iter()
                .map(|kind| json!({"type": kind, "chartType": chart_type, "steps": [], "rows": []}))
                .collect();
            let options = GeneratorOptions { parallel_layout: parallel, ..pinned() };
            let deck = compile(&json!({"slides": slides}), &options).unwrap();
            prop_assert_eq!(deck.slides().len(), kinds.len());
            prop_assert_eq!(deck.outcomes().len(), kinds.len());
            for (i, outcome) in deck.outcomes().iter().enumerate() {
                let index = match outcome {
                    SlideOutcome::Rendered { index } | SlideOutcome::Substituted { index, .. } => *index,
                };
                prop_assert_eq!(index, i);
            }
        }
    }

    #[tokio::test]
    async fn test_generate_is_reproducible_with_pinned_time() {
        let raw = mixed_deck();
        let first = generate(&raw, &pinned()).await.unwrap();
        let second = generate(&raw, &pinned()).await.unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
