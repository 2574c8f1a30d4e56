//! Normalization of raw deck specifications.
//!
//! The validator reads a loosely structured JSON value and produces a fully
//! populated [`PresentationSpec`]. Only the top-level shape can fail: the root
//! must be an object carrying a `slides` array. Every other gap is filled with
//! a safe default and logged at debug level. Slide count and order are kept.

use crate::common::{Error, RGBColor, Result};
use crate::deck::spec::{
    AnimationSpec, ChartData, Column, ColorOverrides, CornerRadius, Dataset, DesignOverrides,
    FontOverrides, PresentationSpec, ProcessStep, SlideKind, SlideSpec, SpacingOverrides,
    ThemeSpec, TimelineEvent,
};
use serde_json::{Map, Value};
use tracing::debug;

pub const UNTITLED_PRESENTATION: &str = "Untitled Presentation";

/// Parse and normalize a JSON document.
pub fn parse_spec(json: &str) -> Result<PresentationSpec> {
    let raw: Value = serde_json::from_str(json)?;
    validate(&raw)
}

/// Normalize a raw specification value.
///
/// Fails only when the root is not an object or `slides` is missing or not an array.
pub fn validate(raw: &Value) -> Result<PresentationSpec> {
    let root = raw
        .as_object()
        .ok_or_else(|| Error::MalformedSpec("top-level value must be an object".to_string()))?;
    let slides = match root.get("slides") {
        Some(Value::Array(slides)) => slides,
        Some(_) => return Err(Error::MalformedSpec("`slides` must be an array".to_string())),
        None => return Err(Error::MalformedSpec("missing `slides` array".to_string())),
    };
    Ok(normalize(root, slides))
}

/// Fill every gap of an already shape-checked specification. Never fails.
pub fn normalize(root: &Map<String, Value>, slides: &[Value]) -> PresentationSpec {
    let title = text(root.get("title")).unwrap_or_else(|| {
        debug!(reason = "missing deck title", "spec corrected");
        UNTITLED_PRESENTATION.to_string()
    });

    PresentationSpec {
        title,
        subtitle: text(root.get("subtitle")),
        author: text(lookup(root, &["author", "creator"])),
        presentation_type: text(lookup(root, &["presentationType", "presentation_type"])),
        slides: slides
            .iter()
            .enumerate()
            .map(|(index, slide)| normalize_slide(index, slide))
            .collect(),
        theme: root.get("theme").map(normalize_theme).unwrap_or_default(),
        animations: root.get("animations").and_then(normalize_animations),
    }
}

fn normalize_slide(index: usize, value: &Value) -> SlideSpec {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or_else(|| {
        debug!(slide = index, reason = "slide is not an object", "spec corrected");
        &empty
    });

    let title = text(obj.get("title")).unwrap_or_else(|| {
        debug!(slide = index, reason = "missing title", "spec corrected");
        format!("Slide {}", index + 1)
    });

    let tag = match obj.get("type").and_then(Value::as_str) {
        Some(tag) => tag.trim().to_ascii_lowercase().replace(['_', ' '], "-"),
        None => {
            debug!(slide = index, reason = "missing type", "spec corrected");
            "content".to_string()
        },
    };

    let kind = match tag.as_str() {
        "title" | "cover" => SlideKind::Title {
            subtitle: text(lookup(obj, &["subtitle", "content"])),
        },
        "content" | "bullets" => SlideKind::Content {
            items: text_list(lookup(obj, &["content", "items", "bullets", "points"])),
        },
        "two-column" | "twocolumn" | "two-columns" => {
            let (left, right) = columns(obj);
            SlideKind::TwoColumn { left, right }
        },
        "chart" => chart(index, obj),
        "table" => table(obj),
        "comparison" | "compare" => {
            let (left, right) = columns(obj);
            SlideKind::Comparison {
                left,
                right,
                verdict: text(lookup(obj, &["verdict", "conclusion", "winner"])),
            }
        },
        "process" | "steps" => SlideKind::Process {
            steps: steps(obj),
        },
        "timeline" => timeline(index, obj),
        "conclusion" | "summary" => SlideKind::Conclusion {
            message: text(lookup(obj, &["message", "summary", "subtitle"])),
            points: text_list(lookup(obj, &["points", "content", "items", "takeaways"])),
            call_to_action: text(lookup(obj, &["callToAction", "cta"])),
        },
        "quote" => SlideKind::Quote {
            quote: text(lookup(obj, &["quote", "content", "text"])).unwrap_or_default(),
            attribution: text(lookup(obj, &["attribution", "author", "source"])),
        },
        "image" => SlideKind::Image {
            caption: text(obj.get("caption")),
            description: text(lookup(obj, &["description", "content", "alt"])),
        },
        "basic" => SlideKind::Basic {
            content: text_list(lookup(obj, &["content", "items", "text"])),
        },
        _ => {
            debug!(slide = index, r#type = %tag, "unknown slide type routed to basic");
            SlideKind::Unknown {
                original_type: tag.clone(),
                content: text_list(lookup(obj, &["content", "items", "text"])),
            }
        },
    };

    SlideSpec {
        title,
        background_pattern: text(lookup(obj, &["backgroundPattern", "background_pattern", "pattern"])),
        kind,
    }
}

fn columns(obj: &Map<String, Value>) -> (Column, Column) {
    (
        column(lookup(obj, &["left", "leftColumn"])),
        column(lookup(obj, &["right", "rightColumn"])),
    )
}

fn column(value: Option<&Value>) -> Column {
    match value {
        Some(Value::Object(col)) => Column {
            heading: text(lookup(col, &["heading", "title", "label"])).unwrap_or_default(),
            points: text_list(lookup(col, &["points", "content", "items"])),
        },
        other => Column {
            heading: String::new(),
            points: text_list(other),
        },
    }
}

fn chart(index: usize, obj: &Map<String, Value>) -> SlideKind {
    let chart_type = text(lookup(obj, &["chartType", "chart_type", "kind"])).unwrap_or_else(|| {
        debug!(slide = index, reason = "missing chart type", "spec corrected");
        "bar".to_string()
    });

    // Data may be nested under `data` or sit on the slide itself
    let source = match obj.get("data") {
        Some(Value::Object(data)) => data,
        _ => obj,
    };

    let labels = text_list(lookup(source, &["labels", "categories"]));
    let datasets: Vec<Dataset> = match lookup(source, &["datasets", "series"]) {
        Some(Value::Array(sets)) => sets
            .iter()
            .enumerate()
            .filter_map(|(i, set)| dataset(i, set))
            .collect(),
        _ => Vec::new(),
    };

    let data = if labels.is_empty() || datasets.is_empty() {
        debug!(slide = index, reason = "missing chart data", "spec corrected");
        synthetic_chart_data()
    } else {
        ChartData { labels, datasets }
    };

    SlideKind::Chart {
        chart_type,
        data,
        show_legend: lookup(obj, &["showLegend", "legend"])
            .and_then(Value::as_bool)
            .unwrap_or(true),
        show_values: lookup(obj, &["showValues", "dataLabels"])
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn dataset(index: usize, value: &Value) -> Option<Dataset> {
    let set = value.as_object()?;
    let values = match lookup(set, &["data", "values"]) {
        Some(Value::Array(values)) => values.iter().map(number).collect(),
        _ => return None,
    };
    Some(Dataset {
        label: text(lookup(set, &["label", "name"])).unwrap_or_else(|| format!("Series {}", index + 1)),
        data: values,
        color: text(set.get("color")).and_then(|hex| RGBColor::from_hex(&hex)),
    })
}

fn synthetic_chart_data() -> ChartData {
    ChartData {
        labels: vec![
            "Category A".to_string(),
            "Category B".to_string(),
            "Category C".to_string(),
        ],
        datasets: vec![Dataset {
            label: "Series 1".to_string(),
            data: vec![Some(30.0), Some(45.0), Some(25.0)],
            color: None,
        }],
    }
}

fn table(obj: &Map<String, Value>) -> SlideKind {
    let mut headers = text_list(lookup(obj, &["headers", "columns"]));
    let rows = match lookup(obj, &["rows", "data"]) {
        Some(Value::Array(rows)) => rows
            .iter()
            .map(|row| match row {
                Value::Object(cells) => {
                    if headers.is_empty() {
                        headers = cells.keys().cloned().collect();
                    }
                    headers
                        .iter()
                        .map(|h| text(cells.get(h)).unwrap_or_default())
                        .collect()
                },
                Value::Array(cells) => cells
                    .iter()
                    .map(|cell| text(Some(cell)).unwrap_or_default())
                    .collect(),
                other => vec![text(Some(other)).unwrap_or_default()],
            })
            .collect(),
        _ => Vec::new(),
    };
    let emphasis = match lookup(obj, &["emphasis", "highlight", "highlightRows"]) {
        Some(Value::Array(idx)) => idx
            .iter()
            .filter_map(Value::as_u64)
            .map(|i| i as usize)
            .collect(),
        Some(Value::Number(n)) => n.as_u64().map(|i| vec![i as usize]).unwrap_or_default(),
        _ => Vec::new(),
    };
    SlideKind::Table {
        headers,
        rows,
        emphasis,
    }
}

fn steps(obj: &Map<String, Value>) -> Vec<ProcessStep> {
    let Some(Value::Array(items)) = lookup(obj, &["steps", "items", "content"]) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(step) => ProcessStep {
                title: text(lookup(step, &["title", "name", "step"]))
                    .unwrap_or_else(|| format!("Step {}", i + 1)),
                description: text(lookup(step, &["description", "content", "text"]))
                    .unwrap_or_default(),
            },
            other => ProcessStep {
                title: text(Some(other)).unwrap_or_else(|| format!("Step {}", i + 1)),
                description: String::new(),
            },
        })
        .collect()
}

fn timeline(index: usize, obj: &Map<String, Value>) -> SlideKind {
    let events: Vec<TimelineEvent> = match lookup(obj, &["events", "items", "milestones"]) {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(event) => TimelineEvent {
                    date: text(lookup(event, &["date", "year", "time"])).unwrap_or_default(),
                    title: text(lookup(event, &["title", "name", "event"]))
                        .unwrap_or_else(|| format!("Event {}", i + 1)),
                    description: text(lookup(event, &["description", "content", "text"]))
                        .unwrap_or_default(),
                },
                other => TimelineEvent {
                    date: String::new(),
                    title: text(Some(other)).unwrap_or_else(|| format!("Event {}", i + 1)),
                    description: String::new(),
                },
            })
            .collect(),
        _ => Vec::new(),
    };

    if events.is_empty() {
        debug!(slide = index, reason = "empty timeline", "spec corrected");
        return SlideKind::Timeline {
            events: vec![
                TimelineEvent {
                    date: "2024".to_string(),
                    title: "Project Start".to_string(),
                    description: String::new(),
                },
                TimelineEvent {
                    date: "2025".to_string(),
                    title: "Next Milestone".to_string(),
                    description: String::new(),
                },
            ],
        };
    }
    SlideKind::Timeline { events }
}

fn normalize_theme(value: &Value) -> ThemeSpec {
    let Some(theme) = value.as_object() else {
        // A bare string names a preset
        return ThemeSpec {
            preset: text(Some(value)),
            ..Default::default()
        };
    };

    let colors = theme.get("colors").and_then(Value::as_object);
    let color = |keys: &[&str]| {
        let raw = text(colors.and_then(|c| lookup(c, keys)))?;
        let parsed = RGBColor::from_hex(&raw);
        if parsed.is_none() {
            debug!(color = %raw, "unparseable theme color ignored");
        }
        parsed
    };

    let fonts = theme.get("fonts").and_then(Value::as_object);
    let font = |key: &str| text(fonts.and_then(|f| f.get(key)));

    let design = theme.get("design").and_then(Value::as_object);
    let spacing = theme.get("spacing").and_then(Value::as_object);
    let measure = |key: &str| spacing.and_then(|s| s.get(key)).and_then(Value::as_f64);

    ThemeSpec {
        preset: text(lookup(theme, &["preset", "name"])),
        colors: ColorOverrides {
            primary: color(&["primary"]),
            secondary: color(&["secondary"]),
            accent: color(&["accent"]),
            background: color(&["background"]),
            text: color(&["text"]),
            text_light: color(&["textLight", "text_light"]),
            success: color(&["success"]),
            warning: color(&["warning"]),
            error: color(&["error"]),
        },
        fonts: FontOverrides {
            heading: font("heading"),
            body: font("body"),
            accent: font("accent"),
        },
        design: DesignOverrides {
            background_pattern: text(
                design.and_then(|d| lookup(d, &["backgroundPattern", "background_pattern", "pattern"])),
            ),
            corner_radius: text(design.and_then(|d| lookup(d, &["cornerRadius", "corner_radius"])))
                .and_then(|r| CornerRadius::parse(&r)),
            shadows: design
                .and_then(|d| lookup(d, &["shadows", "shadow"]))
                .and_then(Value::as_bool),
        },
        spacing: SpacingOverrides {
            margin: measure("margin"),
            gap: measure("gap"),
        },
    }
}

fn normalize_animations(value: &Value) -> Option<AnimationSpec> {
    match value {
        Value::Bool(enabled) => Some(AnimationSpec {
            enabled: *enabled,
            style: None,
        }),
        Value::Object(anim) => Some(AnimationSpec {
            enabled: anim.get("enabled").and_then(Value::as_bool).unwrap_or(false),
            style: text(lookup(anim, &["style", "type", "transition"])),
        }),
        _ => None,
    }
}

/// First present key among `keys`.
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
}

/// Non-empty text from a string, a number, or an object with a text-like field.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        },
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => text(lookup(obj, &["text", "title", "label", "name"])),
        _ => None,
    }
}

/// A list of strings; a lone string becomes a one-item list.
fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|item| text(Some(item))).collect(),
        Some(other) => text(Some(other)).into_iter().collect(),
        None => Vec::new(),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_top_level_shape_is_fatal() {
        assert!(matches!(validate(&json!([1, 2])), Err(Error::MalformedSpec(_))));
        assert!(matches!(validate(&json!({"title": "x"})), Err(Error::MalformedSpec(_))));
        assert!(matches!(
            validate(&json!({"slides": "nope"})),
            Err(Error::MalformedSpec(_))
        ));
        assert!(matches!(parse_spec("{slides: ["), Err(Error::MalformedSpec(_))));
    }

    #[test]
    fn test_defaults_fill_gaps() {
        let spec = validate(&json!({"slides": [{}, 42, {"type": "title"}]})).unwrap();
        assert_eq!(spec.title, UNTITLED_PRESENTATION);
        assert_eq!(spec.slides.len(), 3);
        assert_eq!(spec.slides[0].title, "Slide 1");
        assert!(matches!(spec.slides[0].kind, SlideKind::Content { .. }));
        assert!(matches!(spec.slides[1].kind, SlideKind::Content { .. }));
        assert!(matches!(spec.slides[2].kind, SlideKind::Title { subtitle: None }));
    }

    #[test]
    fn test_chart_without_data_gets_synthetic_series() {
        let spec = validate(&json!({"slides": [{"type": "chart", "title": "Sales"}]})).unwrap();
        let SlideKind::Chart { chart_type, data, .. } = &spec.slides[0].kind else {
            panic!("expected chart");
        };
        assert_eq!(chart_type, "bar");
        assert_eq!(data.labels, ["Category A", "Category B", "Category C"]);
        assert_eq!(data.datasets[0].data, vec![Some(30.0), Some(45.0), Some(25.0)]);
    }

    #[test]
    fn test_chart_keeps_unsupported_token_and_bad_values() {
        let spec = validate(&json!({"slides": [{
            "type": "chart",
            "chartType": "radar",
            "data": {"labels": ["a", "b"], "datasets": [{"label": "x", "data": [1, "oops"]}]}
        }]}))
        .unwrap();
        let SlideKind::Chart { chart_type, data, .. } = &spec.slides[0].kind else {
            panic!("expected chart");
        };
        assert_eq!(chart_type, "radar");
        assert_eq!(data.datasets[0].data, vec![Some(1.0), None]);
    }

    #[test]
    fn test_empty_timeline_gets_two_events() {
        let spec = validate(&json!({"slides": [{"type": "timeline", "events": []}]})).unwrap();
        let SlideKind::Timeline { events } = &spec.slides[0].kind else {
            panic!("expected timeline");
        };
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Project Start");
        assert_eq!(events[1].date, "2025");
    }

    #[test]
    fn test_unknown_type_kept_for_basic_routing() {
        let spec = validate(&json!({"slides": [{"type": "Hologram", "content": "hi"}]})).unwrap();
        assert_eq!(
            spec.slides[0].kind,
            SlideKind::Unknown {
                original_type: "hologram".to_string(),
                content: vec!["hi".to_string()]
            }
        );
    }

    #[test]
    fn test_table_rows_from_objects() {
        let spec = validate(&json!({"slides": [{
            "type": "table",
            "rows": [{"Name": "A", "Score": 3}, {"Name": "B"}],
            "emphasis": [1]
        }]}))
        .unwrap();
        let SlideKind::Table { headers, rows, emphasis } = &spec.slides[0].kind else {
            panic!("expected table");
        };
        assert_eq!(headers, &["Name", "Score"]);
        assert_eq!(rows[0], vec!["A", "3"]);
        assert_eq!(rows[1], vec!["B", ""]);
        assert_eq!(emphasis, &[1]);
    }

    #[test]
    fn test_theme_overrides() {
        let spec = validate(&json!({
            "slides": [],
            "theme": {
                "preset": "Vibrant",
                "colors": {"background": "#030F26", "text": "not a color"},
                "fonts": {"heading": "Futura"},
                "design": {"cornerRadius": "high", "shadows": false, "backgroundPattern": "dots"}
            },
            "animations": {"enabled": true, "style": "push"}
        }))
        .unwrap();
        assert_eq!(spec.theme.preset.as_deref(), Some("Vibrant"));
        assert_eq!(spec.theme.colors.background, RGBColor::from_hex("030F26"));
        assert_eq!(spec.theme.colors.text, None);
        assert_eq!(spec.theme.fonts.heading.as_deref(), Some("Futura"));
        assert_eq!(spec.theme.design.corner_radius, Some(CornerRadius::High));
        assert_eq!(spec.theme.design.shadows, Some(false));
        let anim = spec.animations.unwrap();
        assert!(anim.enabled);
        assert_eq!(anim.style.as_deref(), Some("push"));
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-z#0-9 ]{0,8}".prop_map(Value::String),
            prop_oneof![
                Just("title"),
                Just("chart"),
                Just("table"),
                Just("process"),
                Just("timeline"),
                Just("two-column"),
                Just("mystery"),
            ]
            .prop_map(|s| Value::String(s.to_string())),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                prop::collection::btree_map(
                    prop_oneof![
                        Just("type".to_string()),
                        Just("title".to_string()),
                        Just("data".to_string()),
                        Just("labels".to_string()),
                        Just("datasets".to_string()),
                        Just("steps".to_string()),
                        Just("events".to_string()),
                        Just("rows".to_string()),
                        Just("content".to_string()),
                    ],
                    inner,
                    0..5
                )
                .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_validation_is_total_and_keeps_count(
            slides in prop::collection::vec(arb_json(), 0..8),
            theme in arb_json(),
        ) {
            let raw = json!({"slides": slides.clone(), "theme": theme});
            let spec = validate(&raw).unwrap();
            prop_assert_eq!(spec.slides.len(), slides.len());
            for slide in &spec.slides {
                prop_assert!(!slide.title.is_empty());
            }
        }
    }
}
