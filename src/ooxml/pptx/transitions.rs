//! Slide transition effects.
//!
//! Only the transitions a generated deck asks for are modelled. Each one is
//! written as a `p:transition` element after the slide's colour map override.

use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Slide transition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionType {
    /// Fade through black
    Fade,
    Push { direction: TransitionDirection },
    Wipe { direction: TransitionDirection },
    Cover { direction: TransitionDirection },
    Zoom { direction: ZoomDirection },
    Dissolve,
}

/// Direction of travel for push, wipe and cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionDirection {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl TransitionDirection {
    fn to_xml_value(self) -> &'static str {
        match self {
            TransitionDirection::Left => "l",
            TransitionDirection::Right => "r",
            TransitionDirection::Up => "u",
            TransitionDirection::Down => "d",
        }
    }
}

/// Zoom transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomDirection {
    #[default]
    In,
    Out,
}

/// Transition speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSpeed {
    /// Slow transition (1500ms)
    Slow,
    /// Medium transition (1000ms)
    Medium,
    /// Fast transition (500ms)
    Fast,
}

impl TransitionSpeed {
    pub(crate) fn to_xml_value(self) -> &'static str {
        match self {
            TransitionSpeed::Slow => "slow",
            TransitionSpeed::Medium => "med",
            TransitionSpeed::Fast => "fast",
        }
    }
}

/// A slide transition; slides advance on click.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideTransition {
    pub transition_type: TransitionType,
    pub speed: TransitionSpeed,
}

impl SlideTransition {
    /// Create a transition at medium speed.
    pub fn new(transition_type: TransitionType) -> Self {
        Self {
            transition_type,
            speed: TransitionSpeed::Medium,
        }
    }

    /// Set the transition speed.
    pub fn with_speed(mut self, speed: TransitionSpeed) -> Self {
        self.speed = speed;
        self
    }

    /// Write the `p:transition` element.
    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        write!(xml, r#"<p:transition spd="{}">"#, self.speed.to_xml_value())?;

        match self.transition_type {
            TransitionType::Fade => xml.push_str("<p:fade/>"),
            TransitionType::Push { direction } => {
                write!(xml, r#"<p:push dir="{}"/>"#, direction.to_xml_value())?
            },
            TransitionType::Wipe { direction } => {
                write!(xml, r#"<p:wipe dir="{}"/>"#, direction.to_xml_value())?
            },
            TransitionType::Cover { direction } => {
                write!(xml, r#"<p:cover dir="{}"/>"#, direction.to_xml_value())?
            },
            TransitionType::Zoom { direction } => {
                let dir = match direction {
                    ZoomDirection::In => "in",
                    ZoomDirection::Out => "out",
                };
                write!(xml, r#"<p:zoom dir="{}"/>"#, dir)?
            },
            TransitionType::Dissolve => xml.push_str("<p:dissolve/>"),
        }

        xml.push_str("</p:transition>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_xml() {
        let transition = SlideTransition::new(TransitionType::Push {
            direction: TransitionDirection::Up,
        })
        .with_speed(TransitionSpeed::Fast);
        let mut xml = String::new();
        transition.write_xml(&mut xml).unwrap();
        assert_eq!(
            xml,
            r#"<p:transition spd="fast"><p:push dir="u"/></p:transition>"#
        );
    }

    #[test]
    fn test_zoom_and_fade_xml() {
        let mut xml = String::new();
        SlideTransition::new(TransitionType::Zoom {
            direction: ZoomDirection::Out,
        })
        .write_xml(&mut xml)
        .unwrap();
        assert_eq!(
            xml,
            r#"<p:transition spd="med"><p:zoom dir="out"/></p:transition>"#
        );

        xml.clear();
        SlideTransition::new(TransitionType::Fade).write_xml(&mut xml).unwrap();
        assert!(xml.ends_with("<p:fade/></p:transition>"));
    }
}
