//! Relationship ID mapper.
//!
//! Relationships are created before XML generation, so slide XML can reference
//! the real IDs of its chart parts.
use std::collections::HashMap;

/// Maps `(slide_index, chart_index_in_slide)` to the slide-local relationship ID.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    chart_ids: HashMap<(usize, usize), String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chart(&mut self, slide_index: usize, chart_index: usize, rel_id: String) {
        self.chart_ids.insert((slide_index, chart_index), rel_id);
    }

    pub fn get_chart_id(&self, slide_index: usize, chart_index: usize) -> Option<&str> {
        self.chart_ids
            .get(&(slide_index, chart_index))
            .map(|s| s.as_str())
    }
}
