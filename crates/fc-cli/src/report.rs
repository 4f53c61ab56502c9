//! Offline filter reports over a saved model document.
//!
//! No markup is available offline, so items resolve from the model alone;
//! anything the model does not color lands in the blank category exactly
//! as it would on a page whose markup carries no color either.

use std::fs;

use fc_core::links::{link_targets, LinkTarget};
use fc_core::resolver::ClassSource;
use fc_core::colors::find_color;
use fc_core::{FilterState, FilterSummary, Model, PageContext, COLOR_DEFINITIONS};
use serde::Serialize;

/// An item with no markup.
struct NoMarkup;

impl ClassSource for NoMarkup {
    fn own_classes(&self) -> Vec<String> {
        Vec::new()
    }

    fn descendant_class_lists(&self, _fragment: &str) -> Vec<Vec<String>> {
        Vec::new()
    }
}

#[derive(Debug, Serialize)]
pub struct CircleReport {
    pub index: usize,
    pub id: Option<String>,
    pub color: Option<String>,
    pub color_name: Option<&'static str>,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub context: &'static str,
    pub allowed: Vec<&'static str>,
    pub circles: Vec<CircleReport>,
    pub summary: FilterSummary,
}

pub fn load_model(path: &str) -> Result<Model, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    Model::parse(&text).map_err(|e| format!("Failed to parse '{}': {}", path, e))
}

/// Build an allow-set from a comma-separated id list. `None` allows all.
pub fn parse_allow(list: Option<&str>) -> Result<FilterState, String> {
    let mut state = FilterState::new();
    let Some(list) = list else {
        return Ok(state);
    };
    state.deselect_all();
    for id in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !state.allow(id) {
            return Err(format!("Unknown color id '{}'", id));
        }
    }
    Ok(state)
}

/// Resolve and filter every model entry the way `context` would.
pub fn inspect(model: &Model, context: PageContext, state: &FilterState) -> InspectReport {
    let resolver = context.resolver();
    let circles: Vec<CircleReport> = (0..model.circles.len())
        .map(|index| {
            let color = resolver.resolve(&NoMarkup, Some(model), index);
            let visible = state.is_visible(color.as_deref());
            CircleReport {
                index,
                id: model.circle(index).and_then(|c| {
                    c.id.as_ref().or(c.circle_id.as_ref()).map(|s| s.to_id_string())
                }),
                color_name: color.as_deref().and_then(find_color).map(|def| def.name),
                color,
                visible,
            }
        })
        .collect();

    let summary = FilterSummary {
        shown: circles.iter().filter(|c| c.visible).count(),
        total: circles.len(),
    };
    InspectReport {
        context: context.name(),
        allowed: state.allowed_ids().collect(),
        circles,
        summary,
    }
}

pub fn links(model: &Model, id: &str) -> Vec<LinkTarget> {
    link_targets(model, id)
}

pub fn catalog_lines() -> Vec<String> {
    COLOR_DEFINITIONS
        .iter()
        .map(|def| format!("{:>3}  {:<12} {}", def.id, def.name, def.swatch))
        .collect()
}
