//! Color resolution
//!
//! An item's color comes from the page model when the model has a value for
//! the item's index, and from markup class names otherwise. The model races
//! with the host renderer, so the markup fallback is not optional.
//!
//! Class families:
//!
//! - favorites rows: `favorite-color-<n>` on a cell
//! - circle list rows: `favorite-backgroundcolor-<n>` on the
//!   `circlecut-overlay-favorite` overlay, bare `favorite-backgroundcolor-`
//!   meaning "no color"
//! - map markers: `favorite-backgroundcolor-<n>` then
//!   `favorite-bordercolor-<n>` on the marker itself, same bare form

use crate::colors::BLANK_COLOR_ID;
use crate::model::Model;
use crate::page::Element;
use crate::types::ResolvedColor;

const FAVORITE_CELL_CLASS: &str = "favorite-color";
const FAVORITE_COLOR_PREFIX: &str = "favorite-color-";
const BACKGROUND_COLOR_PREFIX: &str = "favorite-backgroundcolor-";
const BORDER_COLOR_PREFIX: &str = "favorite-bordercolor-";
const OVERLAY_CLASS: &str = "circlecut-overlay-favorite";

// =============================================================================
// Class Access
// =============================================================================

/// Class-name view of an item, enough for markup resolution.
pub trait ClassSource {
    fn own_classes(&self) -> Vec<String>;

    /// Class lists of descendants whose class attribute contains `fragment`.
    fn descendant_class_lists(&self, fragment: &str) -> Vec<Vec<String>>;
}

impl<E: Element> ClassSource for E {
    fn own_classes(&self) -> Vec<String> {
        self.classes()
    }

    fn descendant_class_lists(&self, fragment: &str) -> Vec<Vec<String>> {
        self.descendants_with_class_fragment(fragment)
            .iter()
            .map(Element::classes)
            .collect()
    }
}

/// Outcome of matching one class against a `<prefix><digits>` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMatch<'a> {
    /// `<prefix><digits>`
    Color(&'a str),
    /// Bare `<prefix>`
    Empty,
    NoMatch,
}

/// Match `class` against `<prefix>\d+` or the bare prefix.
pub fn match_color_class<'a>(class: &'a str, prefix: &str) -> ClassMatch<'a> {
    match class.strip_prefix(prefix) {
        Some("") => ClassMatch::Empty,
        Some(digits) if digits.bytes().all(|b| b.is_ascii_digit()) => ClassMatch::Color(digits),
        _ => ClassMatch::NoMatch,
    }
}

/// First `<prefix><digits>` color in a class list.
fn find_color<'a>(classes: &'a [String], prefix: &str) -> Option<&'a str> {
    classes.iter().find_map(|c| match match_color_class(c, prefix) {
        ClassMatch::Color(id) => Some(id),
        _ => None,
    })
}

/// `favorite-color` itself or a numbered `favorite-color-<n>`.
fn is_color_cell(classes: &[String]) -> bool {
    classes.iter().any(|c| {
        c == FAVORITE_CELL_CLASS
            || matches!(match_color_class(c, FAVORITE_COLOR_PREFIX), ClassMatch::Color(_))
    })
}

fn has_empty(classes: &[String], prefix: &str) -> bool {
    classes
        .iter()
        .any(|c| match_color_class(c, prefix) == ClassMatch::Empty)
}

// =============================================================================
// Resolver Strategies
// =============================================================================

/// Determines the canonical color of one item.
pub trait ColorResolver {
    /// Whether the page model is authoritative for this context.
    fn consults_model(&self) -> bool {
        true
    }

    /// Markup-only resolution.
    fn resolve_markup(&self, item: &dyn ClassSource) -> ResolvedColor;

    /// Model first, then markup.
    fn resolve(&self, item: &dyn ClassSource, model: Option<&Model>, index: usize) -> ResolvedColor {
        if self.consults_model() {
            if let Some(color) = model.and_then(|m| m.favorite_color(index)) {
                return Some(color);
            }
        }
        self.resolve_markup(item)
    }
}

/// Favorites page rows: `favorite-color-<n>` on a table cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct FavoriteCellResolver;

impl ColorResolver for FavoriteCellResolver {
    fn resolve_markup(&self, item: &dyn ClassSource) -> ResolvedColor {
        // Only the first color cell counts, as the host renders one per row.
        // Other `favorite-color*` classes (e.g. `favorite-colorbox`) are not cells.
        let cell = item
            .descendant_class_lists(FAVORITE_CELL_CLASS)
            .into_iter()
            .find(|classes| is_color_cell(classes))?;
        find_color(&cell, FAVORITE_COLOR_PREFIX).map(str::to_string)
    }
}

/// Circle list rows: background class on the circle-cut overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayResolver;

impl ColorResolver for OverlayResolver {
    fn resolve_markup(&self, item: &dyn ClassSource) -> ResolvedColor {
        let overlay = item
            .descendant_class_lists(BACKGROUND_COLOR_PREFIX)
            .into_iter()
            .find(|classes| classes.iter().any(|c| c == OVERLAY_CLASS))?;

        if let Some(id) = find_color(&overlay, BACKGROUND_COLOR_PREFIX) {
            return Some(id.to_string());
        }
        if has_empty(&overlay, BACKGROUND_COLOR_PREFIX) {
            return Some(BLANK_COLOR_ID.to_string());
        }
        None
    }
}

/// Map markers: background beats border on the marker element itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerResolver;

impl ColorResolver for MarkerResolver {
    fn consults_model(&self) -> bool {
        false
    }

    fn resolve_markup(&self, item: &dyn ClassSource) -> ResolvedColor {
        let classes = item.own_classes();
        if let Some(id) = find_color(&classes, BACKGROUND_COLOR_PREFIX) {
            return Some(id.to_string());
        }
        if let Some(id) = find_color(&classes, BORDER_COLOR_PREFIX) {
            return Some(id.to_string());
        }
        if has_empty(&classes, BACKGROUND_COLOR_PREFIX) {
            return Some(BLANK_COLOR_ID.to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[test]
    fn test_match_color_class() {
        assert_eq!(match_color_class("favorite-color-9", FAVORITE_COLOR_PREFIX), ClassMatch::Color("9"));
        assert_eq!(match_color_class("favorite-color-", FAVORITE_COLOR_PREFIX), ClassMatch::Empty);
        assert_eq!(match_color_class("favorite-color-x1", FAVORITE_COLOR_PREFIX), ClassMatch::NoMatch);
        assert_eq!(match_color_class("favorite-color", FAVORITE_COLOR_PREFIX), ClassMatch::NoMatch);
        assert_eq!(match_color_class("other", FAVORITE_COLOR_PREFIX), ClassMatch::NoMatch);
    }

    #[test]
    fn test_favorite_cell_fallback() {
        let page = FakePage::new();
        let row = page.append(&page.root(), &["webcatalog-circle-list-detail"]);
        page.append(&row, &["name"]);
        page.append(&row, &["favorite-color", "favorite-color-9"]);

        assert_eq!(FavoriteCellResolver.resolve(&row, None, 0).as_deref(), Some("9"));
    }

    #[test]
    fn test_favorite_cell_skips_lookalike_classes() {
        let page = FakePage::new();
        let row = page.append(&page.root(), &["webcatalog-circle-list-detail"]);
        page.append(&row, &["favorite-colorbox"]);
        page.append(&row, &["favorite-color", "favorite-color-3"]);

        assert_eq!(FavoriteCellResolver.resolve(&row, None, 0).as_deref(), Some("3"));

        let bare = page.append(&page.root(), &["webcatalog-circle-list-detail"]);
        page.append(&bare, &["favorite-colorbox"]);
        assert_eq!(FavoriteCellResolver.resolve(&bare, None, 0), None);
    }

    #[test]
    fn test_model_beats_markup() {
        let page = FakePage::new();
        let row = page.append(&page.root(), &[]);
        page.append(&row, &["favorite-color-9"]);
        let model = Model::parse(r#"{"Circles":[{"Favorite":{"Color":4}}]}"#).unwrap();

        assert_eq!(FavoriteCellResolver.resolve(&row, Some(&model), 0).as_deref(), Some("4"));
        // Index past the model falls back to markup.
        assert_eq!(FavoriteCellResolver.resolve(&row, Some(&model), 1).as_deref(), Some("9"));
    }

    #[test]
    fn test_null_model_color_falls_back() {
        let page = FakePage::new();
        let row = page.append(&page.root(), &[]);
        let model = Model::parse(r#"{"Circles":[{"Favorite":{"Color":null}}]}"#).unwrap();

        assert_eq!(FavoriteCellResolver.resolve(&row, Some(&model), 0), None);
    }

    #[test]
    fn test_overlay_resolver() {
        let page = FakePage::new();
        let colored = page.append(&page.root(), &[]);
        page.append(&colored, &["circlecut-overlay-favorite", "favorite-backgroundcolor-3"]);
        let empty = page.append(&page.root(), &[]);
        page.append(&empty, &["circlecut-overlay-favorite", "favorite-backgroundcolor-"]);
        let foreign = page.append(&page.root(), &[]);
        page.append(&foreign, &["something-else", "favorite-backgroundcolor-3"]);

        assert_eq!(OverlayResolver.resolve(&colored, None, 0).as_deref(), Some("3"));
        assert_eq!(OverlayResolver.resolve(&empty, None, 0).as_deref(), Some(BLANK_COLOR_ID));
        assert_eq!(OverlayResolver.resolve(&foreign, None, 0), None);
    }

    #[test]
    fn test_marker_background_beats_border() {
        let page = FakePage::new();
        let both = page.append(&page.root(), &["favorite-bordercolor-2", "favorite-backgroundcolor-6"]);
        let border = page.append(&page.root(), &["favorite-bordercolor-2"]);
        let empty = page.append(&page.root(), &["favorite-backgroundcolor-"]);
        let bare = page.append(&page.root(), &["marker"]);

        assert_eq!(MarkerResolver.resolve_markup(&both).as_deref(), Some("6"));
        assert_eq!(MarkerResolver.resolve_markup(&border).as_deref(), Some("2"));
        assert_eq!(MarkerResolver.resolve_markup(&empty).as_deref(), Some(BLANK_COLOR_ID));
        assert_eq!(MarkerResolver.resolve_markup(&bare), None);
    }

    #[test]
    fn test_marker_ignores_model() {
        let page = FakePage::new();
        let marker = page.append(&page.root(), &["favorite-backgroundcolor-1"]);
        let model = Model::parse(r#"{"Circles":[{"Favorite":{"Color":8}}]}"#).unwrap();

        assert_eq!(MarkerResolver.resolve(&marker, Some(&model), 0).as_deref(), Some("1"));
    }
}
