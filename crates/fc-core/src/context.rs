//! Page contexts
//!
//! The host renders circles in three places with different markup. Each
//! context fixes the item selector, the resolver strategy, the row layout and
//! the control panel identity.

use crate::grouper::GroupLayout;
use crate::resolver::{ColorResolver, FavoriteCellResolver, MarkerResolver, OverlayResolver};

/// Which host page we are injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageContext {
    /// `/User/Favorites`
    Favorites,
    /// `/Circle/List`
    CircleList,
    /// `/Map`, in the path or in the hash route
    Map,
}

/// How repeated renderings of one item affect the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Every element is a distinct item.
    None,
    /// Scaled map views draw every marker twice; halve both counts.
    HalveWhenScaled,
}

/// Identity of the injected control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelIds {
    /// Container class; everything inside is ours.
    pub container_class: &'static str,
    pub label_id: &'static str,
    /// Checkbox id is this prefix followed by the color id.
    pub checkbox_prefix: &'static str,
}

const LIST_PANEL: PanelIds = PanelIds {
    container_class: "multi-color-filter",
    label_id: "multi-color-filter-label",
    checkbox_prefix: "color-checkbox-",
};

const MAP_PANEL: PanelIds = PanelIds {
    container_class: "map-color-filter",
    label_id: "map-color-filter-label",
    checkbox_prefix: "map-color-checkbox-",
};

/// Class of the map's marker containers.
pub const MARKER_CONTAINER_CLASS: &str = "map-favorites";

impl PageContext {
    /// Detect the context from `location.pathname` and `location.hash`.
    pub fn detect(pathname: &str, hash: &str) -> Option<Self> {
        if pathname.contains("/User/Favorites") {
            Some(Self::Favorites)
        } else if pathname.contains("/Circle/List") {
            Some(Self::CircleList)
        } else if pathname.contains("/Map") || hash.contains("/Map") {
            Some(Self::Map)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::CircleList => "circle-list",
            Self::Map => "map",
        }
    }

    /// Parse a context name as printed by [`PageContext::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "favorites" => Some(Self::Favorites),
            "circle-list" | "list" => Some(Self::CircleList),
            "map" => Some(Self::Map),
            _ => None,
        }
    }

    /// Selector for the anchor element of every item.
    pub fn item_selector(&self) -> &'static str {
        match self {
            Self::Favorites | Self::CircleList => "tr.webcatalog-circle-list-detail",
            Self::Map => ".map-favorites > div",
        }
    }

    pub fn resolver(&self) -> Box<dyn ColorResolver> {
        match self {
            Self::Favorites => Box::new(FavoriteCellResolver),
            Self::CircleList => Box::new(OverlayResolver),
            Self::Map => Box::new(MarkerResolver),
        }
    }

    pub fn layout(&self) -> GroupLayout {
        match self {
            Self::Favorites => GroupLayout::FAVORITES,
            Self::CircleList => GroupLayout::CIRCLE_LIST,
            Self::Map => GroupLayout::SINGLE,
        }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        match self {
            Self::Map => DuplicatePolicy::HalveWhenScaled,
            _ => DuplicatePolicy::None,
        }
    }

    pub fn panel(&self) -> PanelIds {
        match self {
            Self::Map => MAP_PANEL,
            _ => LIST_PANEL,
        }
    }

    /// Markers may appear after the document is parsed with no mutation
    /// announcing them promptly, so the map polls for them.
    pub fn polls_for_items(&self) -> bool {
        matches!(self, Self::Map)
    }

    /// Only marker container churn re-triggers the map filter.
    pub fn requires_marker_mutations(&self) -> bool {
        matches!(self, Self::Map)
    }

    /// Icon link rewriting applies to the list pages.
    pub fn rewrites_links(&self) -> bool {
        !matches!(self, Self::Map)
    }
}

/// True if the hash route shows a scaled map, which renders every marker
/// twice.
pub fn is_scaled_view(hash: &str) -> bool {
    hash.contains("/scale=1") || hash.contains("/scale=2")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(PageContext::detect("/User/Favorites", ""), Some(PageContext::Favorites));
        assert_eq!(PageContext::detect("/Circle/List", "#top"), Some(PageContext::CircleList));
        assert_eq!(PageContext::detect("/Map/Day1", ""), Some(PageContext::Map));
        assert_eq!(PageContext::detect("/", "#/Map/scale=1"), Some(PageContext::Map));
        assert_eq!(PageContext::detect("/Circle/Detail", ""), None);
    }

    #[test]
    fn test_name_round_trip() {
        for ctx in [PageContext::Favorites, PageContext::CircleList, PageContext::Map] {
            assert_eq!(PageContext::from_name(ctx.name()), Some(ctx));
        }
        assert_eq!(PageContext::from_name("nope"), None);
    }

    #[test]
    fn test_scaled_view() {
        assert!(is_scaled_view("#/Map/scale=1"));
        assert!(is_scaled_view("#/Map/scale=2/x"));
        assert!(!is_scaled_view("#/Map"));
        assert!(!is_scaled_view("#/Map/scale=3"));
    }

    #[test]
    fn test_context_wiring() {
        assert_eq!(PageContext::Favorites.layout().trailing, 2);
        assert_eq!(PageContext::CircleList.layout().trailing, 3);
        assert_eq!(PageContext::Map.layout(), GroupLayout::SINGLE);
        assert!(!PageContext::Map.resolver().consults_model());
        assert!(PageContext::Favorites.resolver().consults_model());
        assert_eq!(PageContext::Map.panel().container_class, "map-color-filter");
        assert_eq!(PageContext::CircleList.panel().label_id, "multi-color-filter-label");
    }
}
