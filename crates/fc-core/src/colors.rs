//! Static favorite-color catalog
//!
//! The host site offers ten favorite colors. Ids are the numeric strings the
//! site uses in its model and in its `favorite-*color-<id>` class names.

/// One selectable favorite color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ColorDefinition {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS color used for the checkbox swatch
    pub swatch: &'static str,
}

/// Id of the white category, which also stands for "no color assigned".
pub const BLANK_COLOR_ID: &str = "10";

pub const COLOR_DEFINITIONS: [ColorDefinition; 10] = [
    ColorDefinition { id: "1", name: "Orange", swatch: "#FF944A" },
    ColorDefinition { id: "2", name: "Pink", swatch: "#FF00FF" },
    ColorDefinition { id: "3", name: "Yellow", swatch: "#FFF700" },
    ColorDefinition { id: "4", name: "Green", swatch: "#00B54A" },
    ColorDefinition { id: "5", name: "Light blue", swatch: "#00B5FF" },
    ColorDefinition { id: "6", name: "Purple", swatch: "#9C529C" },
    ColorDefinition { id: "7", name: "Blue", swatch: "#0000FF" },
    ColorDefinition { id: "8", name: "Light green", swatch: "#00FF00" },
    ColorDefinition { id: "9", name: "Red", swatch: "#FF0000" },
    ColorDefinition { id: BLANK_COLOR_ID, name: "White", swatch: "#FFFFFF" },
];

/// Look up a catalog entry by id.
pub fn find_color(id: &str) -> Option<&'static ColorDefinition> {
    COLOR_DEFINITIONS.iter().find(|c| c.id == id)
}

/// True if `id` is the blank category.
#[inline]
pub fn is_blank(id: &str) -> bool {
    id == BLANK_COLOR_ID
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, a) in COLOR_DEFINITIONS.iter().enumerate() {
            for b in &COLOR_DEFINITIONS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_find_color() {
        assert_eq!(find_color("5").map(|c| c.name), Some("Light blue"));
        assert_eq!(find_color(BLANK_COLOR_ID).map(|c| c.swatch), Some("#FFFFFF"));
        assert!(find_color("11").is_none());
        assert!(find_color("").is_none());
    }
}
