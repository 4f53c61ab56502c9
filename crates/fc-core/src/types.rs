//! Core type definitions shared by the engine, the sync controller and the
//! browser binding.

// =============================================================================
// Resolved Colors
// =============================================================================

/// Canonical color id for one item, or `None` when no favorite color is
/// assigned. `None` is visibility-equivalent to the blank color.
pub type ResolvedColor = Option<String>;

// =============================================================================
// Filter Summary
// =============================================================================

/// Status label text before the first pass.
pub const LABEL_IDLE_TEXT: &str = "Select colors to show:";

/// Result of one filter pass, after any duplicate-marker correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
}

impl FilterSummary {
    /// Status label text for this summary.
    pub fn label_text(&self) -> String {
        format!("Select colors to show ({}/{} displayed):", self.shown, self.total)
    }
}

// =============================================================================
// Mutation Kinds (bit mask, mirrors MutationObserverInit)
// =============================================================================

bitflags::bitflags! {
    /// Kinds of DOM mutation the sync controller observes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MutationKind: u8 {
        /// Node insertion / removal
        const CHILD_LIST = 1 << 0;
        /// Attribute changes
        const ATTRIBUTES = 1 << 1;
        /// Text node changes
        const CHARACTER_DATA = 1 << 2;

        /// Everything the controller subscribes to
        const ALL = Self::CHILD_LIST.bits() | Self::ATTRIBUTES.bits() | Self::CHARACTER_DATA.bits();
    }
}

impl MutationKind {
    /// Parse from a `MutationRecord.type` string.
    pub fn from_record_type(s: &str) -> Self {
        match s {
            "childList" => Self::CHILD_LIST,
            "attributes" => Self::ATTRIBUTES,
            "characterData" => Self::CHARACTER_DATA,
            _ => Self::empty(),
        }
    }
}

// =============================================================================
// Mutation Summary
// =============================================================================

/// Host-independent digest of one mutation record.
///
/// The browser binding builds one of these per `MutationRecord` so the
/// decision logic in [`crate::sync`] never touches the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationSummary {
    pub kind: MutationKind,
    /// Target (or a text target's parent) lies inside the control panel
    pub inside_panel: bool,
    /// Attribute name for `ATTRIBUTES` records
    pub attribute_name: Option<String>,
    /// An added or removed node is, or contains, a marker container
    pub touches_markers: bool,
}

impl MutationSummary {
    pub fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            inside_panel: false,
            attribute_name: None,
            touches_markers: false,
        }
    }

    pub fn inside_panel(mut self) -> Self {
        self.inside_panel = true;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = Some(name.into());
        self
    }

    pub fn touching_markers(mut self) -> Self {
        self.touches_markers = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_text() {
        let summary = FilterSummary { shown: 3, total: 7 };
        assert_eq!(summary.label_text(), "Select colors to show (3/7 displayed):");
    }

    #[test]
    fn test_mutation_kind_from_record_type() {
        assert_eq!(MutationKind::from_record_type("childList"), MutationKind::CHILD_LIST);
        assert_eq!(MutationKind::from_record_type("attributes"), MutationKind::ATTRIBUTES);
        assert_eq!(MutationKind::from_record_type("characterData"), MutationKind::CHARACTER_DATA);
        assert!(MutationKind::from_record_type("bogus").is_empty());
        assert!(MutationKind::ALL.contains(MutationKind::ATTRIBUTES));
    }
}
