//! DOM access traits
//!
//! The engine never talks to a browser directly. The wasm binding implements
//! these traits over `web_sys`; tests implement them over an in-memory tree.

use crate::state::FilterState;

/// One element of the host page.
///
/// Handles are cheap to clone and compare by node identity.
pub trait Element: Clone {
    /// Class names, in document order.
    fn classes(&self) -> Vec<String>;

    /// Value of an attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    fn previous_sibling(&self) -> Option<Self>;

    fn next_sibling(&self) -> Option<Self>;

    /// Descendants whose `class` attribute contains `fragment` as a
    /// substring (CSS `[class*="fragment"]`), in document order.
    fn descendants_with_class_fragment(&self, fragment: &str) -> Vec<Self>;

    /// Show or hide the element. Implementations must not write when the
    /// element is already in the requested state.
    fn set_visible(&self, visible: bool);

    fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }
}

/// The host page as seen by one filter pass.
pub trait Page {
    type Element: Element;

    /// Text content of the element with the given id, if it exists.
    fn text_by_id(&self, id: &str) -> Option<String>;

    /// Replace the text content of the element with the given id.
    /// Returns false if the element does not exist.
    fn set_text_by_id(&self, id: &str, text: &str) -> bool;

    /// All elements matching a CSS selector, queried fresh.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Current `location.hash`, including the leading `#`.
    fn location_hash(&self) -> String;
}

/// The injected control panel, as far as the sync logic needs it.
pub trait ControlPanel {
    /// True if the panel is currently attached to the page.
    fn panel_present(&self) -> bool;

    /// Build and insert the panel reflecting `state`. Returns false when the
    /// page offers no insertion point yet.
    fn build_panel(&self, state: &FilterState) -> bool;

    /// Make every checkbox match `state`.
    fn sync_checkboxes(&self, state: &FilterState);
}
