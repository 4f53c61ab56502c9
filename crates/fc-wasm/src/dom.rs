//! `web_sys` implementations of the core page traits.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fc_core::{ControlPanel, Element, FilterSession, FilterState, Page, PageContext};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, NodeList};

use crate::panel;

/// Element handle over a live DOM node.
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(pub web_sys::Element);

impl Element for DomElement {
    fn classes(&self) -> Vec<String> {
        let list = self.0.class_list();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn previous_sibling(&self) -> Option<Self> {
        self.0.previous_element_sibling().map(DomElement)
    }

    fn next_sibling(&self) -> Option<Self> {
        self.0.next_element_sibling().map(DomElement)
    }

    fn descendants_with_class_fragment(&self, fragment: &str) -> Vec<Self> {
        let selector = format!("[class*=\"{}\"]", fragment);
        match self.0.query_selector_all(&selector) {
            Ok(list) => elements(&list),
            Err(e) => {
                log::warn!("query {selector} failed: {e:?}");
                Vec::new()
            }
        }
    }

    fn set_visible(&self, visible: bool) {
        let Some(html) = self.0.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let hidden = style.get_property_value("display").unwrap_or_default() == "none";
        // Unchanged styles must not be rewritten: the observer sees every write.
        let result = match (visible, hidden) {
            (true, true) => style.remove_property("display").map(|_| ()),
            (false, false) => style.set_property("display", "none"),
            _ => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("failed to toggle visibility: {e:?}");
        }
    }
}

/// Elements of a node list, skipping non-element nodes.
pub fn elements(list: &NodeList) -> Vec<DomElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(DomElement)
        .collect()
}

/// The live document for one page context.
///
/// Holds a weak handle to the session so panel callbacks can reach it
/// without keeping it alive.
#[derive(Clone)]
pub struct DomPage {
    document: Document,
    context: PageContext,
    session: Weak<RefCell<FilterSession>>,
}

impl DomPage {
    pub fn new(document: Document, context: PageContext, session: Weak<RefCell<FilterSession>>) -> Self {
        Self { document, context, session }
    }

    /// A page with no session behind it, for read-only passes.
    pub fn detached(document: Document, context: PageContext) -> Self {
        Self::new(document, context, Weak::new())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn context(&self) -> PageContext {
        self.context
    }

    /// Run `f` against the session if it is alive and not already borrowed.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut FilterSession, &DomPage) -> R) -> Option<R> {
        let session = self.session.upgrade()?;
        with_session(&session, |s| f(s, self))
    }
}

/// Borrow the session for one callback. A busy session means we are inside
/// another callback; the event is dropped and the next one catches up.
pub fn with_session<R>(
    session: &Rc<RefCell<FilterSession>>,
    f: impl FnOnce(&mut FilterSession) -> R,
) -> Option<R> {
    match session.try_borrow_mut() {
        Ok(mut s) => Some(f(&mut *s)),
        Err(_) => {
            log::warn!("filter session busy; skipping event");
            None
        }
    }
}

impl Page for DomPage {
    type Element = DomElement;

    fn text_by_id(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .map(|el| el.text_content().unwrap_or_default())
    }

    fn set_text_by_id(&self, id: &str, text: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(el) => {
                el.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(e) => {
                log::warn!("query {selector} failed: {e:?}");
                Vec::new()
            }
        }
    }

    fn location_hash(&self) -> String {
        self.document
            .location()
            .and_then(|location| location.hash().ok())
            .unwrap_or_default()
    }
}

impl ControlPanel for DomPage {
    fn panel_present(&self) -> bool {
        panel::exists(&self.document, self.context)
    }

    fn build_panel(&self, state: &FilterState) -> bool {
        panel::build(self, state)
    }

    fn sync_checkboxes(&self, state: &FilterState) {
        panel::sync_checkboxes(&self.document, self.context, state);
    }
}
