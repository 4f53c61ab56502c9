//! Whole-document mutation observer.
//!
//! Records are digested into [`MutationSummary`] values here so the
//! decision of what to do about them stays in `fc_core::sync`.

use std::cell::RefCell;
use std::rc::Rc;

use fc_core::context::MARKER_CONTAINER_CLASS;
use fc_core::{FilterSession, MutationKind, MutationSummary};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, MutationObserver, MutationObserverInit, MutationRecord, Node, NodeList};

use crate::dom::{self, DomPage};

/// Observe the whole document for the rest of the page's life.
pub fn observe(document: &Document, page: DomPage, session: Rc<RefCell<FilterSession>>) -> Result<(), JsValue> {
    let Some(root) = document.document_element() else {
        return Err(JsValue::from_str("document has no root element"));
    };

    let panel_class = page.context().panel().container_class;
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, _observer: MutationObserver| {
            let batch: Vec<MutationSummary> = records
                .iter()
                .filter_map(|value| value.dyn_into::<MutationRecord>().ok())
                .map(|record| summarize(&record, panel_class))
                .collect();
            if let Some(Some(summary)) = dom::with_session(&session, |s| s.on_mutations(&page, &batch)) {
                log::trace!("mutation pass: {}/{}", summary.shown, summary.total);
            }
        },
    );

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    observer.observe_with_options(&root, &observer_init(MutationKind::ALL))?;
    callback.forget();
    Ok(())
}

/// Subtree-wide init for the record kinds in `kinds`.
pub fn observer_init(kinds: MutationKind) -> MutationObserverInit {
    let init = MutationObserverInit::new();
    init.set_subtree(true);
    init.set_child_list(kinds.contains(MutationKind::CHILD_LIST));
    init.set_attributes(kinds.contains(MutationKind::ATTRIBUTES));
    init.set_character_data(kinds.contains(MutationKind::CHARACTER_DATA));
    init
}

/// Digest one record.
pub fn summarize(record: &MutationRecord, panel_class: &str) -> MutationSummary {
    let mut summary = MutationSummary::new(MutationKind::from_record_type(&record.type_()));

    if record
        .target()
        .as_ref()
        .and_then(owning_element)
        .map_or(false, |el| inside(&el, panel_class))
    {
        summary = summary.inside_panel();
    }
    if let Some(name) = record.attribute_name() {
        summary = summary.with_attribute(name);
    }
    if summary.kind.contains(MutationKind::CHILD_LIST)
        && (touches_markers(&record.added_nodes()) || touches_markers(&record.removed_nodes()))
    {
        summary = summary.touching_markers();
    }
    summary
}

/// The node itself if it is an element, otherwise its parent element.
fn owning_element(node: &Node) -> Option<web_sys::Element> {
    match node.dyn_ref::<web_sys::Element>() {
        Some(el) => Some(el.clone()),
        None => node.parent_element(),
    }
}

fn inside(element: &web_sys::Element, class: &str) -> bool {
    matches!(element.closest(&format!(".{class}")), Ok(Some(_)))
}

fn touches_markers(nodes: &NodeList) -> bool {
    let selector = format!(".{MARKER_CONTAINER_CLASS}");
    dom::elements(nodes).iter().any(|el| {
        el.0.class_list().contains(MARKER_CONTAINER_CLASS)
            || matches!(el.0.query_selector(&selector), Ok(Some(_)))
    })
}

