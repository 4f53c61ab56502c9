//! Direct icon links on the list pages.
//!
//! Runs independently of the filter session: it reads the model, patches
//! the icons of every detail row and repeats after each DOM change. Icons
//! already patched carry a marker attribute and are left alone, so the
//! patches' own mutations settle after one extra pass.

use fc_core::links::{
    row_link_targets, LinkTarget, DETAIL_ROW_SELECTOR, REPLACED_MARKER_ATTRIBUTE, SUPPORT_LIST_CLASS,
};
use fc_core::{read_model, MutationKind, PageContext};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, MutationObserver};

use crate::dom::{self, DomPage};
use crate::observer::observer_init;

const LINK_STYLE: &str = "display: inline-block; cursor: pointer; text-decoration: none;";

/// Patch the icons now and after every structural change.
pub fn install(document: &Document, context: PageContext) -> Result<(), JsValue> {
    let Some(root) = document.document_element() else {
        return Err(JsValue::from_str("document has no root element"));
    };

    rewrite_all(document, context);

    let observed = document.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |_records: js_sys::Array, _observer: MutationObserver| {
            rewrite_all(&observed, context);
        },
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    observer.observe_with_options(&root, &observer_init(MutationKind::CHILD_LIST))?;
    callback.forget();
    Ok(())
}

/// One pass over every detail row. Returns the number of icons patched.
pub fn rewrite_all(document: &Document, context: PageContext) -> usize {
    let page = DomPage::detached(document.clone(), context);
    let Some(model) = read_model(&page) else {
        return 0;
    };

    let rows = match document.query_selector_all(DETAIL_ROW_SELECTOR) {
        Ok(list) => dom::elements(&list),
        Err(e) => {
            log::warn!("query {DETAIL_ROW_SELECTOR} failed: {e:?}");
            return 0;
        }
    };

    let mut patched = 0;
    for row in &rows {
        let targets = row_link_targets(&model, row);
        if targets.is_empty() {
            continue;
        }
        let Ok(Some(support)) = row.0.query_selector(&format!(".{SUPPORT_LIST_CLASS}")) else {
            continue;
        };
        for target in &targets {
            match rewrite_icon(document, &support, target) {
                Ok(true) => patched += 1,
                Ok(false) => {}
                Err(e) => log::warn!("failed to patch {} icon: {e:?}", target.icon_class),
            }
        }
    }
    if patched > 0 {
        log::debug!("patched {patched} icon links");
    }
    patched
}

fn rewrite_icon(
    document: &Document,
    support: &web_sys::Element,
    target: &LinkTarget,
) -> Result<bool, JsValue> {
    let Some(icon) = support.query_selector(&format!(".{}", target.icon_class))? else {
        return Ok(false);
    };
    if icon.has_attribute(REPLACED_MARKER_ATTRIBUTE) {
        return Ok(false);
    }
    let Some(parent) = icon.parent_element() else {
        return Ok(false);
    };

    let link = match parent.dyn_into::<HtmlAnchorElement>() {
        Ok(existing) => existing,
        Err(parent) => {
            let link = document.create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
            link.set_attribute("style", LINK_STYLE)?;
            parent.insert_before(&link, Some(&icon))?;
            link.append_child(&icon)?;
            link
        }
    };
    link.set_href(&target.url);
    link.set_target("_blank");
    link.set_rel("noopener noreferrer");
    open_in_new_window(&link, target.url.clone());

    icon.set_attribute(REPLACED_MARKER_ATTRIBUTE, "true")?;
    Ok(true)
}

/// Capture-phase click handler, so the host's own handlers never see the
/// click.
fn open_in_new_window(link: &HtmlAnchorElement, url: String) {
    let options = EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    };
    EventListener::new_with_options(link, "click", options, move |event| {
        event.prevent_default();
        event.stop_propagation();
        event.stop_immediate_propagation();
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.open_with_url_and_target_and_features(&url, "_blank", "noopener,noreferrer") {
            log::warn!("failed to open {url}: {e:?}");
        }
    })
    .forget();
}

