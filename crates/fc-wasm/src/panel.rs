//! Control panel: one checkbox per color, select-all / deselect-all and
//! the status label.
//!
//! Everything lives under one container whose class the mutation observer
//! uses to recognise our own writes.

use fc_core::types::LABEL_IDLE_TEXT;
use fc_core::{FilterState, PageContext, COLOR_DEFINITIONS};
use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::dom::DomPage;

const LIST_CONTAINER_STYLE: &str =
    "margin-top: 10px; padding: 10px; background-color: #f5f5f5; border-radius: 4px;";
const LIST_LABEL_STYLE: &str = "margin-bottom: 8px; font-weight: bold;";
const LIST_ROW_STYLE: &str = "display: flex; flex-wrap: wrap; gap: 10px; align-items: center;";
const LIST_BUTTON_STYLE: &str = "padding: 10px; cursor: pointer;";
const LIST_SWATCH_SIZE: u32 = 30;

const MAP_CONTAINER_STYLE: &str = "position: absolute; top: 50px; right: 10px; z-index: 10000; \
     background-color: rgba(255, 255, 255, 0.95); padding: 12px; border-radius: 8px; \
     box-shadow: 0 2px 10px rgba(0, 0, 0, 0.2); max-width: 400px; backdrop-filter: blur(5px);";
const MAP_HEADER_STYLE: &str =
    "display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;";
const MAP_LABEL_STYLE: &str = "font-size: 12px;";
const MAP_MINIMIZE_STYLE: &str =
    "background: none; border: none; font-size: 18px; cursor: pointer; padding: 0 5px; line-height: 1;";
const MAP_BUTTON_ROW_STYLE: &str = "display: flex; gap: 5px; margin-bottom: 8px;";
const MAP_SELECT_ALL_STYLE: &str = "padding: 6px 10px; cursor: pointer; background-color: #FF944A; \
     color: white; border: none; border-radius: 4px; font-size: 12px; flex: 1;";
const MAP_DESELECT_ALL_STYLE: &str = "padding: 6px 10px; cursor: pointer; background-color: #666; \
     color: white; border: none; border-radius: 4px; font-size: 12px; flex: 1;";
const MAP_GRID_STYLE: &str = "display: grid; grid-template-columns: repeat(5, 1fr); gap: 8px;";
const MAP_SWATCH_SIZE: u32 = 28;

const CONTROLS_WRAPPER_CLASS: &str = "filter-controls-wrapper";

/// Where the panel goes relative to an existing element.
enum InsertPoint {
    After(web_sys::Element),
    Before(web_sys::Element),
    Prepend(web_sys::Element),
}

pub fn exists(document: &Document, context: PageContext) -> bool {
    let selector = format!(".{}", context.panel().container_class);
    matches!(document.query_selector(&selector), Ok(Some(_)))
}

/// Build and insert the panel. False when there is nowhere to put it yet.
pub fn build(page: &DomPage, state: &FilterState) -> bool {
    let document = page.document();
    if exists(document, page.context()) {
        return true;
    }
    let Some(point) = find_insert_point(document, page.context()) else {
        return false;
    };

    let result = render(page, state).and_then(|container| insert(&point, &container));
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("failed to build control panel: {e:?}");
            false
        }
    }
}

/// Make every checkbox reflect `state`.
pub fn sync_checkboxes(document: &Document, context: PageContext, state: &FilterState) {
    let prefix = context.panel().checkbox_prefix;
    for def in &COLOR_DEFINITIONS {
        let Some(input) = document
            .get_element_by_id(&format!("{prefix}{}", def.id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        let wanted = state.is_allowed(def.id);
        if input.checked() != wanted {
            input.set_checked(wanted);
        }
    }
}

// =============================================================================
// Placement
// =============================================================================

fn first(document: &Document, selector: &str) -> Option<web_sys::Element> {
    document.query_selector(selector).ok().flatten()
}

fn with_parent(element: Option<web_sys::Element>) -> Option<web_sys::Element> {
    element.filter(|el| el.parent_node().is_some())
}

fn find_insert_point(document: &Document, context: PageContext) -> Option<InsertPoint> {
    match context {
        PageContext::Map => {
            if let Some(close) = with_parent(first(document, ".map-fullscreen-close")) {
                return Some(InsertPoint::After(close));
            }
            let container = first(document, ".map-container, .m-map, #map, [class*=\"map-\"]");
            if let Some(container) = with_parent(container) {
                return Some(InsertPoint::Before(container));
            }
            if let Some(section) = first(document, ".m-section-body, .m-base--inner, .main-content") {
                return Some(InsertPoint::Prepend(section));
            }
            document.body().map(|body| InsertPoint::Prepend(body.into()))
        }
        PageContext::Favorites | PageContext::CircleList => {
            if let Some(colorbox) = with_parent(first(document, ".favorite-colorbox")) {
                return Some(InsertPoint::After(colorbox));
            }
            if let Some(table) = with_parent(first(document, "table.md-infotable, table.t-user-favorites")) {
                return Some(InsertPoint::Before(table));
            }
            first(document, ".m-section-body, .m-base--inner").map(InsertPoint::Prepend)
        }
    }
}

fn insert(point: &InsertPoint, container: &HtmlElement) -> Result<(), JsValue> {
    match point {
        InsertPoint::After(anchor) => {
            if let Some(parent) = anchor.parent_node() {
                parent.insert_before(container, anchor.next_sibling().as_ref())?;
            }
        }
        InsertPoint::Before(anchor) => {
            if let Some(parent) = anchor.parent_node() {
                parent.insert_before(container, Some(anchor))?;
            }
        }
        InsertPoint::Prepend(parent) => {
            parent.insert_before(container, parent.first_child().as_ref())?;
        }
    }
    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

fn create(document: &Document, tag: &str, style: &str) -> Result<HtmlElement, JsValue> {
    let element = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    if !style.is_empty() {
        element.set_attribute("style", style)?;
    }
    Ok(element)
}

fn render(page: &DomPage, state: &FilterState) -> Result<HtmlElement, JsValue> {
    let document = page.document();
    let ids = page.context().panel();
    let is_map = page.context() == PageContext::Map;

    let container = create(
        document,
        "div",
        if is_map { MAP_CONTAINER_STYLE } else { LIST_CONTAINER_STYLE },
    )?;
    container.set_class_name(ids.container_class);

    let label = create(document, "div", if is_map { MAP_LABEL_STYLE } else { LIST_LABEL_STYLE })?;
    label.set_id(ids.label_id);
    label.set_text_content(Some(LABEL_IDLE_TEXT));

    let controls = create(document, "div", "")?;
    controls.set_class_name(CONTROLS_WRAPPER_CLASS);

    if is_map {
        let header = create(document, "div", MAP_HEADER_STYLE)?;
        header.append_child(&label)?;
        header.append_child(&minimize_button(document, &controls)?.into())?;
        container.append_child(&header)?;

        let buttons = create(document, "div", MAP_BUTTON_ROW_STYLE)?;
        buttons.append_child(&select_all_button(page, "Select all", MAP_SELECT_ALL_STYLE)?.into())?;
        buttons.append_child(&deselect_all_button(page, "Clear all", MAP_DESELECT_ALL_STYLE)?.into())?;
        controls.append_child(&buttons)?;

        let grid = create(document, "div", MAP_GRID_STYLE)?;
        append_checkboxes(page, state, &grid, MAP_SWATCH_SIZE)?;
        controls.append_child(&grid)?;
    } else {
        container.append_child(&label)?;

        let row = create(document, "div", LIST_ROW_STYLE)?;
        let select_all = select_all_button(page, "Select all", LIST_BUTTON_STYLE)?;
        select_all.set_class_name("c-btn c-btn--orange");
        row.append_child(&select_all)?;
        let deselect_all = deselect_all_button(page, "Clear all", LIST_BUTTON_STYLE)?;
        deselect_all.set_class_name("c-btn c-btn--orange");
        deselect_all.style().set_property("margin-right", "10px")?;
        row.append_child(&deselect_all)?;
        append_checkboxes(page, state, &row, LIST_SWATCH_SIZE)?;
        controls.append_child(&row)?;
    }

    container.append_child(&controls)?;
    Ok(container)
}

fn select_all_button(page: &DomPage, text: &str, style: &str) -> Result<HtmlElement, JsValue> {
    let button = create(page.document(), "button", style)?;
    button.set_text_content(Some(text));
    let host = page.clone();
    EventListener::new(&button, "click", move |_| {
        host.with_session(|session, page| session.select_all(page));
    })
    .forget();
    Ok(button)
}

fn deselect_all_button(page: &DomPage, text: &str, style: &str) -> Result<HtmlElement, JsValue> {
    let button = create(page.document(), "button", style)?;
    button.set_text_content(Some(text));
    let host = page.clone();
    EventListener::new(&button, "click", move |_| {
        host.with_session(|session, page| session.deselect_all(page));
    })
    .forget();
    Ok(button)
}

fn minimize_button(document: &Document, controls: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let button = create(document, "button", MAP_MINIMIZE_STYLE)?;
    button.set_text_content(Some("\u{2212}"));
    let controls = controls.clone();
    let toggle = button.clone();
    EventListener::new(&button, "click", move |_| {
        let style = controls.style();
        let collapsed = style.get_property_value("display").unwrap_or_default() == "none";
        let (display, glyph) = if collapsed { ("block", "\u{2212}") } else { ("none", "+") };
        if let Err(e) = style.set_property("display", display) {
            log::warn!("failed to toggle panel: {e:?}");
        }
        toggle.set_text_content(Some(glyph));
    })
    .forget();
    Ok(button)
}

fn append_checkboxes(
    page: &DomPage,
    state: &FilterState,
    parent: &HtmlElement,
    swatch_size: u32,
) -> Result<(), JsValue> {
    let document = page.document();
    let prefix = page.context().panel().checkbox_prefix;

    for def in &COLOR_DEFINITIONS {
        let label = create(
            document,
            "label",
            "display: flex; flex-direction: column; align-items: center; cursor: pointer; padding: 4px;",
        )?;
        label.set_title(def.name);

        let swatch = create(
            document,
            "span",
            &format!(
                "display: inline-block; width: {size}px; height: {size}px; background-color: {color}; \
                 border: 1px solid #999; margin-bottom: 4px; border-radius: 3px;",
                size = swatch_size,
                color = def.swatch,
            ),
        )?;

        let input = document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()?;
        input.set_type("checkbox");
        input.set_id(&format!("{prefix}{}", def.id));
        input.set_value(def.id);
        input.set_checked(state.is_allowed(def.id));
        input.set_attribute("style", "cursor: pointer; margin: 0;")?;

        let host = page.clone();
        let id = def.id;
        let checkbox = input.clone();
        EventListener::new(&input, "change", move |_| {
            let checked = checkbox.checked();
            host.with_session(|session, page| session.set_color(page, id, checked));
        })
        .forget();

        label.append_child(&swatch)?;
        label.append_child(&input)?;
        parent.append_child(&label)?;
    }
    Ok(())
}
