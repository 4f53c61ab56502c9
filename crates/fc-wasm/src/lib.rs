//! WebAssembly content script for the favorite-color filter

mod dom;
mod links;
mod observer;
mod panel;
mod schedule;

use std::cell::RefCell;
use std::rc::Rc;

use fc_core::{FilterConfig, FilterSession, PageContext, Startup, COLOR_DEFINITIONS};
use wasm_bindgen::prelude::*;

pub use dom::{DomElement, DomPage};
pub use observer::{observer_init, summarize};

struct Running {
    page: DomPage,
    session: Rc<RefCell<FilterSession>>,
}

thread_local! {
    static RUNNING: RefCell<Option<Running>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Detect the page context and start filtering.
///
/// `config_json` is an optional `FilterConfig` object. Returns false when
/// the current page is not one the filter knows.
#[wasm_bindgen]
pub fn run(config_json: Option<String>) -> Result<bool, JsValue> {
    if is_running() {
        return Err(JsValue::from_str("Already running. Reload the page to restart."));
    }

    let config = FilterConfig::from_json(config_json.as_deref())
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;
    let location = window.location();
    let pathname = location.pathname()?;
    let hash = location.hash()?;

    let Some(context) = PageContext::detect(&pathname, &hash) else {
        log::debug!("no filter for {pathname}{hash}");
        return Ok(false);
    };
    log::info!("favorite-color filter starting on the {} page", context.name());

    let session = Rc::new(RefCell::new(FilterSession::new(context, config)));
    let page = DomPage::new(document.clone(), context, Rc::downgrade(&session));

    RUNNING.with(|slot| {
        *slot.borrow_mut() = Some(Running {
            page: page.clone(),
            session: session.clone(),
        });
    });

    let doc = document.clone();
    schedule::when_parsed(&document, move || {
        if let Err(e) = start(&doc, &window, page, session, config) {
            log::error!("failed to start the filter: {e:?}");
        }
    });
    Ok(true)
}

fn start(
    document: &web_sys::Document,
    window: &web_sys::Window,
    page: DomPage,
    session: Rc<RefCell<FilterSession>>,
    config: FilterConfig,
) -> Result<(), JsValue> {
    let context = page.context();

    match dom::with_session(&session, |s| s.start(&page)) {
        Some(Startup::Ready(summary)) => {
            log::debug!("initial pass: {}/{}", summary.shown, summary.total);
        }
        Some(Startup::Polling) => {
            schedule::poll_markers(page.clone(), session.clone(), config.poll_interval_ms);
        }
        None => {}
    }

    if context.rewrites_links() {
        links::install(document, context)?;
    }
    if context.requires_marker_mutations() {
        schedule::follow_hash_changes(window, page.clone(), session.clone(), config.hash_settle_ms);
    }
    observer::observe(document, page, session)
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    RUNNING.with(|slot| slot.borrow().is_some())
}

/// The color catalog as `[{ id, name, swatch }]`.
#[wasm_bindgen]
pub fn color_definitions() -> JsValue {
    let array = js_sys::Array::new();
    for def in &COLOR_DEFINITIONS {
        let obj = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&obj, &"id".into(), &JsValue::from_str(def.id));
        let _ = js_sys::Reflect::set(&obj, &"name".into(), &JsValue::from_str(def.name));
        let _ = js_sys::Reflect::set(&obj, &"swatch".into(), &JsValue::from_str(def.swatch));
        array.push(&obj);
    }
    array.into()
}

/// Context name for a location, or `undefined` if unsupported.
#[wasm_bindgen]
pub fn detect_page_context(pathname: &str, hash: &str) -> Option<String> {
    PageContext::detect(pathname, hash).map(|c| c.name().to_string())
}

/// Run one pass right away. Returns `{ shown, total }`, or `null` when the
/// filter is not running or is busy.
#[wasm_bindgen]
pub fn apply_now() -> JsValue {
    let summary = RUNNING.with(|slot| {
        let slot = slot.borrow();
        let running = slot.as_ref()?;
        dom::with_session(&running.session, |s| s.refilter(&running.page))
    });
    let Some(summary) = summary else {
        return JsValue::NULL;
    };
    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"shown".into(), &JsValue::from(summary.shown as u32));
    let _ = js_sys::Reflect::set(&result, &"total".into(), &JsValue::from(summary.total as u32));
    result.into()
}
